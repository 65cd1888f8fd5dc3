//! Interactive text menu: pick a field, enter a rectangle, watch it warp.
//!
//! Bad input at either prompt is reported and the prompt repeats. A run
//! that fails is reported and the menu comes back. End of input behaves
//! like choosing Exit.

use crate::error::CliError;
use crate::session::{simulate, RunConfig};
use field_warp_advection::AdvectionParams;
use field_warp_core::{DVec2, Domain, FieldCatalog, FieldId, Selection, WarpError};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Settings shared by every run started from the menu.
#[derive(Debug, Clone)]
pub struct MenuOptions {
    pub ticks: usize,
    pub params: AdvectionParams,
    pub size: usize,
    pub trail: bool,
    /// Directory for `field-<id>.png` snapshots; `None` disables them.
    pub out_dir: Option<PathBuf>,
}

/// Parses `x0 y0 x1 y1` (whitespace or comma separated) into two corners
/// inside `domain`.
pub fn parse_rectangle(line: &str, domain: &Domain) -> Result<(DVec2, DVec2), WarpError> {
    let values: Vec<f64> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .map_err(|_| WarpError::InputSelection(line.trim().to_string()))?;
    let &[x0, y0, x1, y1] = values.as_slice() else {
        return Err(WarpError::InputSelection(line.trim().to_string()));
    };
    let (start, end) = (DVec2::new(x0, y0), DVec2::new(x1, y1));
    for p in [start, end] {
        if !domain.contains(p) {
            return Err(WarpError::PointerDomain { x: p.x, y: p.y });
        }
    }
    Ok((start, end))
}

/// Reads one line; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>, CliError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Runs the menu until the user exits or input ends.
pub fn run_menu<R: BufRead, W: Write>(
    catalog: &FieldCatalog,
    options: &MenuOptions,
    input: &mut R,
    out: &mut W,
) -> Result<(), CliError> {
    let domain = Domain::standard();
    loop {
        writeln!(out, "Select a vector field:")?;
        for line in catalog.menu_lines() {
            writeln!(out, "{line}")?;
        }
        write!(out, "Enter the number of the vector field to visualize: ")?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            writeln!(out)?;
            writeln!(out, "Exiting program.")?;
            return Ok(());
        };
        let id = match catalog.parse_selection(&line) {
            Ok(Selection::Exit) => {
                writeln!(out, "Exiting program.")?;
                return Ok(());
            }
            Ok(Selection::Field(id)) => id,
            Err(e) => {
                log::debug!("{e}");
                writeln!(out, "Invalid choice.")?;
                continue;
            }
        };

        let entry = catalog.get(id)?;
        writeln!(out, "{}", entry.title)?;
        let Some((start, end)) = prompt_rectangle(&domain, input, out)? else {
            writeln!(out, "Exiting program.")?;
            return Ok(());
        };

        let outcome = match simulate(catalog, &run_config(id, start, end, options)) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("run of field {id} failed: {e}");
                writeln!(out, "Could not complete run: {e}")?;
                continue;
            }
        };
        writeln!(
            out,
            "{} ticks: centroid ({:.3}, {:.3})",
            outcome.frames, outcome.centroid.x, outcome.centroid.y
        )?;
        if let Some(path) = &outcome.output {
            writeln!(out, "snapshot written to {}", path.display())?;
        }
    }
}

fn prompt_rectangle<R: BufRead, W: Write>(
    domain: &Domain,
    input: &mut R,
    out: &mut W,
) -> Result<Option<(DVec2, DVec2)>, CliError> {
    loop {
        write!(
            out,
            "Enter rectangle corners x0 y0 x1 y1 within [{}, {}]: ",
            domain.min(),
            domain.max()
        )?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            writeln!(out)?;
            return Ok(None);
        };
        match parse_rectangle(&line, domain) {
            Ok(rect) => return Ok(Some(rect)),
            Err(e) => {
                log::debug!("{e}");
                writeln!(out, "Invalid rectangle.")?;
            }
        }
    }
}

fn run_config(id: FieldId, start: DVec2, end: DVec2, options: &MenuOptions) -> RunConfig {
    RunConfig {
        field: id,
        start,
        end,
        ticks: options.ticks,
        params: options.params,
        size: options.size,
        trail: options.trail,
        output: options
            .out_dir
            .as_ref()
            .map(|dir| dir.join(format!("field-{id}.png"))),
    }
}
