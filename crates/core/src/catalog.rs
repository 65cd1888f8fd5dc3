//! The field catalog: a lookup table of named vector fields keyed by a
//! stable display id, plus parsing of menu selections.

use crate::error::WarpError;
use crate::field_source::{
    FieldSource, PointVortex, Radial, Rotation, Saddle, ShearX, SineWave, StretchDrift, Uniform,
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Stable display id of a catalog entry (1-based, as shown in the menu).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId(pub u8);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One catalog entry: id, menu label, formula title and the field itself.
#[derive(Clone)]
pub struct FieldEntry {
    pub id: FieldId,
    /// Short menu label, e.g. `<x,1>`.
    pub label: &'static str,
    /// Plot title, e.g. `F(x, y) = <x, 1>`.
    pub title: &'static str,
    pub source: Arc<dyn FieldSource>,
}

impl fmt::Debug for FieldEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldEntry")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// A parsed menu choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Field(FieldId),
    Exit,
}

/// Immutable table of vector fields, built once and shared read-only.
#[derive(Debug, Clone)]
pub struct FieldCatalog {
    entries: BTreeMap<FieldId, FieldEntry>,
}

impl FieldCatalog {
    /// The eight standard fields with ids 1..=8.
    pub fn standard() -> Self {
        let table: [(u8, &'static str, &'static str, Arc<dyn FieldSource>); 8] = [
            (1, "<1,0>", "F(x, y) = <1, 0>", Arc::new(Uniform)),
            (2, "<x,0>", "F(x, y) = <x, 0>", Arc::new(ShearX)),
            (3, "<x,1>", "F(x, y) = <x, 1>", Arc::new(StretchDrift)),
            (4, "<x,y>", "F(x, y) = <x, y>", Arc::new(Radial)),
            (5, "<-y,x>", "F(x, y) = <-y, x>", Arc::new(Rotation)),
            (6, "<1, sin(x)>", "F(x, y) = <1, sin(x)>", Arc::new(SineWave)),
            (
                7,
                "<-y/(x^2+y^2),x/(x^2+y^2)>",
                "F(x, y) = <-y/(x^2 + y^2), x/(x^2 + y^2)>",
                Arc::new(PointVortex),
            ),
            (8, "<x,-y>", "F(x, y) = <x, -y>", Arc::new(Saddle)),
        ];
        let entries = table
            .into_iter()
            .map(|(id, label, title, source)| {
                let id = FieldId(id);
                (
                    id,
                    FieldEntry {
                        id,
                        label,
                        title,
                        source,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Looks up an entry by id.
    ///
    /// Returns `WarpError::UnknownField` if the id is not in the catalog.
    pub fn get(&self, id: FieldId) -> Result<&FieldEntry, WarpError> {
        self.entries.get(&id).ok_or(WarpError::UnknownField(id.0))
    }

    /// Entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Menu number that exits: one past the highest field id.
    pub fn exit_choice(&self) -> u8 {
        self.entries
            .keys()
            .next_back()
            .map_or(1, |id| id.0.saturating_add(1))
    }

    /// Parses a line of menu input.
    ///
    /// Non-numeric input and numbers that are neither a field id nor the
    /// exit choice yield `WarpError::InputSelection`.
    pub fn parse_selection(&self, input: &str) -> Result<Selection, WarpError> {
        let trimmed = input.trim();
        let choice: u8 = trimmed
            .parse()
            .map_err(|_| WarpError::InputSelection(trimmed.to_string()))?;
        if choice == self.exit_choice() {
            return Ok(Selection::Exit);
        }
        let id = FieldId(choice);
        if self.entries.contains_key(&id) {
            Ok(Selection::Field(id))
        } else {
            Err(WarpError::InputSelection(trimmed.to_string()))
        }
    }

    /// Menu text: one numbered line per field plus the exit line.
    pub fn menu_lines(&self) -> Vec<String> {
        self.iter()
            .map(|e| format!("{}.{}", e.id, e.label))
            .chain(std::iter::once(format!("{}. Exit", self.exit_choice())))
            .collect()
    }
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn standard_catalog_has_eight_fields_in_id_order() {
        let catalog = FieldCatalog::standard();
        assert_eq!(catalog.len(), 8);
        let ids: Vec<u8> = catalog.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn entries_map_to_expected_fields() {
        let catalog = FieldCatalog::standard();
        let p = DVec2::new(2.0, 3.0);
        let expected = [
            (1, DVec2::new(1.0, 0.0)),
            (2, DVec2::new(2.0, 0.0)),
            (3, DVec2::new(2.0, 1.0)),
            (4, DVec2::new(2.0, 3.0)),
            (5, DVec2::new(-3.0, 2.0)),
            (6, DVec2::new(1.0, 2.0_f64.sin())),
            (7, DVec2::new(-3.0 / 13.0, 2.0 / 13.0)),
            (8, DVec2::new(2.0, -3.0)),
        ];
        for (id, want) in expected {
            let got = catalog
                .get(FieldId(id))
                .unwrap()
                .source
                .sample_at(p)
                .unwrap();
            assert!(
                (got - want).length() < 1e-15,
                "field {id}: expected {want}, got {got}"
            );
        }
    }

    #[test]
    fn get_unknown_id_returns_error() {
        let catalog = FieldCatalog::standard();
        assert_eq!(
            catalog.get(FieldId(0)).unwrap_err(),
            WarpError::UnknownField(0)
        );
        assert!(catalog.get(FieldId(9)).is_err());
    }

    #[test]
    fn exit_choice_is_nine() {
        assert_eq!(FieldCatalog::standard().exit_choice(), 9);
    }

    #[test]
    fn parse_selection_accepts_field_ids() {
        let catalog = FieldCatalog::standard();
        assert_eq!(
            catalog.parse_selection("3").unwrap(),
            Selection::Field(FieldId(3))
        );
        assert_eq!(
            catalog.parse_selection("  8\n").unwrap(),
            Selection::Field(FieldId(8))
        );
    }

    #[test]
    fn parse_selection_nine_is_exit() {
        let catalog = FieldCatalog::standard();
        assert_eq!(catalog.parse_selection("9").unwrap(), Selection::Exit);
    }

    #[test]
    fn parse_selection_out_of_range_is_input_error() {
        let catalog = FieldCatalog::standard();
        for input in ["0", "10", "255"] {
            assert!(
                matches!(
                    catalog.parse_selection(input),
                    Err(WarpError::InputSelection(_))
                ),
                "expected InputSelection for {input:?}"
            );
        }
    }

    #[test]
    fn parse_selection_non_numeric_is_recoverable() {
        let catalog = FieldCatalog::standard();
        for input in ["", "abc", "3.5", "-1", "1000"] {
            assert!(
                matches!(
                    catalog.parse_selection(input),
                    Err(WarpError::InputSelection(_))
                ),
                "expected InputSelection for {input:?}"
            );
        }
    }

    #[test]
    fn menu_lines_list_fields_then_exit() {
        let lines = FieldCatalog::standard().menu_lines();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "1.<1,0>");
        assert_eq!(lines[5], "6.<1, sin(x)>");
        assert_eq!(lines[8], "9. Exit");
    }

    #[test]
    fn entry_debug_omits_source() {
        let catalog = FieldCatalog::standard();
        let dbg = format!("{:?}", catalog.get(FieldId(5)).unwrap());
        assert!(dbg.contains("<-y,x>"), "got: {dbg}");
    }
}
