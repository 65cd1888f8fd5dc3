//! PNG snapshots of a rendered [`Pixmap`].
//!
//! Feature-gated behind `png` (default on) so headless consumers can depend
//! on the raster crate without pulling in the `image` crate.

use field_warp_core::error::WarpError;
use std::path::Path;
use tiny_skia::Pixmap;

/// Unpremultiplied RGBA8 bytes of `pixmap`, row-major.
pub fn rgba(pixmap: &Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect()
}

/// Writes a pixmap as a PNG image.
///
/// Returns `WarpError::Io` naming `path` on write failure.
pub fn write_png(pixmap: &Pixmap, path: &Path) -> Result<(), WarpError> {
    let (w, h) = (pixmap.width(), pixmap.height());
    let img = image::RgbaImage::from_raw(w, h, rgba(pixmap))
        .ok_or_else(|| WarpError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path)
        .map_err(|e| WarpError::Io(format!("{}: {e}", path.display())))?;
    log::info!("wrote {}x{} snapshot to {}", w, h, path.display());
    Ok(())
}
