// instrscope - render/png.rs
//
// SVG -> PNG rasterisation with resvg.
//
// System fonts are loaded into usvg's font database so the caption, axis
// labels and legend render as text. Without any fonts installed the lines
// and axes still render; only text is missing.

use crate::util::error::RenderError;
use resvg::{tiny_skia, usvg};
use std::sync::Arc;

/// Rasterise an SVG document to PNG bytes at `width` x `height` pixels.
pub fn rasterise(svg: &str, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
    // usvg 0.44: fontdb lives inside Options as an Arc<Database>.
    let mut opt = usvg::Options::default();
    Arc::make_mut(&mut opt.fontdb).load_system_fonts();

    let tree = usvg::Tree::from_data(svg.as_bytes(), &opt).map_err(|e| RenderError::Rasterise {
        reason: e.to_string(),
    })?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| RenderError::Rasterise {
        reason: format!("cannot allocate a {width}x{height} pixmap"),
    })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    let png = pixmap.encode_png().map_err(|e| RenderError::Rasterise {
        reason: e.to_string(),
    })?;

    tracing::debug!(width, height, bytes = png.len(), "PNG rasterised");
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    #[test]
    fn test_rasterise_produces_png() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20" viewBox="0 0 40 20">
            <polyline fill="none" stroke="rgb(31,119,180)" stroke-width="2" points="0,20 20,0 40,10"/>
        </svg>"#;
        let png = rasterise(svg, 80, 40).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_rasterise_rejects_garbage() {
        assert!(matches!(
            rasterise("not an svg", 10, 10),
            Err(RenderError::Rasterise { .. })
        ));
    }

    #[test]
    fn test_rasterise_rejects_zero_size() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#;
        assert!(rasterise(svg, 0, 10).is_err());
    }
}
