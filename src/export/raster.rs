//! PNG export of the rendered SVG document.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use super::map_renderer::VIEW_BOX;
use crate::error::{MapError, Result};

/// Options for rasterizing a map.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    /// Pixels per SVG user unit
    pub scale: f32,
    /// Fallback font family for text without a matching system font
    pub font_family: String,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            font_family: "Arial".to_string(),
        }
    }
}

/// Rasterizes an SVG string produced by [`super::map_renderer::MapDocument::to_svg`].
///
/// The document's own background rect paints the backdrop.
///
/// # Errors
///
/// Returns [`MapError::Raster`] if the SVG cannot be parsed, the scale is not
/// positive, or PNG encoding fails.
pub fn render_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    if !(options.scale.is_finite() && options.scale > 0.0) {
        return Err(MapError::Raster(format!(
            "scale must be positive, got {}",
            options.scale
        )));
    }

    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family.clone_from(&options.font_family);

    let tree = usvg::Tree::from_str(svg, &opt)
        .map_err(|e| MapError::Raster(format!("failed to parse SVG: {e}")))?;

    let (_, _, width, height) = VIEW_BOX;
    let width_px = (width as f32 * options.scale).ceil().max(1.0) as u32;
    let height_px = (height as f32 * options.scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px)
        .ok_or_else(|| MapError::Raster("failed to allocate pixmap".to_string()))?;

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(options.scale, options.scale),
        &mut pixmap.as_mut(),
    );

    pixmap
        .encode_png()
        .map_err(|e| MapError::Raster(format!("failed to encode PNG: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::map_renderer::render;
    use crate::models::{MapConfiguration, RegionSet};

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_render_png_signature() {
        let regions = RegionSet::embedded().unwrap();
        let config = MapConfiguration::with_defaults(&regions).unwrap();
        let svg = render(&config, &regions).to_svg();

        let png = render_png(&svg, &RasterOptions::default()).unwrap();

        assert!(png.starts_with(&PNG_SIGNATURE));
    }

    #[test]
    fn test_background_comes_from_document() {
        let regions = RegionSet::embedded().unwrap();
        let mut config = MapConfiguration::with_defaults(&regions).unwrap();
        config.set_background_color("#de2d26");
        let svg = render(&config, &regions).to_svg();

        let options = RasterOptions {
            scale: 0.25,
            ..RasterOptions::default()
        };
        let png = render_png(&svg, &options).unwrap();
        let pixmap = tiny_skia::Pixmap::decode_png(&png).unwrap();

        assert_eq!(pixmap.width(), 300);
        let corner = pixmap.pixel(0, 0).unwrap();
        assert_eq!(
            (corner.red(), corner.green(), corner.blue(), corner.alpha()),
            (0xde, 0x2d, 0x26, 0xff)
        );
    }

    #[test]
    fn test_rejects_non_positive_scale() {
        let options = RasterOptions {
            scale: 0.0,
            ..RasterOptions::default()
        };
        assert!(matches!(
            render_png("<svg/>", &options),
            Err(MapError::Raster(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_svg() {
        assert!(matches!(
            render_png("not svg", &RasterOptions::default()),
            Err(MapError::Raster(_))
        ));
    }
}
