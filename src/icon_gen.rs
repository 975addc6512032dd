//! Badge icon layout, rendering and the extension's fixed icon set

use crate::canvas::{Canvas, Point, Rect};
use crate::error::{IconError, Result};
use anyhow::Context;
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, Rgba, RgbaImage,
};
use serde::Deserialize;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    str::FromStr,
};

/// Directory the icon set is written to, relative to the working directory
pub const ICON_DIR: &str = "grammar-checker/icons";

/// Smallest size whose padding and stroke width (`size / 8`) are non-zero
pub const MIN_SIZE: u32 = 8;

/// Badge fill, Google Docs blue
pub const BADGE_COLOR: &str = "#4285F4";

/// Checkmark stroke
pub const CHECK_COLOR: &str = "#ffffff";

/// Checkmark vertices as fractions of the icon size, drawn in order
const CHECK_POINTS: [Point; 3] = [(0.30, 0.50), (0.45, 0.65), (0.70, 0.35)];

const ICON_SET_JSON: &str = r#"
[
  { "size": 16, "filename": "icon16.png" },
  { "size": 48, "filename": "icon48.png" },
  { "size": 128, "filename": "icon128.png" }
]
"#;

/// One icon of the extension's toolbar set
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IconEntry {
    pub size: u32,
    pub filename: String,
}

/// The fixed icon set, in generation order
pub fn icon_set() -> anyhow::Result<Vec<IconEntry>> {
    serde_json::from_str(ICON_SET_JSON).context("Embedded icon set table is malformed")
}

/// Badge geometry for a given icon size
///
/// Padding, corner radius and stroke width use integer division of the size,
/// the checkmark vertices are fractional.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeLayout {
    pub size: u32,
    pub padding: u32,
    pub corner_radius: u32,
    pub stroke_width: u32,
    pub check: [Point; 3],
}

impl BadgeLayout {
    pub fn for_size(size: u32) -> Result<Self> {
        if size < MIN_SIZE {
            return Err(IconError::InvalidSize(size));
        }

        let s = size as f32;
        Ok(Self {
            size,
            padding: size / 8,
            corner_radius: size / 4,
            stroke_width: size / 8,
            check: CHECK_POINTS.map(|(fx, fy)| (fx * s, fy * s)),
        })
    }

    /// Badge bounds, from `(padding, padding)` to `(size - padding, size - padding)`
    pub fn badge_rect(&self) -> Rect {
        let near = self.padding as f32;
        let far = (self.size - self.padding) as f32;
        Rect::new(near, near, far, far)
    }
}

/// Generate one badge icon of `size` pixels and write it to `destination` as PNG.
///
/// Any existing file is overwritten. The parent directory must already exist.
pub fn generate(size: u32, destination: impl AsRef<Path>) -> Result<()> {
    let destination = destination.as_ref();
    let layout = BadgeLayout::for_size(size)?;

    let image = render(&layout)?;
    write_png(&image, destination)?;

    println!("✓ Generated {}", destination.display());
    Ok(())
}

/// Draw the badge and checkmark for `layout` onto a fresh transparent canvas
pub fn render(layout: &BadgeLayout) -> Result<RgbaImage> {
    let badge_color = css_to_rgba(BADGE_COLOR)?;
    let check_color = css_to_rgba(CHECK_COLOR)?;

    let mut canvas = Canvas::new(layout.size);
    canvas.fill_rounded_rect(layout.badge_rect(), layout.corner_radius as f32, badge_color);
    canvas.stroke_polyline(&layout.check, layout.stroke_width as f32, check_color);

    Ok(canvas.into_image())
}

/// Generate every icon of the fixed set into `out_dir`, stopping at the first failure
pub fn generate_icons(out_dir: &Path) -> anyhow::Result<()> {
    println!("Generating extension icons...");

    for entry in icon_set()? {
        generate(entry.size, out_dir.join(&entry.filename))
            .with_context(|| format!("Can't generate {}", entry.filename))?;
    }

    Ok(())
}

fn css_to_rgba(color: &str) -> Result<Rgba<u8>> {
    css_color::Srgb::from_str(color)
        .map(|parsed| {
            Rgba([
                (parsed.red * 255.).round() as u8,
                (parsed.green * 255.).round() as u8,
                (parsed.blue * 255.).round() as u8,
                (parsed.alpha * 255.).round() as u8,
            ])
        })
        .map_err(|_| IconError::InvalidColor(color.to_string()))
}

// Encode image data as PNG with compression
fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let io_error = |source: std::io::Error| IconError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut out_file = BufWriter::new(File::create(path).map_err(io_error)?);
    let encoder = PngEncoder::new_with_quality(
        &mut out_file,
        CompressionType::Best,
        PngFilterType::Adaptive,
    );
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ColorType::Rgba8,
        )
        .map_err(|source| IconError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    out_file.flush().map_err(io_error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BLUE: Rgba<u8> = Rgba([0x42, 0x85, 0xF4, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn layout_uses_integer_division() {
        let small = BadgeLayout::for_size(16).unwrap();
        assert_eq!(small.padding, 2);
        assert_eq!(small.corner_radius, 4);
        assert_eq!(small.stroke_width, 2);
        assert_eq!(small.badge_rect(), Rect::new(2.0, 2.0, 14.0, 14.0));
        assert_eq!(small.badge_rect().width(), 12.0);

        let medium = BadgeLayout::for_size(48).unwrap();
        assert_eq!(medium.stroke_width, 6);
        assert_eq!(medium.corner_radius, 12);

        let large = BadgeLayout::for_size(128).unwrap();
        assert_eq!(large.padding, 16);
        assert_eq!(large.corner_radius, 32);
    }

    #[test]
    fn checkmark_vertices_scale_with_size() {
        let layout = BadgeLayout::for_size(100).unwrap();
        let expected = [(30.0, 50.0), (45.0, 65.0), (70.0, 35.0)];

        for (actual, expected) in layout.check.iter().zip(expected) {
            assert!((actual.0 - expected.0).abs() < 1e-4);
            assert!((actual.1 - expected.1).abs() < 1e-4);
        }
    }

    #[test]
    fn sizes_below_minimum_are_rejected() {
        assert!(matches!(
            BadgeLayout::for_size(0),
            Err(IconError::InvalidSize(0))
        ));
        assert!(matches!(
            BadgeLayout::for_size(7),
            Err(IconError::InvalidSize(7))
        ));
        assert!(BadgeLayout::for_size(MIN_SIZE).is_ok());
    }

    #[test]
    fn icon_set_is_the_three_toolbar_sizes() {
        let set = icon_set().unwrap();
        let pairs: Vec<(u32, &str)> = set.iter().map(|e| (e.size, e.filename.as_str())).collect();
        assert_eq!(
            pairs,
            vec![(16, "icon16.png"), (48, "icon48.png"), (128, "icon128.png")]
        );
    }

    #[test]
    fn colors_parse_exactly() {
        assert_eq!(css_to_rgba(BADGE_COLOR).unwrap(), BLUE);
        assert_eq!(css_to_rgba(CHECK_COLOR).unwrap(), WHITE);
    }

    #[test]
    fn unparseable_color_is_an_error() {
        let err = css_to_rgba("#42g5f4").unwrap_err();
        assert!(
            matches!(&err, IconError::InvalidColor(c) if c == "#42g5f4"),
            "got {err:?}"
        );
    }

    #[test]
    fn rendered_badge_has_expected_pixels() {
        for size in [16, 48, 128] {
            let image = render(&BadgeLayout::for_size(size).unwrap()).unwrap();
            assert_eq!(image.dimensions(), (size, size));

            let last = size - 1;
            for (x, y) in [(0, 0), (last, 0), (0, last), (last, last)] {
                assert_eq!(image.get_pixel(x, y)[3], 0, "corner ({x}, {y}) at size {size}");
            }

            assert_eq!(*image.get_pixel(size / 2, size / 4), BLUE, "badge at size {size}");

            let vertex_x = (size as f32 * 0.45) as u32;
            let vertex_y = (size as f32 * 0.65) as u32;
            assert_eq!(
                *image.get_pixel(vertex_x, vertex_y),
                WHITE,
                "checkmark vertex at size {size}"
            );
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let layout = BadgeLayout::for_size(48).unwrap();
        assert_eq!(render(&layout).unwrap(), render(&layout).unwrap());
    }

    #[test]
    fn generate_writes_decodable_png() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("icon48.png");

        generate(48, &path).unwrap();

        let decoded = image::open(&path).expect("Generated file should decode");
        assert_eq!(decoded.width(), 48);
        assert_eq!(decoded.height(), 48);
        assert_eq!(decoded.color(), ColorType::Rgba8);
    }

    #[test]
    fn generate_overwrites_existing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("icon16.png");
        std::fs::write(&path, b"not a png").unwrap();

        generate(16, &path).unwrap();
        let first = std::fs::read(&path).unwrap();
        generate(16, &path).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(image::open(&path).unwrap().width(), 16);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("missing").join("icon16.png");

        let err = generate(16, &path).unwrap_err();
        assert!(matches!(err, IconError::Io { .. }), "got {err:?}");
        assert!(!path.exists());
    }

    #[test]
    fn invalid_size_writes_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("icon4.png");

        assert!(matches!(generate(4, &path), Err(IconError::InvalidSize(4))));
        assert!(!path.exists());
    }

    #[test]
    fn generate_icons_writes_whole_set() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        generate_icons(temp_dir.path()).unwrap();

        for entry in icon_set().unwrap() {
            let icon = image::open(temp_dir.path().join(&entry.filename)).unwrap();
            assert_eq!(icon.width(), entry.size);
        }
    }

    #[test]
    fn generate_icons_stops_on_first_failure() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("missing");

        let err = generate_icons(&missing).unwrap_err();
        assert!(err.to_string().contains("icon16.png"));
        assert!(err.downcast_ref::<IconError>().is_some());
    }
}
