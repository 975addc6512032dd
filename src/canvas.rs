//! Anti-aliased RGBA canvas used to draw a single icon
//!
//! Shapes are rasterized by supersampling each pixel on a regular grid and
//! compositing the covered fraction of the source color over the existing
//! pixel (source-over). A pixel with full coverage takes the exact source
//! color, so solid fills stay bit-exact away from shape edges.

use image::{Rgba, RgbaImage};

/// Subsamples per pixel along each axis
const SAMPLES: u32 = 4;

pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// A point in canvas coordinates, where pixel `(x, y)` spans `[x, x + 1) × [y, y + 1)`
pub type Point = (f32, f32);

/// Axis-aligned rectangle from `(x0, y0)` to `(x1, y1)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    fn contains(&self, (x, y): Point) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    fn inflate(&self, by: f32) -> Rect {
        Rect::new(self.x0 - by, self.y0 - by, self.x1 + by, self.y1 + by)
    }
}

/// Square RGBA buffer, transparent until drawn on
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(size: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(size, size, TRANSPARENT),
        }
    }

    pub fn size(&self) -> u32 {
        self.image.width()
    }

    #[cfg(test)]
    fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Fill a rectangle whose corners are replaced by quarter circles of `radius`.
    /// The radius is clamped to half of the shorter side.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Rgba<u8>) {
        let radius = radius
            .min(rect.width() / 2.0)
            .min(rect.height() / 2.0)
            .max(0.0);

        self.paint(rect, color, |p| in_rounded_rect(p, &rect, radius));
    }

    /// Stroke the polyline through `points` with round joins and round caps
    pub fn stroke_polyline(&mut self, points: &[Point], width: f32, color: Rgba<u8>) {
        let Some(&first) = points.first() else {
            return;
        };
        let half = width / 2.0;

        // A lone point still gets a round dot
        let segments: Vec<(Point, Point)> = if points.len() == 1 {
            vec![(first, first)]
        } else {
            points.windows(2).map(|w| (w[0], w[1])).collect()
        };

        let bounds = points
            .iter()
            .fold(Rect::new(first.0, first.1, first.0, first.1), |r, &(x, y)| {
                Rect::new(r.x0.min(x), r.y0.min(y), r.x1.max(x), r.y1.max(y))
            })
            .inflate(half);

        self.paint(bounds, color, |p| {
            segments
                .iter()
                .any(|&(a, b)| distance_to_segment(p, a, b) <= half)
        });
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Composite `color` over every pixel in `bounds`, weighted by the share
    /// of subsamples for which `covers` holds
    fn paint<F>(&mut self, bounds: Rect, color: Rgba<u8>, covers: F)
    where
        F: Fn(Point) -> bool,
    {
        let size = self.size();
        let x_start = bounds.x0.floor().max(0.0) as u32;
        let y_start = bounds.y0.floor().max(0.0) as u32;
        let x_end = (bounds.x1.ceil().max(0.0) as u32).min(size);
        let y_end = (bounds.y1.ceil().max(0.0) as u32).min(size);

        let step = 1.0 / SAMPLES as f32;
        let total = (SAMPLES * SAMPLES) as f32;

        for y in y_start..y_end {
            for x in x_start..x_end {
                let mut hits = 0u32;
                for sy in 0..SAMPLES {
                    for sx in 0..SAMPLES {
                        let px = x as f32 + (sx as f32 + 0.5) * step;
                        let py = y as f32 + (sy as f32 + 0.5) * step;
                        if covers((px, py)) {
                            hits += 1;
                        }
                    }
                }

                if hits > 0 {
                    blend(self.image.get_pixel_mut(x, y), color, hits as f32 / total);
                }
            }
        }
    }
}

fn in_rounded_rect(p: Point, rect: &Rect, radius: f32) -> bool {
    if !rect.contains(p) {
        return false;
    }

    // Distance past the inner rectangle the corner arcs are centered on
    let dx = (rect.x0 + radius - p.0).max(p.0 - (rect.x1 - radius)).max(0.0);
    let dy = (rect.y0 + radius - p.1).max(p.1 - (rect.y1 - radius)).max(0.0);

    dx * dx + dy * dy <= radius * radius
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let len_sq = abx * abx + aby * aby;

    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len_sq).clamp(0.0, 1.0)
    };

    let cx = a.0 + t * abx;
    let cy = a.1 + t * aby;
    ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

/// Source-over compositing of `src` scaled by `coverage` onto `dst`
fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>, coverage: f32) {
    let src_a = src[3] as f32 / 255.0 * coverage;
    if src_a <= 0.0 {
        return;
    }

    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    for c in 0..3 {
        let value = (src[c] as f32 * src_a + dst[c] as f32 * dst_a * (1.0 - src_a)) / out_a;
        dst[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}
