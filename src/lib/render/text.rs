//! Module responsible for rendering text.

use std::fmt;

use image::{imageops, GrayImage, Luma, Pixel, RgbaImage};
use rusttype::{point, PositionedGlyph, Rect, Scale};

use crate::model::Color;
use crate::model::constants::LINE_HEIGHT_FACTOR;
use crate::resources::Font;


/// Opacity of the drop shadow.
const SHADOW_ALPHA: f32 = 0.3;
/// Standard deviation of the drop shadow's blur, in image pixels.
const SHADOW_SIGMA: f32 = 5.0;
/// Vertical offset of the drop shadow, in image pixels.
const SHADOW_OFFSET_Y: i32 = 2;
/// Margin around the glyphs wide enough to hold the blurred shadow.
const SHADOW_MARGIN: i32 = 3 * SHADOW_SIGMA as i32 + SHADOW_OFFSET_Y;


/// Style that the text is rendered with.
pub struct Style<'f> {
    font: &'f Font,
    /// Size of the em square, in image pixels.
    size: f32,
    color: Color,
}

impl<'f> Style<'f> {
    #[inline]
    pub fn new(font: &'f Font, size: f32, color: Color) -> Self {
        Style{font, size, color}
    }

    /// Scale for rusttype which makes the em square `size` pixels tall.
    ///
    /// rusttype measures its scale by the ascent-to-descent height
    /// rather than by the em square, so it has to be converted.
    /// Returns `None` if the font metrics are unusable.
    pub fn scale(&self) -> Option<Scale> {
        let units_per_em = self.font.units_per_em() as f32;
        let unscaled = self.font.v_metrics_unscaled();
        let height = unscaled.ascent - unscaled.descent;
        if units_per_em <= 0.0 || height <= 0.0 || !self.size.is_finite() || self.size <= 0.0 {
            return None;
        }
        Some(Scale::uniform(self.size * height / units_per_em))
    }
}

impl<'f> fmt::Debug for Style<'f> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Style")
            .field("font", &self.font.name())
            .field("size", &self.size)
            .field("color", &self.color)
            .finish()
    }
}


/// Placement of a block of text lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Horizontal center of every line.
    pub center_x: f32,
    /// Vertical center of the whole block.
    pub center_y: f32,
}

/// Vertical centers of the lines of a block, top to bottom.
pub fn line_centers(count: usize, size: f32, center_y: f32) -> Vec<f32> {
    let line_height = size * LINE_HEIGHT_FACTOR;
    let total = line_height * count as f32;
    let first = center_y - total / 2.0 + line_height / 2.0;
    (0..count).map(|i| first + i as f32 * line_height).collect()
}


/// Renders lines of text onto given image, each with a drop shadow.
///
/// All coordinates are in image pixels.
/// Returns `false` if the font cannot be scaled to the requested size.
pub fn render_lines(img: &mut RgbaImage, lines: &[&str],
                    placement: Placement, style: &Style) -> bool {
    trace!("render_lines(..., <{} line(s)>, {:?}, {:?})", lines.len(), placement, style);
    let scale = match style.scale() {
        Some(s) => s,
        None => return false,
    };

    let centers = line_centers(lines.len(), style.size, placement.center_y);
    for (line, center_y) in lines.iter().zip(centers) {
        render_line(img, line, point(placement.center_x, center_y), scale, style);
    }
    true
}

/// Renders a single line of text, centered on given point.
fn render_line(img: &mut RgbaImage, s: &str, center: rusttype::Point<f32>,
               scale: Scale, style: &Style) {
    if s.trim().is_empty() {
        trace!("Blank line, skipping.");
        return;
    }

    // Center the em box vertically on the line's center.
    let v_metrics = style.font.v_metrics(scale);
    let baseline = center.y + (v_metrics.ascent + v_metrics.descent) / 2.0;
    let width = text_width(s, style.font, scale);
    let origin = point(center.x - width / 2.0, baseline);
    trace!("Line {:?} is {} px wide, baseline at {}", s, width, baseline);

    let glyphs: Vec<_> = style.font.layout(s, scale, origin).collect();
    // Only the part of the text that can affect the image is rasterized.
    let clip = Rect{
        min: point(-SHADOW_MARGIN, -SHADOW_MARGIN),
        max: point(img.width() as i32 + SHADOW_MARGIN, img.height() as i32 + SHADOW_MARGIN),
    };
    let bounds = match glyph_bounds(&glyphs).and_then(|b| intersect(b, clip)) {
        Some(b) => b,
        None => {
            trace!("Line {:?} lies outside of the image, skipping.", s);
            return;
        }
    };

    // Coverage mask of the glyphs, with room around them for the shadow.
    let (mask_x, mask_y) = (bounds.min.x - SHADOW_MARGIN, bounds.min.y - SHADOW_MARGIN);
    let mask_w = (bounds.width() + 2 * SHADOW_MARGIN) as u32;
    let mask_h = (bounds.height() + 2 * SHADOW_MARGIN) as u32;
    let mut mask = GrayImage::new(mask_w, mask_h);
    for glyph in &glyphs {
        let bbox = match glyph.pixel_bounding_box() {
            Some(bb) if intersect(bb, bounds).is_some() => bb,
            _ => continue,
        };
        glyph.draw(|x, y, v| {
            let x = bbox.min.x + x as i32 - mask_x;
            let y = bbox.min.y + y as i32 - mask_y;
            if x >= 0 && y >= 0 && (x as u32) < mask_w && (y as u32) < mask_h {
                let coverage = (v.max(0.0).min(1.0) * 255.0).round() as u8;
                let pixel = mask.get_pixel_mut(x as u32, y as u32);
                pixel[0] = pixel[0].max(coverage);
            }
        });
    }

    let shadow = imageops::blur(&mask, SHADOW_SIGMA);
    composite(img, &shadow, (mask_x, mask_y + SHADOW_OFFSET_Y), Color::black(), SHADOW_ALPHA);
    composite(img, &mask, (mask_x, mask_y), style.color, 1.0);
}

/// Blend a solid color onto the image through a coverage mask
/// placed at given offset.
fn composite(img: &mut RgbaImage, mask: &GrayImage, (ox, oy): (i32, i32),
             color: Color, opacity: f32) {
    let (img_w, img_h) = (img.width() as i32, img.height() as i32);
    for (x, y, &Luma([coverage])) in mask.enumerate_pixels() {
        if coverage == 0 {
            continue;
        }
        let (ix, iy) = (ox + x as i32, oy + y as i32);
        if ix < 0 || iy < 0 || ix >= img_w || iy >= img_h {
            continue;
        }
        let alpha = (coverage as f32 * opacity).round().min(255.0) as u8;
        img.get_pixel_mut(ix as u32, iy as u32).blend(&color.to_rgba(alpha));
    }
}


// Utility functions

/// Compute the pixel width of given text.
pub fn text_width(s: &str, font: &Font, scale: Scale) -> f32 {
    let glyphs: Vec<_> = font.layout(s, scale, point(0.0, 0.0)).collect();
    glyphs.last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Union of the pixel bounding boxes of all the glyphs.
fn glyph_bounds(glyphs: &[PositionedGlyph]) -> Option<Rect<i32>> {
    glyphs.iter()
        .filter_map(|g| g.pixel_bounding_box())
        .fold(None, |acc: Option<Rect<i32>>, bb| Some(match acc {
            None => bb,
            Some(r) => Rect{
                min: point(r.min.x.min(bb.min.x), r.min.y.min(bb.min.y)),
                max: point(r.max.x.max(bb.max.x), r.max.y.max(bb.max.y)),
            },
        }))
}

/// Common part of two rectangles, if they overlap.
fn intersect(a: Rect<i32>, b: Rect<i32>) -> Option<Rect<i32>> {
    let min = point(a.min.x.max(b.min.x), a.min.y.max(b.min.y));
    let max = point(a.max.x.min(b.max.x), a.max.y.min(b.max.y));
    if min.x < max.x && min.y < max.y { Some(Rect{min, max}) } else { None }
}


#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use spectral::prelude::*;
    use crate::model::Color;
    use crate::resources::Font;
    use super::{line_centers, render_lines, text_width, Placement, Style};

    fn assert_close(actual: &[f32], expected: &[f32]) {
        assert_that!(actual.len()).is_equal_to(expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-3, "{} != {}", a, e);
        }
    }

    #[test]
    fn line_layout() {
        assert_close(&line_centers(1, 48.0, 300.0), &[300.0]);
        // Three lines of 60px each, centered on 300.
        assert_close(&line_centers(3, 50.0, 300.0), &[240.0, 300.0, 360.0]);
        assert_close(&line_centers(2, 50.0, 100.0), &[70.0, 130.0]);
    }

    #[test]
    fn em_box_scale() {
        let font = Font::builtin().unwrap();
        let style = Style::new(&font, 48.0, Color::white());
        let scale = style.scale().unwrap();
        // DejaVu's ascent-to-descent height exceeds its em square.
        assert_that!(scale.y).is_greater_than(48.0);
        assert_that!(Style::new(&font, 0.0, Color::white()).scale()).is_none();
    }

    #[test]
    fn width_grows_with_text() {
        let font = Font::builtin().unwrap();
        let scale = Style::new(&font, 48.0, Color::white()).scale().unwrap();
        let short = text_width("LG", &font, scale);
        let long = text_width("LGTM", &font, scale);
        assert_that!(short).is_greater_than(0.0);
        assert_that!(long).is_greater_than(short);
        assert_that!(text_width("", &font, scale)).is_equal_to(0.0);
    }

    #[test]
    fn draws_text_and_shadow() {
        let font = Font::builtin().unwrap();
        let mut img = RgbaImage::from_pixel(200, 100, Rgba([0, 0, 255, 255]));
        let drawn = render_lines(&mut img, &["LGTM"],
            Placement{center_x: 100.0, center_y: 50.0},
            &Style::new(&font, 40.0, Color::white()));
        assert_that!(drawn).is_true();

        let white = img.pixels().filter(|p| p[0] > 200 && p[1] > 200).count();
        assert_that!(white).is_greater_than(50);
        // The shadow darkens some of the background.
        let shaded = img.pixels().filter(|p| p[0] == 0 && p[2] < 255).count();
        assert_that!(shaded).is_greater_than(0);
        // Corners are far from the text.
        assert_that!(*img.get_pixel(0, 0)).is_equal_to(Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn oversized_text_is_clipped() {
        let font = Font::builtin().unwrap();
        let mut img = RgbaImage::from_pixel(40, 20, Rgba([0, 0, 255, 255]));
        let drawn = render_lines(&mut img, &["LGTM LGTM LGTM"],
            Placement{center_x: 20.0, center_y: 10.0},
            &Style::new(&font, 400.0, Color::white()));
        assert_that!(drawn).is_true();
        assert_that!(img.dimensions()).is_equal_to((40, 20));
    }

    #[test]
    fn text_far_off_the_image() {
        let font = Font::builtin().unwrap();
        let mut img = RgbaImage::from_pixel(40, 20, Rgba([0, 0, 255, 255]));
        let drawn = render_lines(&mut img, &["LGTM"],
            Placement{center_x: 5000.0, center_y: -5000.0},
            &Style::new(&font, 40.0, Color::white()));
        assert_that!(drawn).is_true();
        assert_that!(img.pixels().all(|p| *p == Rgba([0, 0, 255, 255]))).is_true();
    }
}
