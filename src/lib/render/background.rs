//! Module responsible for painting the stamp background.

use image::{Rgba, RgbaImage};

use crate::model::{Color, Gradient, GradientKind};


/// Fill of the background.
#[derive(Clone, Copy, Debug)]
pub enum Fill<'g> {
    Solid(Color),
    Gradient(&'g Gradient),
}

impl<'g> Fill<'g> {
    /// Pick the fill: the gradient when there is one, the plain color otherwise.
    pub fn new(gradient: Option<&'g Gradient>, color: Color) -> Self {
        match gradient {
            // Degenerate gradients are just a solid color.
            Some(g) if g.colors.is_empty() => Fill::Solid(color),
            Some(g) if g.colors.len() == 1 => Fill::Solid(g.colors[0]),
            Some(g) => Fill::Gradient(g),
            None => Fill::Solid(color),
        }
    }
}


/// Paint the whole image with given fill.
///
/// `scale` is the ratio of image pixels to logical pixels
/// which the gradient geometry is expressed in.
pub fn paint(img: &mut RgbaImage, fill: Fill, scale: f32) {
    let gradient = match fill {
        Fill::Solid(color) => {
            trace!("Painting solid {} background", color);
            let pixel: Rgba<u8> = color.into();
            for p in img.pixels_mut() {
                *p = pixel;
            }
            return;
        }
        Fill::Gradient(gradient) => gradient,
    };

    let width = img.width() as f32 / scale;
    let height = img.height() as f32 / scale;
    trace!("Painting {:?} gradient with {} stops over {}x{} logical pixels",
        gradient.kind, gradient.colors.len(), width, height);
    let geometry = Geometry::new(gradient, width, height);

    for (x, y, p) in img.enumerate_pixels_mut() {
        // Sample at the pixel's center, in logical coordinates.
        let lx = (x as f32 + 0.5) / scale;
        let ly = (y as f32 + 0.5) / scale;
        let t = geometry.parameter(lx, ly);
        if let Some(color) = gradient.color_at(t) {
            *p = color.into();
        }
    }
}


/// Precomputed shape of a gradient over a rectangle.
#[derive(Clone, Copy, Debug)]
enum Geometry {
    /// Gradient along the axis from `start` by the vector `dir`.
    Linear { start: (f32, f32), dir: (f32, f32), len_sq: f32 },
    /// Gradient from `center` outwards, reaching the end at `radius`.
    Radial { center: (f32, f32), radius: f32 },
}

impl Geometry {
    fn new(gradient: &Gradient, width: f32, height: f32) -> Self {
        let (cx, cy) = (width / 2.0, height / 2.0);
        match gradient.kind {
            GradientKind::Linear => {
                let angle = gradient.angle_radians();
                let (dx, dy) = (angle.cos() * width / 2.0, angle.sin() * height / 2.0);
                let start = (cx - dx, cy - dy);
                let dir = (2.0 * dx, 2.0 * dy);
                Geometry::Linear{start, dir, len_sq: dir.0 * dir.0 + dir.1 * dir.1}
            }
            GradientKind::Radial => Geometry::Radial{
                center: (cx, cy),
                radius: width.max(height) / 2.0,
            },
        }
    }

    /// Position along the gradient for given point, in [0, 1].
    fn parameter(&self, x: f32, y: f32) -> f32 {
        let t = match *self {
            Geometry::Linear{start, dir, len_sq} => {
                if len_sq <= 0.0 {
                    return 0.0;
                }
                ((x - start.0) * dir.0 + (y - start.1) * dir.1) / len_sq
            }
            Geometry::Radial{center, radius} => {
                if radius <= 0.0 {
                    return 0.0;
                }
                let (dx, dy) = (x - center.0, y - center.1);
                (dx * dx + dy * dy).sqrt() / radius
            }
        };
        t.max(0.0).min(1.0)
    }
}
