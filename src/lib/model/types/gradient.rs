//! Module implementing the background gradient type.

use serde::{Deserialize, Serialize};

use super::color::Color;


/// Shape of a gradient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    Linear,
    Radial,
}


/// Gradient filling the background of a stamp.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    #[serde(rename = "type")]
    pub kind: GradientKind,
    /// Colors of the gradient stops, evenly spread from start to end.
    pub colors: Vec<Color>,
    /// Direction of a linear gradient in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f32>,
}

impl Gradient {
    #[inline]
    pub fn linear<C: Into<Vec<Color>>>(angle: f32, colors: C) -> Self {
        Gradient{kind: GradientKind::Linear, colors: colors.into(), angle: Some(angle)}
    }

    #[inline]
    pub fn radial<C: Into<Vec<Color>>>(colors: C) -> Self {
        Gradient{kind: GradientKind::Radial, colors: colors.into(), angle: None}
    }
}

impl Gradient {
    /// Angle of the gradient in radians (zero if absent).
    pub fn angle_radians(&self) -> f32 {
        self.angle.unwrap_or(0.0).to_radians()
    }

    /// Color at position `t` along the gradient, where `t` is in [0, 1].
    ///
    /// Returns `None` if the gradient has no stops at all.
    pub fn color_at(&self, t: f32) -> Option<Color> {
        match self.colors.len() {
            0 => None,
            1 => Some(self.colors[0]),
            n => {
                let t = if t.is_finite() { t.max(0.0).min(1.0) } else { 0.0 };
                let segments = (n - 1) as f32;
                let pos = t * segments;
                let index = (pos.floor() as usize).min(n - 2);
                let local = pos - index as f32;
                Some(self.colors[index].lerp(self.colors[index + 1], local))
            }
        }
    }
}
