//! Multi-color gradient around the ring
//!
//! Positions are normalized: `0.0` is the lead, values approaching `1.0`
//! are furthest behind it. With two colors the gradient runs from the first
//! at the lead to the second at the tail. With three colors the ring is cut
//! into three equal arcs blending first→second, second→third and
//! third→first, so the pattern closes on itself without a seam.

use super::{HsvColor, Palette};

/// Number of arcs used by the three-color gradient
const ARC_COUNT: usize = 3;

/// Blend two colors, `t = 0.0` giving `from`
///
/// A black or gray endpoint takes the other endpoint's hue first, so a
/// fade to black does not sweep through unrelated hues on the way.
pub fn blend_hsv(from: HsvColor, to: HsvColor, t: f32) -> HsvColor {
    let mut from = from;
    let mut to = to;
    if to.is_achromatic() {
        to.hue = from.hue;
    }
    if from.is_achromatic() {
        from.hue = to.hue;
    }
    from.lerp(to, t)
}

/// Normalized position of a logical offset on a ring of `len` elements
#[allow(clippy::cast_precision_loss)]
pub fn normalized_position(offset: usize, len: usize) -> f32 {
    if len == 0 {
        return 0.0;
    }
    (offset % len) as f32 / len as f32
}

/// Split a position into its three-color arc and the progress within it
///
/// Arc boundaries belong to the arc that starts there.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn arc_of(position: f32) -> (usize, f32) {
    let scaled = clamp_position(position) * ARC_COUNT as f32;
    let arc = (libm::floorf(scaled) as usize).min(ARC_COUNT - 1);
    let local = scaled - arc as f32;
    (arc, local)
}

fn clamp_position(position: f32) -> f32 {
    if position.is_nan() {
        return 0.0;
    }
    position.clamp(0.0, 1.0)
}

/// Gradient along one pair of colors, `lead` at position 0
///
/// The fade factor runs from 1 at the lead to 0 at the tail.
pub fn pair_gradient(lead: HsvColor, tail: HsvColor, position: f32) -> HsvColor {
    let fade = 1.0 - clamp_position(position);
    blend_hsv(tail, lead, fade)
}

/// Computes blended palette colors at positions along the ring
#[derive(Debug, Clone, Copy)]
pub struct GradientCompositor<'a> {
    palette: &'a Palette,
}

impl<'a> GradientCompositor<'a> {
    pub const fn new(palette: &'a Palette) -> Self {
        Self { palette }
    }

    /// Color at a normalized position behind the lead
    pub fn color_at(&self, position: f32) -> HsvColor {
        Self::blend_active(&self.palette.active(), position)
    }

    fn blend_active(colors: &[HsvColor], position: f32) -> HsvColor {
        match colors {
            [] => HsvColor::BLACK,
            [only] => *only,
            [lead, tail] => pair_gradient(*lead, *tail, position),
            [first, second, third, ..] => {
                let (arc, local) = arc_of(position);
                let (lead, tail) = match arc {
                    0 => (*first, *second),
                    1 => (*second, *third),
                    _ => (*third, *first),
                };
                pair_gradient(lead, tail, local)
            }
        }
    }

    /// Color at a logical offset on a ring of `len` elements
    pub fn color_at_offset(&self, offset: usize, len: usize) -> HsvColor {
        self.color_at(normalized_position(offset, len))
    }

    /// Fill `shades[offset]` with the color for every logical offset
    pub fn fill_by_offset(&self, shades: &mut [HsvColor]) {
        let colors = self.palette.active();
        let len = shades.len();
        for (offset, shade) in shades.iter_mut().enumerate() {
            *shade = Self::blend_active(&colors, normalized_position(offset, len));
        }
    }
}
