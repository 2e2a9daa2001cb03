//! HSV color model with a 16-bit wrapped hue
//!
//! A full turn of the color wheel is 65536 hue units, so hue arithmetic
//! wraps for free and can never leave its canonical range. Conversion to
//! degrees or to the 8-bit hue of `smart_leds` happens only at the edges.

use smart_leds::hsv::Hsv as SmartHsv;

use super::Rgb;

const HUE_TURN: f32 = 65_536.0;
const HALF_TURN: i32 = 32_768;

/// Position on the color wheel, 65536 units per turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Hue(pub u16);

impl Hue {
    pub const RED: Self = Self(0);

    /// Build a hue from degrees; any finite value is wrapped onto the wheel
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_degrees(degrees: f32) -> Self {
        if !degrees.is_finite() {
            return Self::RED;
        }
        let mut wrapped = libm::fmodf(degrees, 360.0);
        if wrapped < 0.0 {
            wrapped += 360.0;
        }
        let units = libm::roundf(wrapped * HUE_TURN / 360.0) as u32;
        Self(units as u16)
    }

    /// Hue in degrees, `[0, 360)`
    pub fn degrees(self) -> f32 {
        f32::from(self.0) * 360.0 / HUE_TURN
    }

    /// 8-bit hue used by `smart_leds` and most LED driver crates
    #[allow(clippy::cast_possible_truncation)]
    pub const fn to_u8(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Signed distance to `other` along the shorter arc, in hue units
    ///
    /// The result lies in `(-32768, 32768]`: exactly opposite hues resolve
    /// to the positive direction.
    pub const fn shortest_delta(self, other: Self) -> i32 {
        #[allow(clippy::cast_possible_wrap)]
        let delta = other.0.wrapping_sub(self.0) as i16 as i32;
        if delta == -HALF_TURN { HALF_TURN } else { delta }
    }
}

/// HSV color with 8-bit saturation and value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct HsvColor {
    pub hue: Hue,
    pub sat: u8,
    pub val: u8,
}

impl HsvColor {
    pub const BLACK: Self = Self {
        hue: Hue::RED,
        sat: 0,
        val: 0,
    };

    pub const fn new(hue: Hue, sat: u8, val: u8) -> Self {
        Self { hue, sat, val }
    }

    /// Colors with no value or no saturation carry no meaningful hue
    pub const fn is_achromatic(self) -> bool {
        self.val == 0 || self.sat == 0
    }

    /// Blend towards `other`; hue along the short arc, the rest linearly
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            hue: hue_lerp(self.hue, other.hue, t),
            sat: linear_lerp(self.sat, other.sat, t),
            val: linear_lerp(self.val, other.val, t),
        }
    }

    #[must_use]
    pub const fn with_val(self, val: u8) -> Self {
        Self {
            hue: self.hue,
            sat: self.sat,
            val,
        }
    }
}

impl From<HsvColor> for SmartHsv {
    fn from(color: HsvColor) -> Self {
        Self {
            hue: color.hue.to_u8(),
            sat: color.sat,
            val: color.val,
        }
    }
}

fn clamp_unit(t: f32) -> f32 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// Interpolate two hues along the shorter path around the wheel
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn hue_lerp(a: Hue, b: Hue, t: f32) -> Hue {
    let delta = a.shortest_delta(b) as f32;
    let moved = libm::roundf(delta * clamp_unit(t)) as i32;
    let units = (i32::from(a.0) + moved).rem_euclid(1 << 16);
    Hue(units as u16)
}

/// Plain scalar interpolation for saturation and value channels
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn linear_lerp(a: u8, b: u8, t: f32) -> u8 {
    let a_f = f32::from(a);
    let b_f = f32::from(b);
    libm::roundf(a_f + (b_f - a_f) * clamp_unit(t)).clamp(0.0, 255.0) as u8
}

/// Convert RGB to HSV
///
/// Saturation is 0 for black, hue is 0 for any gray.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rgb_to_hsv(rgb: Rgb) -> HsvColor {
    let max = rgb.r.max(rgb.g).max(rgb.b);
    let min = rgb.r.min(rgb.g).min(rgb.b);
    let delta = f32::from(max - min);

    if max == 0 {
        return HsvColor::BLACK;
    }

    let sat = libm::roundf(delta * 255.0 / f32::from(max)) as u8;
    if max == min {
        return HsvColor::new(Hue::RED, 0, max);
    }

    let (r, g, b) = (f32::from(rgb.r), f32::from(rgb.g), f32::from(rgb.b));
    let sector = if max == rgb.r {
        (g - b) / delta
    } else if max == rgb.g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    HsvColor::new(Hue::from_degrees(sector * 60.0), sat, max)
}

/// Convert HSV to RGB
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hsv_to_rgb(hsv: HsvColor) -> Rgb {
    if hsv.val == 0 {
        return Rgb { r: 0, g: 0, b: 0 };
    }
    if hsv.sat == 0 {
        return Rgb {
            r: hsv.val,
            g: hsv.val,
            b: hsv.val,
        };
    }

    let h = f32::from(hsv.hue.0) * 6.0 / HUE_TURN;
    let sector = (libm::floorf(h) as u8).min(5);
    let f = h - f32::from(sector);
    let v = f32::from(hsv.val);
    let s = f32::from(hsv.sat) / 255.0;

    let to_u8 = |x: f32| libm::roundf(x).clamp(0.0, 255.0) as u8;
    let p = to_u8(v * (1.0 - s));
    let q = to_u8(v * (1.0 - s * f));
    let t = to_u8(v * (1.0 - s * (1.0 - f)));
    let v = hsv.val;

    let (r, g, b) = match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb { r, g, b }
}
