mod gradient;
mod hsv;
mod palette;
mod utils;

pub use gradient::{GradientCompositor, arc_of, blend_hsv, normalized_position, pair_gradient};
pub use hsv::{HsvColor, Hue, hsv_to_rgb, hue_lerp, linear_lerp, rgb_to_hsv};
pub use palette::{PALETTE_SIZE, Palette, PaletteEntry, PaletteSlot};
use smart_leds::RGB8;
pub use utils::{fill, pack_rgb, rgb_from_u32};

pub type Rgb = RGB8;
