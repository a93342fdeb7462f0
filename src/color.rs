use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Color of a lit letter
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

/// Color of an unlit letter
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Linear blend of two scalars
///
/// # Arguments
/// * `a` - Start value
/// * `b` - End value
/// * `amount_of_b` - Blend factor (0.0 = all a, 1.0 = all b)
#[inline]
pub fn lerp(a: f32, b: f32, amount_of_b: f32) -> f32 {
    (b - a) * amount_of_b + a
}

/// Blend two 8-bit channels, rounding to the nearest value
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn blend8(a: u8, b: u8, amount_of_b: f32) -> u8 {
    let value = lerp(f32::from(a), f32::from(b), amount_of_b);
    libm::roundf(value).clamp(0.0, 255.0) as u8
}

/// Blend two RGB colors channel by channel
#[inline]
pub fn blend_colors(a: Rgb, b: Rgb, amount_of_b: f32) -> Rgb {
    Rgb {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
    }
}

/// Target color of a pixel
pub const fn lit_color(lit: bool) -> Rgb {
    if lit { WHITE } else { BLACK }
}
