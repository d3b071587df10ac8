use palette::Srgba;

/// Gamma-encoded sRGB colour with alpha, used for actor tints and debug
/// lines.
pub type Color = Srgba;

pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color {
    Srgba::new(r, g, b, a)
}

pub fn white() -> Color {
    rgba(1.0, 1.0, 1.0, 1.0)
}

/// Component-wise product, the usual way a batch tint combines with a
/// drawable's own colour.
pub fn multiply(a: Color, b: Color) -> Color {
    rgba(
        a.color.red * b.color.red,
        a.color.green * b.color.green,
        a.color.blue * b.color.blue,
        a.alpha * b.alpha,
    )
}

pub fn with_alpha(color: Color, alpha: f32) -> Color {
    rgba(color.color.red, color.color.green, color.color.blue, alpha)
}
