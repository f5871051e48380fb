use palette::{Hsl, IntoColor, Srgb};

/// RGB triple with components in `[0, 1]`.
pub type Rgb = [f32; 3];

/// Red, green, blue, yellow, magenta, cyan: given to the first six groups.
pub const BASE_COLORS: [Rgb; 6] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
];

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
///
/// Hues start at 30° so they fall between the base colours.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = 30.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            [rgb.red, rgb.green, rgb.blue]
        })
        .collect()
}

/// One colour per group: the base colours first, generated ones after.
pub fn group_colors(n: usize) -> Vec<Rgb> {
    let extra = n.saturating_sub(BASE_COLORS.len());
    BASE_COLORS
        .iter()
        .copied()
        .chain(generate_palette(extra))
        .take(n)
        .collect()
}
