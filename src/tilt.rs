use crate::data::model::AngleBundle;

/// Angle in degrees, within `[0, 180]`, between two stage orientations.
///
/// With `reference = (a1, b1)` and `other = (a2, b2)` as (x tilt, y tilt):
///
/// ```text
/// θ = acos( cos(b2 - b1)·cos(a1)·cos(a2) + sin(a1)·sin(a2) )
/// ```
///
/// The cosine is clamped to `[-1, 1]` before `acos` so rounding never turns
/// identical orientations into NaN. Non-finite inputs still give NaN.
pub fn tilt_angle(reference: &AngleBundle, other: &AngleBundle) -> f64 {
    let a1 = reference.x_angle.to_radians();
    let b1 = reference.y_angle.to_radians();
    let a2 = other.x_angle.to_radians();
    let b2 = other.y_angle.to_radians();

    let cos_theta = (b2 - b1).cos() * a1.cos() * a2.cos() + a1.sin() * a2.sin();
    cos_theta.clamp(-1.0, 1.0).acos().to_degrees()
}
