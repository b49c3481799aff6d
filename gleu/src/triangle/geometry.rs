use glam::Vec2;

/// Default triangle: circumradius 0.5, apex up.
///
/// Values are `0.5 * (cos θ, sin θ)` for θ = 90°, 210°, 330°.
pub const TRIANGLE_VERTICES: [Vec2; 3] = [
    Vec2::new(0.0, 0.5),
    Vec2::new(-0.433_012_7, -0.25),
    Vec2::new(0.433_012_7, -0.25),
];

/// Equilateral triangle centered at the origin with the given circumradius
///
/// Counter-clockwise order starting at the apex on +Y.
pub fn equilateral_triangle(radius: f32) -> [Vec2; 3] {
    let angle = |degrees: f32| {
        let radians = degrees.to_radians();
        Vec2::new(radians.cos(), radians.sin()) * radius
    };
    [angle(90.0), angle(210.0), angle(330.0)]
}
