use kiss3d::renderer::LineRenderer;

use nalgebra::{Point3, Unit, Vector3};

/// Points around a circle lying in the plane perpendicular to `normal`.
/// The first point is repeated at the end, so consecutive pairs close the loop.
pub fn circle_points(
    center: Point3<f32>,
    radius: f32,
    normal: &Unit<Vector3<f32>>,
    num_segments: usize,
) -> impl Iterator<Item = Point3<f32>> {
    assert!(
        num_segments >= 3,
        "A circle needs at least three segments, num_segments was {}",
        num_segments
    );

    let (u, v) = plane_basis(normal);
    (0..=num_segments).map(move |i| {
        let theta = std::f32::consts::TAU * (i as f32) / (num_segments as f32);
        center + radius * (u * theta.cos() + v * theta.sin())
    })
}

/// Two unit vectors spanning the plane perpendicular to `normal`.
pub fn plane_basis(normal: &Unit<Vector3<f32>>) -> (Vector3<f32>, Vector3<f32>) {
    // Cross with whichever axis is least aligned with the normal
    let helper = if normal.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let u = normal.cross(&helper).normalize();
    let v = normal.cross(&u);
    (u, v)
}

pub fn draw_polyline<I: IntoIterator<Item = Point3<f32>>>(
    line_renderer: &mut LineRenderer,
    points: I,
    color: Point3<f32>,
) {
    let mut prev_pt = None;
    for pt in points {
        if let Some(prev_pt) = prev_pt {
            line_renderer.draw_line(prev_pt, pt, color);
        }
        prev_pt = Some(pt);
    }
}
