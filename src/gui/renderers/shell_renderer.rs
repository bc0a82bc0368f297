use kiss3d::camera::Camera;
use kiss3d::renderer::{LineRenderer, Renderer};
use nalgebra::{Point3, Unit, Vector3};

use super::utils::{circle_points, draw_polyline};

const SEGMENTS: usize = 100;

// Besides the outline, a few latitude rings (as fractions of the radius) give
// the shell some depth without needing blending support.
const LATITUDES: [f32; 2] = [0.5, 0.85];

struct ShellData {
    center: Point3<f32>,
    radius: f32,
    color: Point3<f32>,
}

/// Draws translucent spheres as wireframe shells that always face the camera.
pub struct ShellRenderer {
    line_renderer: LineRenderer,
    shells: Vec<ShellData>,
}

impl ShellRenderer {
    pub fn new() -> Self {
        ShellRenderer {
            line_renderer: LineRenderer::new(),
            shells: vec![],
        }
    }

    pub fn add_shell(&mut self, center: Point3<f32>, radius: f32, color: Point3<f32>) {
        self.shells.push(ShellData {
            center,
            radius,
            color,
        });
    }

    fn load_shell_into_renderer(
        line_renderer: &mut LineRenderer,
        camera: &dyn Camera,
        shell: &ShellData,
    ) {
        // The silhouette lies in the plane facing the camera, so its normal is
        // the camera's view direction, expressed in world space.
        let camera_transform = camera.view_transform().inverse();
        let view_dir = Unit::new_normalize(camera_transform.transform_vector(&Vector3::z()));
        let up = camera_transform.transform_vector(&Vector3::y()).normalize();

        draw_polyline(
            line_renderer,
            circle_points(shell.center, shell.radius, &view_dir, SEGMENTS),
            shell.color,
        );

        // Latitude rings sit above and below the screen-space equator, shrunk
        // to stay on the surface of the sphere.
        let dim_color = shell.color * 0.6;
        for &lat in LATITUDES.iter() {
            let offset = shell.radius * (1.0 - lat * lat).sqrt();
            for &sign in [1.0f32, -1.0].iter() {
                let center = shell.center + up * (sign * offset);
                draw_polyline(
                    line_renderer,
                    circle_points(center, shell.radius * lat, &Unit::new_normalize(up), SEGMENTS),
                    dim_color,
                );
            }
        }
    }
}

impl Renderer for ShellRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        for shell in self.shells.iter() {
            ShellRenderer::load_shell_into_renderer(&mut self.line_renderer, camera, shell);
        }
        self.line_renderer.render(pass, camera);
        self.shells.clear();
    }
}
