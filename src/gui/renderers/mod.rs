use kiss3d::camera::Camera;
use kiss3d::renderer::{LineRenderer, Renderer};
use nalgebra::{Point3, Unit, Vector3};

use self::shell_renderer::ShellRenderer;
use self::utils::{circle_points, draw_polyline};

mod shell_renderer;
mod utils;

const RING_SEGMENTS: usize = 360;

/// Collects all the line-based geometry for a frame. Everything is cleared
/// after it's rendered, so it has to be re-added every frame.
pub struct CompoundRenderer {
    shell_renderer: ShellRenderer,
    line_renderer: LineRenderer,
}

impl CompoundRenderer {
    pub fn new() -> Self {
        CompoundRenderer {
            shell_renderer: ShellRenderer::new(),
            line_renderer: LineRenderer::new(),
        }
    }

    pub fn draw_line(&mut self, start: Point3<f32>, end: Point3<f32>, color: Point3<f32>) {
        self.line_renderer.draw_line(start, end, color);
    }

    pub fn draw_ring(
        &mut self,
        center: Point3<f32>,
        radius: f32,
        normal: Unit<Vector3<f32>>,
        color: Point3<f32>,
    ) {
        draw_polyline(
            &mut self.line_renderer,
            circle_points(center, radius, &normal, RING_SEGMENTS),
            color,
        );
    }

    pub fn draw_shell(&mut self, center: Point3<f32>, radius: f32, color: Point3<f32>) {
        self.shell_renderer.add_shell(center, radius, color);
    }
}

impl Renderer for CompoundRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        self.line_renderer.render(pass, camera);
        self.shell_renderer.render(pass, camera);
    }
}
