use kiss3d::camera::Camera;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::scene::SceneNode;
use kiss3d::text::Font;
use kiss3d::window::Window;
use nalgebra::{Isometry3, Point2, Point3, Similarity3, Unit, Vector3};

use super::camera::ZoomableCamera;
use super::controller::Controller;
use super::renderers::CompoundRenderer;
use crate::consts::{
    BACKGROUND_COLOR, CAMERA_FOVY_DEGREES, CAMERA_START_COORD, EARTH_RADIUS, VISUALIZER_SCALE,
};
use crate::playback::{DrawTarget, OrbitalParams, PlaybackState, Rgba, Scene};
use crate::trajectory::GeoRecordList;

/// Owns the trajectory, the playback state, and everything needed to put
/// them on screen.
pub struct View {
    records: GeoRecordList,
    state: PlaybackState,
    params: OrbitalParams,
    camera: ZoomableCamera,
    renderer: CompoundRenderer,
    solids: SolidTarget,
}

impl View {
    pub fn new(records: GeoRecordList, window: &mut Window) -> Self {
        let eye = Point3::new(CAMERA_START_COORD, CAMERA_START_COORD, CAMERA_START_COORD);
        let mut camera = ZoomableCamera::looking_at_origin(
            eye,
            CAMERA_FOVY_DEGREES.to_radians(),
            window.width(),
            window.height(),
        );
        camera.set_min_distance(EARTH_RADIUS * VISUALIZER_SCALE * 2.0);

        View {
            records,
            state: PlaybackState::new(),
            params: OrbitalParams::default(),
            camera,
            renderer: CompoundRenderer::new(),
            solids: SolidTarget::new(window.add_group()),
        }
    }

    pub fn advance(&mut self) {
        self.state = self.state.step(self.records.count(), &self.params);
    }

    pub fn rewind(&mut self) {
        self.state.rewind();
    }

    /// Emits this frame's scene into the scene graph and line renderers, and
    /// draws the HUD.
    pub fn prerender_scene(&mut self, window: &mut Window, controller: &Controller) {
        let scene = Scene::emit(&self.state, &self.records);
        let mut target = FrameTarget {
            renderer: &mut self.renderer,
            solids: &mut self.solids,
            world: Similarity3::identity(),
            background: Rgba::from_rgb8(BACKGROUND_COLOR),
        };
        scene.submit(&mut target);
        self.solids.finish_frame();

        if controller.show_hud() {
            let default_font = Font::default();
            window.draw_text(
                &self.hud_text(controller),
                &Point2::origin(),
                60.0,
                &default_font,
                &Point3::new(1.0, 1.0, 1.0),
            );
        }
    }

    fn hud_text(&self, controller: &Controller) -> String {
        let position = match self.records.get(self.state.vehicle_index) {
            Some(pt) => format!("({:.0}, {:.0}, {:.0})", pt.x, pt.y, pt.z),
            None => String::from("N/A"),
        };

        format!(
            "Record: {} / {}{}
Position: {}
Moon orbit: {:.1} deg
FPS: {:.0}",
            self.state.vehicle_index,
            self.records.count(),
            if controller.is_paused() { " (paused)" } else { "" },
            position,
            self.state.moon_orbit_rotation % 360.0,
            controller.fps(),
        )
    }

    pub fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.camera), None, Some(&mut self.renderer), None)
    }
}

/// Scene-graph nodes for opaque geometry. kiss3d nodes live across frames, so
/// they're pooled and re-placed every frame; any left unused are hidden.
struct SolidTarget {
    root: SceneNode,
    spheres: Vec<SceneNode>,
    models: Vec<SceneNode>,
    spheres_used: usize,
    models_used: usize,
}

impl SolidTarget {
    fn new(root: SceneNode) -> Self {
        SolidTarget {
            root,
            spheres: vec![],
            models: vec![],
            spheres_used: 0,
            models_used: 0,
        }
    }

    // The stock sphere and cube meshes are unit-sized, so a node's local
    // scale is its diameter (or side length).

    fn next_sphere(&mut self) -> &mut SceneNode {
        if self.spheres_used == self.spheres.len() {
            self.spheres.push(self.root.add_sphere(0.5));
        }
        self.spheres_used += 1;
        &mut self.spheres[self.spheres_used - 1]
    }

    fn next_model(&mut self) -> &mut SceneNode {
        if self.models_used == self.models.len() {
            self.models.push(self.root.add_cube(1.0, 1.0, 1.0));
        }
        self.models_used += 1;
        &mut self.models[self.models_used - 1]
    }

    fn finish_frame(&mut self) {
        for node in self.spheres[self.spheres_used..].iter_mut() {
            node.set_visible(false);
        }
        for node in self.models[self.models_used..].iter_mut() {
            node.set_visible(false);
        }
        self.spheres_used = 0;
        self.models_used = 0;
    }
}

// Borrows the view's renderers for the length of one frame.
struct FrameTarget<'a> {
    renderer: &'a mut CompoundRenderer,
    solids: &'a mut SolidTarget,
    world: Similarity3<f32>,
    background: Rgba,
}

impl<'a> FrameTarget<'a> {
    fn background(&self) -> Point3<f32> {
        Point3::new(self.background.r, self.background.g, self.background.b)
    }

    fn place(node: &mut SceneNode, world: &Similarity3<f32>, transform: Isometry3<f32>, size: f32) {
        node.set_local_transformation(node_placement(world, &transform));
        node.set_local_scale(size, size, size);
        node.set_visible(true);
    }
}

/// A solid's transform relative to the root group. kiss3d scales a child's
/// mesh by its parent's scale but composes only the parent's isometry into
/// the child's position, so the root carries the world scale for sizes and
/// positions are mapped through it here.
fn node_placement(world: &Similarity3<f32>, transform: &Isometry3<f32>) -> Isometry3<f32> {
    (*world * *transform).isometry
}

impl<'a> DrawTarget for FrameTarget<'a> {
    fn set_scale(&mut self, scale: f32) {
        self.world = Similarity3::from_scaling(scale);
        self.solids.root.set_local_scale(scale, scale, scale);
    }

    fn draw_ring(&mut self, center: Point3<f32>, radius: f32, normal: Unit<Vector3<f32>>, color: Rgba) {
        let color = color.over(self.background());
        let center = self.world * center;
        let radius = radius * self.world.scaling();
        self.renderer.draw_ring(center, radius, normal, color);
    }

    fn draw_sphere(&mut self, transform: Isometry3<f32>, radius: f32, color: Rgba) {
        if color.is_opaque() {
            let node = self.solids.next_sphere();
            FrameTarget::place(node, &self.world, transform, 2.0 * radius);
            node.set_color(color.r, color.g, color.b);
        } else {
            // Translucent spheres are drawn as wireframe shells
            let color = color.over(self.background());
            let center = self.world * (transform * Point3::origin());
            let radius = radius * self.world.scaling();
            self.renderer.draw_shell(center, radius, color);
        }
    }

    fn draw_model(&mut self, position: Point3<f32>, size: f32, color: Rgba) {
        let transform = Isometry3::translation(position.x, position.y, position.z);
        let node = self.solids.next_model();
        FrameTarget::place(node, &self.world, transform, size);
        node.set_color(color.r, color.g, color.b);
    }

    fn draw_line(&mut self, start: Point3<f32>, end: Point3<f32>, color: Rgba) {
        let color = color.over(self.background());
        self.renderer
            .draw_line(self.world * start, self.world * end, color);
    }
}
