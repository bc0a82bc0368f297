use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};

use self::controller::Controller;
use self::view::View;
use crate::trajectory::GeoRecordList;

mod camera;
mod controller;
mod renderers;
mod view;

pub use self::camera::ZoomableCamera;

/// The per-frame driver handed to `Window::render_loop`. The loop ends when
/// the window is closed; nothing here can fail mid-frame.
pub struct Visualizer {
    view: View,
    controller: Controller,
}

impl Visualizer {
    pub fn new(records: GeoRecordList, window: &mut Window) -> Self {
        Self {
            view: View::new(records, window),
            controller: Controller::new(),
        }
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        for event in events.iter() {
            self.controller.process_event(&event.value);
        }
    }
}

impl State for Visualizer {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        self.view.cameras_and_effect_and_renderer()
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());
        if self.controller.take_rewind() {
            self.view.rewind();
        }
        if !self.controller.is_paused() {
            self.view.advance();
        }
        self.view.prerender_scene(window, &self.controller);
        self.controller.increment_frame_counter();
    }
}
