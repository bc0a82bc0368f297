use nalgebra::{Isometry3, Point3, Unit, Vector3};

use super::PlaybackState;
use crate::consts::{
    ATMOSPHERE_ALPHA, EARTH_ATMOSPHERE_ALTITUDE, EARTH_COLOR, EARTH_RADIUS, MOON_ORBIT_RADIUS,
    MOON_RADIUS, ORBIT_RING_ALPHA, PATH_ALPHA, VEHICLE_SIZE, VISUALIZER_SCALE,
};
use crate::trajectory::GeoRecordList;

/// A color with straight (non-premultiplied) alpha, channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const LIGHT_GRAY: Rgba = Rgba::new(200.0 / 255.0, 200.0 / 255.0, 200.0 / 255.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Rgba { r, g, b, a }
    }

    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Rgba::new(
            rgb[0] as f32 / 255.0,
            rgb[1] as f32 / 255.0,
            rgb[2] as f32 / 255.0,
            1.0,
        )
    }

    /// Same color, with the given alpha.
    pub fn fade(self, alpha: f32) -> Self {
        Rgba {
            a: nalgebra::clamp(alpha, 0.0, 1.0),
            ..self
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// The opaque color you'd see after blending this over `background`.
    pub fn over(&self, background: Point3<f32>) -> Point3<f32> {
        let fg = Point3::new(self.r, self.g, self.b);
        Point3::from(fg.coords * self.a + background.coords * (1.0 - self.a))
    }
}

/// One primitive draw call. Lengths are in simulator units; the scene's scale
/// has not been applied yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Ring {
        center: Point3<f32>,
        radius: f32,
        normal: Unit<Vector3<f32>>,
        color: Rgba,
    },
    Sphere {
        transform: Isometry3<f32>,
        radius: f32,
        color: Rgba,
    },
    Model {
        position: Point3<f32>,
        size: f32,
        color: Rgba,
    },
    Line {
        start: Point3<f32>,
        end: Point3<f32>,
        color: Rgba,
    },
}

/// Whatever can actually put primitives on screen.
///
/// `set_scale` is called once per frame before any draw call, and the target
/// must apply it uniformly to everything drawn afterwards.
pub trait DrawTarget {
    fn set_scale(&mut self, scale: f32);
    fn draw_ring(&mut self, center: Point3<f32>, radius: f32, normal: Unit<Vector3<f32>>, color: Rgba);
    fn draw_sphere(&mut self, transform: Isometry3<f32>, radius: f32, color: Rgba);
    fn draw_model(&mut self, position: Point3<f32>, size: f32, color: Rgba);
    fn draw_line(&mut self, start: Point3<f32>, end: Point3<f32>, color: Rgba);
}

/// A single frame's worth of draw commands, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub scale: f32,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn emit(state: &PlaybackState, records: &GeoRecordList) -> Self {
        let mut commands = Vec::with_capacity(records.count() + 5);

        commands.push(DrawCommand::Ring {
            center: Point3::origin(),
            radius: MOON_ORBIT_RADIUS,
            normal: Vector3::y_axis(),
            color: Rgba::WHITE.fade(ORBIT_RING_ALPHA),
        });

        commands.push(DrawCommand::Sphere {
            transform: moon_transform(state),
            radius: MOON_RADIUS,
            color: Rgba::LIGHT_GRAY,
        });

        commands.push(DrawCommand::Sphere {
            transform: Isometry3::identity(),
            radius: EARTH_RADIUS,
            color: Rgba::from_rgb8(EARTH_COLOR),
        });

        if let Some(position) = records.get(state.vehicle_index) {
            commands.push(DrawCommand::Model {
                position: *position,
                size: VEHICLE_SIZE,
                color: Rgba::WHITE,
            });
        }

        let count = records.count();
        for i in 0..count {
            // The path is left open: no segment from the last record back to
            // the first, even though the index below wraps.
            if i == count - 1 {
                continue;
            }
            commands.push(DrawCommand::Line {
                start: records[i],
                end: records[(i + 1) % count],
                color: Rgba::WHITE.fade(PATH_ALPHA),
            });
        }

        commands.push(DrawCommand::Sphere {
            transform: Isometry3::identity(),
            radius: EARTH_RADIUS + EARTH_ATMOSPHERE_ALTITUDE,
            color: Rgba::WHITE.fade(ATMOSPHERE_ALPHA),
        });

        Scene {
            scale: VISUALIZER_SCALE,
            commands,
        }
    }

    pub fn submit<T: DrawTarget + ?Sized>(&self, target: &mut T) {
        target.set_scale(self.scale);
        for command in self.commands.iter() {
            match *command {
                DrawCommand::Ring {
                    center,
                    radius,
                    normal,
                    color,
                } => target.draw_ring(center, radius, normal, color),
                DrawCommand::Sphere {
                    transform,
                    radius,
                    color,
                } => target.draw_sphere(transform, radius, color),
                DrawCommand::Model {
                    position,
                    size,
                    color,
                } => target.draw_model(position, size, color),
                DrawCommand::Line { start, end, color } => target.draw_line(start, end, color),
            }
        }
    }
}

// Carry the moon out along its orbit, undo the orbital rotation so it doesn't
// also spin with the orbit, then apply its own tilted spin.
fn moon_transform(state: &PlaybackState) -> Isometry3<f32> {
    let orbit_angle = state.moon_orbit_rotation.to_radians();
    let spin_angle = state.moon_rotation.to_radians();
    let spin_axis = Unit::new_normalize(Vector3::new(0.25, 1.0, 0.0));

    Isometry3::rotation(Vector3::y() * orbit_angle)
        * Isometry3::translation(MOON_ORBIT_RADIUS, 0.0, 0.0)
        * Isometry3::rotation(Vector3::y() * -orbit_angle)
        * Isometry3::rotation(spin_axis.into_inner() * spin_angle)
}
