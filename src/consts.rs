// Calibrated against the original visualizer output; all lengths are in
// simulator meters unless stated otherwise.

/// 0.00001 units in the visualizer == 1 meter in the simulator
pub const VISUALIZER_SCALE: f32 = 0.00001;

pub const EARTH_RADIUS: f32 = 600_000.0;
pub const EARTH_ATMOSPHERE_ALTITUDE: f32 = 70_000.0;
pub const EARTH_COLOR: [u8; 3] = [93, 161, 224];

pub const MOON_RADIUS: f32 = 200_000.0;
pub const MOON_ORBIT_RADIUS: f32 = 12_000_000.0;

/// Degrees per frame, before the per-body multipliers in `OrbitalParams`
pub const ROTATION_SPEED: f32 = 0.1;

pub const VEHICLE_SIZE: f32 = 10_000.0;

pub const ORBIT_RING_ALPHA: f32 = 0.15;
pub const PATH_ALPHA: f32 = 0.25;
pub const ATMOSPHERE_ALPHA: f32 = 0.066;

// Window
pub const WINDOW_TITLE: &str = "Automated Rocket Control Visualizer";
pub const SCREEN_WIDTH: u32 = 1920;
pub const SCREEN_HEIGHT: u32 = 1080;
pub const TARGET_FPS: u64 = 60;
pub const BACKGROUND_COLOR: [u8; 3] = [2, 7, 9];

/// Initial camera eye is (d, d, d), looking at the origin
pub const CAMERA_START_COORD: f32 = 100.0;
pub const CAMERA_FOVY_DEGREES: f32 = 45.0;
