use crate::consts::ROTATION_SPEED;

mod scene;

pub use scene::{DrawCommand, DrawTarget, Rgba, Scene};

/// Tuning for the stylized moon animation. None of this is orbital mechanics;
/// the numbers were picked to look right at 60 frames per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalParams {
    pub rotation_speed: f32,
}

impl OrbitalParams {
    pub fn new(rotation_speed: f32) -> Self {
        OrbitalParams { rotation_speed }
    }

    /// Degrees the moon spins about its own axis each frame.
    pub fn moon_rotation_delta(&self) -> f32 {
        5.0 * self.rotation_speed
    }

    /// Degrees the moon advances along its orbit each frame.
    ///
    /// Note that this is quadratic in `rotation_speed`. The scene was
    /// calibrated with this formula, so leave it alone.
    pub fn moon_orbit_rotation_delta(&self) -> f32 {
        365.0 / 360.0 * self.moon_rotation_delta() * self.rotation_speed
    }
}

impl Default for OrbitalParams {
    fn default() -> Self {
        OrbitalParams::new(ROTATION_SPEED)
    }
}

/// Everything that changes from one frame to the next, apart from the camera.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlaybackState {
    /// Index of the record the vehicle is drawn at
    pub vehicle_index: usize,
    /// Accumulated spin of the moon, in degrees
    pub moon_rotation: f32,
    /// Accumulated position of the moon along its orbit, in degrees
    pub moon_orbit_rotation: f32,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the state by one frame, for a trajectory with `record_count`
    /// records.
    pub fn step(&self, record_count: usize, params: &OrbitalParams) -> PlaybackState {
        PlaybackState {
            vehicle_index: next_vehicle_index(self.vehicle_index, record_count),
            moon_rotation: self.moon_rotation + params.moon_rotation_delta(),
            moon_orbit_rotation: self.moon_orbit_rotation + params.moon_orbit_rotation_delta(),
        }
    }

    /// Puts the vehicle back at the start of the trajectory. The moon keeps going.
    pub fn rewind(&mut self) {
        self.vehicle_index = 0;
    }
}

fn next_vehicle_index(index: usize, record_count: usize) -> usize {
    // With no records there's nothing to advance through, and `count - 1`
    // would underflow.
    if record_count == 0 {
        return 0;
    }

    // The last record is shown for one frame, then we wrap on the next.
    if index < record_count - 1 {
        index + 1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_orbital_deltas() {
        let params = OrbitalParams::default();
        assert_relative_eq!(params.moon_rotation_delta(), 0.5);
        assert_relative_eq!(params.moon_orbit_rotation_delta(), 365.0 / 360.0 * 0.05);

        // Doubling the speed quadruples the orbital advance
        let fast = OrbitalParams::new(2.0 * ROTATION_SPEED);
        assert_relative_eq!(
            fast.moon_orbit_rotation_delta(),
            4.0 * params.moon_orbit_rotation_delta(),
            max_relative = 1e-6
        );
    }

    #[test]
    fn test_angles_accumulate() {
        let params = OrbitalParams::default();
        let mut state = PlaybackState::new();
        for _ in 0..100 {
            state = state.step(10, &params);
        }
        assert_relative_eq!(state.moon_rotation, 50.0, max_relative = 1e-4);
        assert_relative_eq!(
            state.moon_orbit_rotation,
            100.0 * params.moon_orbit_rotation_delta(),
            max_relative = 1e-4
        );
    }

    #[test]
    fn test_vehicle_index_cycles() {
        let params = OrbitalParams::default();
        for count in 1..6 {
            let mut state = PlaybackState::new();
            let mut seen = vec![];
            for _ in 0..(2 * count) {
                seen.push(state.vehicle_index);
                state = state.step(count, &params);
            }
            let expected: Vec<usize> = (0..count).chain(0..count).collect();
            assert_eq!(seen, expected, "count = {}", count);
        }
    }

    #[test]
    fn test_empty_trajectory() {
        let params = OrbitalParams::default();
        let state = PlaybackState::new().step(0, &params).step(0, &params);
        assert_eq!(state.vehicle_index, 0);
        assert_relative_eq!(state.moon_rotation, 1.0);
    }

    #[test]
    fn test_rewind() {
        let params = OrbitalParams::default();
        let mut state = PlaybackState::new().step(5, &params).step(5, &params);
        assert_eq!(state.vehicle_index, 2);
        state.rewind();
        assert_eq!(state.vehicle_index, 0);
        assert_relative_eq!(state.moon_rotation, 1.0);
    }
}
