use itertools::Itertools;
use nalgebra::Point3;

use rocket_visualizer::playback::{DrawCommand, DrawTarget, OrbitalParams, PlaybackState, Rgba, Scene};
use rocket_visualizer::trajectory::{from_reader, GeoRecordList};

/// Records every call, so tests can check what would have hit the screen.
#[derive(Default)]
struct RecordingTarget {
    scales: Vec<f32>,
    calls: Vec<&'static str>,
    lines: Vec<(Point3<f32>, Point3<f32>)>,
    models: Vec<Point3<f32>>,
}

impl DrawTarget for RecordingTarget {
    fn set_scale(&mut self, scale: f32) {
        self.scales.push(scale);
    }

    fn draw_ring(
        &mut self,
        _: Point3<f32>,
        _: f32,
        _: nalgebra::Unit<nalgebra::Vector3<f32>>,
        _: Rgba,
    ) {
        self.calls.push("ring");
    }

    fn draw_sphere(&mut self, _: nalgebra::Isometry3<f32>, _: f32, _: Rgba) {
        self.calls.push("sphere");
    }

    fn draw_model(&mut self, position: Point3<f32>, _: f32, _: Rgba) {
        self.calls.push("model");
        self.models.push(position);
    }

    fn draw_line(&mut self, start: Point3<f32>, end: Point3<f32>, _: Rgba) {
        self.calls.push("line");
        self.lines.push((start, end));
    }
}

fn straight_line(count: usize) -> GeoRecordList {
    let mut input = format!("{}\n", count);
    for i in 0..count {
        input.push_str(&format!("V({}.0, 0.0, {}.5)\n", i, i));
    }
    from_reader(input.as_bytes()).unwrap()
}

#[test]
fn test_index_cycle_has_period_count() {
    let params = OrbitalParams::default();
    for count in [1, 2, 3, 7, 60] {
        let mut state = PlaybackState::new();
        let indices: Vec<usize> = (0..3 * count)
            .map(|_| {
                let index = state.vehicle_index;
                state = state.step(count, &params);
                index
            })
            .collect();

        for chunk in indices.chunks(count) {
            assert_eq!(chunk.iter().copied().collect_vec(), (0..count).collect_vec());
        }
    }
}

#[test]
fn test_frames_follow_the_trajectory() {
    let records = straight_line(4);
    let params = OrbitalParams::default();
    let mut state = PlaybackState::new();

    let mut target = RecordingTarget::default();
    for _ in 0..8 {
        state = state.step(records.count(), &params);
        Scene::emit(&state, &records).submit(&mut target);
    }

    // The first frame has already advanced once
    let expected = [1, 2, 3, 0, 1, 2, 3, 0].iter().map(|&i| records[i]).collect_vec();
    assert_eq!(target.models, expected);
    assert_eq!(target.scales.len(), 8);
    assert!(target.scales.iter().all_equal());
}

#[test]
fn test_draw_order_and_open_path() {
    let records = straight_line(5);
    let mut target = RecordingTarget::default();
    Scene::emit(&PlaybackState::new(), &records).submit(&mut target);

    assert_eq!(
        target.calls,
        ["ring", "sphere", "sphere", "model", "line", "line", "line", "line", "sphere"]
    );

    // Each segment joins neighbours, and none closes the loop
    for ((a, b), (start, end)) in records.iter().tuple_windows().zip(target.lines.iter()) {
        assert_eq!((a, b), (start, end));
    }
    assert!(!target.lines.contains(&(records[4], records[0])));
}

#[test]
fn test_empty_trajectory_still_animates() {
    let records = straight_line(0);
    let params = OrbitalParams::default();
    let mut state = PlaybackState::new();
    let mut target = RecordingTarget::default();

    for _ in 0..3 {
        state = state.step(records.count(), &params);
        Scene::emit(&state, &records).submit(&mut target);
    }

    assert_eq!(state.vehicle_index, 0);
    assert!(state.moon_orbit_rotation > 0.0);
    assert!(target.models.is_empty());
    assert!(target.lines.is_empty());
    assert_eq!(target.calls.len(), 3 * 4);
}

#[test]
fn test_emitted_commands_are_unscaled() {
    let records = straight_line(2);
    let scene = Scene::emit(&PlaybackState::new(), &records);
    let model = scene.commands.iter().find_map(|cmd| match *cmd {
        DrawCommand::Model { position, .. } => Some(position),
        _ => None,
    });
    assert_eq!(model, Some(Point3::new(0.0, 0.0, 0.5)));
    assert!(scene.scale < 1.0);
}
