use std::time::Instant;

use kiss3d::event::{Action, Key, WindowEvent};

// Key config, all in one place
const KEY_TOGGLE_PAUSE: Key = Key::Space;
const KEY_REWIND: Key = Key::R;
const KEY_TOGGLE_HUD: Key = Key::H;

/// Playback controls that aren't camera movement.
pub struct Controller {
    paused: bool,
    rewind_requested: bool,
    show_hud: bool,
    fps_counter: FpsCounter,
}

pub struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            previous_fps: 0.0,
            window_size_millis,
        }
    }

    pub fn reset(&mut self) {
        self.instant = Instant::now();
        self.counter = 0;
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    pub fn increment(&mut self) {
        self.counter += 1;

        let elapsed = self.instant.elapsed();
        if elapsed.as_millis() > self.window_size_millis as u128 {
            self.previous_fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.reset();
        }
    }
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            paused: false,
            rewind_requested: false,
            show_hud: true,
            fps_counter: FpsCounter::new(1000),
        }
    }

    pub fn process_event(&mut self, event: &WindowEvent) {
        match *event {
            WindowEvent::Key(KEY_TOGGLE_PAUSE, Action::Press, _) => {
                self.paused = !self.paused;
                log::info!("Playback {}", if self.paused { "paused" } else { "resumed" });
            }
            WindowEvent::Key(KEY_REWIND, Action::Press, _) => {
                self.rewind_requested = true;
            }
            WindowEvent::Key(KEY_TOGGLE_HUD, Action::Press, _) => {
                self.show_hud = !self.show_hud;
            }
            _ => {}
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn show_hud(&self) -> bool {
        self.show_hud
    }

    /// Returns whether a rewind was requested since the last call.
    pub fn take_rewind(&mut self) -> bool {
        std::mem::replace(&mut self.rewind_requested, false)
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.value()
    }

    pub fn increment_frame_counter(&mut self) {
        self.fps_counter.increment()
    }
}

#[cfg(test)]
mod tests {
    use kiss3d::event::Modifiers;

    use super::*;

    fn press(key: Key) -> WindowEvent {
        WindowEvent::Key(key, Action::Press, Modifiers::empty())
    }

    #[test]
    fn test_pause_and_rewind() {
        let mut controller = Controller::new();
        assert!(!controller.is_paused());

        controller.process_event(&press(KEY_TOGGLE_PAUSE));
        assert!(controller.is_paused());
        controller.process_event(&WindowEvent::Key(
            KEY_TOGGLE_PAUSE,
            Action::Release,
            Modifiers::empty(),
        ));
        assert!(controller.is_paused());
        controller.process_event(&press(KEY_TOGGLE_PAUSE));
        assert!(!controller.is_paused());

        assert!(!controller.take_rewind());
        controller.process_event(&press(KEY_REWIND));
        assert!(controller.take_rewind());
        assert!(!controller.take_rewind());
    }
}
