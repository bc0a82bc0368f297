pub mod cli;
pub mod consts;
pub mod gui;
pub mod playback;
pub mod trajectory;
