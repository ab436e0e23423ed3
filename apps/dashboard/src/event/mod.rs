pub mod keymap;
pub mod loop_handler;

pub use loop_handler::{run, run_headless};
