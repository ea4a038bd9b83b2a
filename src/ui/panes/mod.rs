//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`stage`]: the slide itself, replayed up to the current click
//! - [`timeline`]: recorded animation steps with their click and trigger
//! - [`console`]: console lines printed or read so far
//! - [`status`]: status bar with keybindings and playback state
//!
//! Each pane module exports one stateless `render_*` function; scroll
//! offsets live in [`App`](super::App) and are passed in by reference.

pub mod console;
pub mod stage;
pub mod status;
pub mod timeline;

pub use console::render_console_pane;
pub use stage::render_stage_pane;
pub use status::render_status_bar;
pub use timeline::render_timeline_pane;
