//! Terminal previewer built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The previewer replays a recorded [`Scene`](crate::canvas::Scene) click by
//! click, the way the finished slide would play in a presentation:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, autoplay
//! - **[`panes`]**: stateless render functions for each visible pane (stage,
//!   timeline, console, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it from a scene and a
//! console and call [`App::run`] to start the event loop.
//!
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
