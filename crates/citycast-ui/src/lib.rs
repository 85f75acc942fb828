//! Lookup widget for citycast: search input, display state, controller,
//! the text renderer and a line-driven session over them.

pub mod controller;
pub mod display_state;
pub mod input;
pub mod render;
pub mod session;

pub use controller::{ControllerMessage, Ticket, WeatherController};
pub use display_state::DisplayState;
pub use input::SearchInput;
pub use render::render;
pub use session::run_lines;
