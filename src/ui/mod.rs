pub mod renderer;

pub use renderer::{render_session, Renderer, Surface, TerminalRenderer, TextSlot};
