pub mod handler;

pub use handler::{drain_pending, map_key, Command};
