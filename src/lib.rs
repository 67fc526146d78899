//! A terminal falling-block puzzle game.
//!
//! The game core ([`game`]) knows nothing about terminals: input arrives as
//! [`input::Command`]s, time as [`std::time::Instant`]s, and frames leave
//! through the [`ui::Renderer`] trait.

pub mod config;
pub mod constants;
pub mod game;
pub mod input;
pub mod ui;
