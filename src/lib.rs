//! Procedural generator for the grammar checker extension's toolbar icons
//!
//! Each icon is a blue rounded-rectangle badge with a white checkmark on a
//! transparent background, written as an RGBA PNG.

pub mod canvas;
pub mod error;
pub mod icon_gen;

pub use error::{IconError, Result};
pub use icon_gen::{generate, generate_icons, BadgeLayout, IconEntry};
