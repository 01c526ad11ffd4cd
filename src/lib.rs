//! tailchat
//!
//! Live-updating terminal chat view. Records arrive from a JSON-lines feed, are kept in
//! a bounded shared buffer, and are painted bottom-up with character wrapping. The mouse
//! wheel scrolls back through history; new arrivals don't move a scrolled-back view.

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;
