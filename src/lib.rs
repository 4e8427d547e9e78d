//! Melodic Muse: short melody generation.
//!
//! The centre of the crate is a genetic algorithm over fixed-length note
//! sequences (`engines::generation`). Its winner, or the output of one of the
//! simpler techniques in `engines::composition`, is encoded as note-on /
//! note-off events and written as MIDI by `engines::encoding`.

pub mod config;
pub mod engines;
pub mod error;
pub mod types;

pub use error::{MuseError, Result};
