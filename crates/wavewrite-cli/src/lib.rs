//! wavewrite CLI library.
//!
//! Command implementations and input loading for the `wavewrite` binary.

pub mod commands;
pub mod input;
