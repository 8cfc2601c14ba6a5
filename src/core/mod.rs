//! Core plumbing shared by every layer: logging and randomness

pub mod logging;
pub mod random;
