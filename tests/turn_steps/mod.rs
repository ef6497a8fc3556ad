//! Step definitions for turn controller scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
