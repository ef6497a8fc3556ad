//! Step definitions for registration code scenarios.

pub mod then;
pub mod when;
pub mod world;
