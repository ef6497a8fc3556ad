//! Unit tests for registration code parsing.
