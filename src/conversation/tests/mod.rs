//! Unit tests for the conversation subsystem.

mod domain_tests;
