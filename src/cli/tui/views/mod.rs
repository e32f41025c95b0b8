//! TUI views

pub mod decider;
