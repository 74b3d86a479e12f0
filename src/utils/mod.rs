//! Shared helpers for the machine alphabet.

pub mod alphabet;
