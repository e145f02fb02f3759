//! Core data structures for MRCONEE decoding.
//!
//! This crate defines the dataset types, the error taxonomy, and the
//! point-group classification catalog shared by the format and CLI crates.
//! It performs no I/O.

pub mod error;
pub mod symmetry;
pub mod types;
