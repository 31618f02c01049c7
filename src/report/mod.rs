//! Report generation and writing.

pub mod generator;

pub use generator::*;
