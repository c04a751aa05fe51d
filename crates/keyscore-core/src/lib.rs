//! keyscore-core: keyword matching and scoring engine.
//!
//! This crate defines the data model, the matcher traits and text matching
//! primitives, the scoring engine, and config parsing that the keyscore CLI
//! builds on.

pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod statistics;
pub mod text;
pub mod traits;
