// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod specs;

pub mod detect;
pub mod document;
pub mod error;
pub mod evaluator;
pub mod file;
pub mod gui;
pub mod log;
pub mod record;
pub mod report;
pub mod score;
pub mod store;

pub use evaluator::Evaluator;
pub use error::MetricsError;
