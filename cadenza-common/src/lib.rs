//! # Cadenza Common Library
//!
//! Shared code for the Cadenza catalog services including:
//! - Record models (Composer, Piece)
//! - Error types
//! - Configuration loading

pub mod config;
pub mod error;
pub mod models;

pub use error::{Error, Result};
