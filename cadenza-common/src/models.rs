//! Catalog record models
//!
//! The record shapes shared by the registry, the bootstrap JSON files, and
//! the HTTP API. Both collections hold these records directly; there is no
//! separate storage representation.

use serde::{Deserialize, Serialize};

/// A composer record
///
/// `composer_id` is assigned by the registry, never by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composer {
    pub composer_id: i64,
    pub name: String,
    pub home_country: String,
}

/// Composer fields as submitted by clients, before an ID is assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComposer {
    pub name: String,
    pub home_country: String,
}

/// A piece record
///
/// Pieces carry no ID of their own: `name` is the lookup key for update and
/// delete, and `composer_id` references the owning composer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub name: String,
    pub alt_name: String,
    pub difficulty: i64,
    pub composer_id: i64,
}
