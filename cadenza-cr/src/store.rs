//! Catalog bootstrap from JSON seed files
//!
//! Loads composers.json and pieces.json from the data folder at startup and
//! builds the in-memory [`Registry`]. Degradation rules:
//! - A missing seed file is not an error: that collection starts empty
//! - A seed file that exists but fails to parse stops startup
//! - Duplicate composer ids in the seed data stop startup
//!
//! The catalog is never written back to disk; edits live only in memory.

use crate::registry::Registry;
use cadenza_common::models::{Composer, Piece};
use cadenza_common::{Error, Result};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// Seed file holding composer records
pub const COMPOSERS_FILE: &str = "composers.json";
/// Seed file holding piece records
pub const PIECES_FILE: &str = "pieces.json";

/// Load the registry from seed files in the data folder
pub fn load_registry(data_folder: &Path) -> Result<Registry> {
    let composers: Vec<Composer> = load_collection(&data_folder.join(COMPOSERS_FILE))?;
    let pieces: Vec<Piece> = load_collection(&data_folder.join(PIECES_FILE))?;

    check_unique_composer_ids(&composers)?;

    info!(
        "Loaded {} composers and {} pieces from {}",
        composers.len(),
        pieces.len(),
        data_folder.display()
    );
    Ok(Registry::from_records(composers, pieces))
}

/// Load one JSON array file, treating a missing file as an empty collection
fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        warn!("Seed file not found, starting empty: {}", path.display());
        return Ok(Vec::new());
    }

    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Reject seed data carrying the same composer id twice
fn check_unique_composer_ids(composers: &[Composer]) -> Result<()> {
    let mut seen = HashSet::new();
    for composer in composers {
        if !seen.insert(composer.composer_id) {
            return Err(Error::Config(format!(
                "Duplicate composer_id {} in {}",
                composer.composer_id, COMPOSERS_FILE
            )));
        }
    }
    Ok(())
}
