//! In-memory catalog of composers and pieces
//!
//! Owns the two record collections and implements every catalog operation.
//! The HTTP layer holds a `Registry` behind an `RwLock` in shared state, so
//! methods here take plain `&self`/`&mut self` and stay lock-free.
//!
//! Id allocation is deliberately asymmetric:
//! - `create_composer` reuses gaps (lowest free positive id)
//! - `upsert_composer` without an id appends above the current maximum

use cadenza_common::models::{Composer, NewComposer, Piece};
use cadenza_common::{Error, Result};
use std::collections::HashSet;

/// In-memory catalog state
///
/// Records are kept in insertion order. `list_composers` sorts a copy by id;
/// pieces are always reported in insertion order.
#[derive(Debug, Default)]
pub struct Registry {
    composers: Vec<Composer>,
    pieces: Vec<Piece>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from records loaded at startup
    pub fn from_records(composers: Vec<Composer>, pieces: Vec<Piece>) -> Self {
        Self { composers, pieces }
    }

    /// Number of composers currently registered
    pub fn composer_count(&self) -> usize {
        self.composers.len()
    }

    /// Number of pieces currently registered
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    // ============================================================================
    // Composer Operations
    // ============================================================================

    /// All composers, sorted ascending by composer_id
    pub fn list_composers(&self) -> Vec<Composer> {
        let mut composers = self.composers.clone();
        composers.sort_by_key(|c| c.composer_id);
        composers
    }

    /// Register a new composer under the lowest free id
    ///
    /// Ids released by deletion are reused: the assigned id is the smallest
    /// positive integer no current composer holds.
    pub fn create_composer(&mut self, new: NewComposer) -> Composer {
        let composer = Composer {
            composer_id: self.lowest_free_id(),
            name: new.name,
            home_country: new.home_country,
        };
        self.composers.push(composer.clone());
        composer
    }

    /// Replace an existing composer, or register a new one when no id is given
    ///
    /// With an id, the matching composer's fields are overwritten in place
    /// (id and list position unchanged); an unknown id is `NotFound`, never an
    /// insert. Without an id a new composer is appended under
    /// max(existing ids) + 1, so this path does not reuse deleted ids.
    pub fn upsert_composer(
        &mut self,
        composer_id: Option<i64>,
        new: NewComposer,
    ) -> Result<Composer> {
        match composer_id {
            Some(id) => {
                let composer = self
                    .composers
                    .iter_mut()
                    .find(|c| c.composer_id == id)
                    .ok_or_else(|| Error::NotFound("Composer not found".to_string()))?;
                composer.name = new.name;
                composer.home_country = new.home_country;
                Ok(composer.clone())
            }
            None => {
                let next_id = self
                    .composers
                    .iter()
                    .map(|c| c.composer_id)
                    .max()
                    .map_or(1, |max| max + 1);
                let composer = Composer {
                    composer_id: next_id,
                    name: new.name,
                    home_country: new.home_country,
                };
                self.composers.push(composer.clone());
                Ok(composer)
            }
        }
    }

    /// Remove a composer by id, returning the removed record
    ///
    /// Pieces referencing the composer are left in place; the reference is
    /// only ever checked when a piece is created.
    pub fn delete_composer(&mut self, composer_id: Option<i64>) -> Result<Composer> {
        let id = composer_id.ok_or_else(|| {
            Error::InvalidRequest("composer_id is required for removing a composer".to_string())
        })?;
        let index = self
            .composers
            .iter()
            .position(|c| c.composer_id == id)
            .ok_or_else(|| Error::NotFound("Composer not found".to_string()))?;
        Ok(self.composers.remove(index))
    }

    // ============================================================================
    // Piece Operations
    // ============================================================================

    /// All pieces, optionally restricted to a single composer
    pub fn list_pieces(&self, composer_id: Option<i64>) -> Vec<Piece> {
        match composer_id {
            Some(id) => self
                .pieces
                .iter()
                .filter(|p| p.composer_id == id)
                .cloned()
                .collect(),
            None => self.pieces.clone(),
        }
    }

    /// Register a new piece
    ///
    /// The referenced composer must exist at this moment. The stored piece
    /// keeps its composer_id even if that composer is deleted later.
    pub fn create_piece(&mut self, piece: Piece) -> Result<Piece> {
        if !self.composer_exists(piece.composer_id) {
            return Err(Error::NotFound("Composer not found".to_string()));
        }
        self.pieces.push(piece.clone());
        Ok(piece)
    }

    /// Replace the first piece carrying the given name
    ///
    /// The replacement is taken wholesale, renaming included. Its composer_id
    /// is not checked against the composer list.
    pub fn update_piece(&mut self, name: &str, piece: Piece) -> Result<Piece> {
        let existing = self
            .pieces
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::NotFound("Piece not found".to_string()))?;
        *existing = piece.clone();
        Ok(piece)
    }

    /// Remove the first piece carrying the given name, returning it
    pub fn delete_piece(&mut self, name: &str) -> Result<Piece> {
        let index = self
            .pieces
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| Error::NotFound("Piece not found".to_string()))?;
        Ok(self.pieces.remove(index))
    }

    // ============================================================================
    // Helpers
    // ============================================================================

    fn composer_exists(&self, composer_id: i64) -> bool {
        self.composers.iter().any(|c| c.composer_id == composer_id)
    }

    /// Smallest positive id no composer currently holds
    fn lowest_free_id(&self) -> i64 {
        let taken: HashSet<i64> = self.composers.iter().map(|c| c.composer_id).collect();
        let mut candidate = 1;
        while taken.contains(&candidate) {
            candidate += 1;
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composer(id: i64, name: &str) -> Composer {
        Composer {
            composer_id: id,
            name: name.to_string(),
            home_country: "Germany".to_string(),
        }
    }

    fn new_composer(name: &str) -> NewComposer {
        NewComposer {
            name: name.to_string(),
            home_country: "Germany".to_string(),
        }
    }

    fn piece(name: &str, composer_id: i64) -> Piece {
        Piece {
            name: name.to_string(),
            alt_name: String::new(),
            difficulty: 5,
            composer_id,
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids_from_one() {
        let mut registry = Registry::new();

        let first = registry.create_composer(new_composer("Bach"));
        let second = registry.create_composer(new_composer("Handel"));
        let third = registry.create_composer(new_composer("Telemann"));

        assert_eq!(first.composer_id, 1);
        assert_eq!(second.composer_id, 2);
        assert_eq!(third.composer_id, 3);
    }

    #[test]
    fn test_create_reuses_lowest_freed_id() {
        let mut registry = Registry::new();
        registry.create_composer(new_composer("Bach"));
        registry.create_composer(new_composer("Handel"));
        registry.create_composer(new_composer("Telemann"));

        registry.delete_composer(Some(2)).unwrap();
        let replacement = registry.create_composer(new_composer("Vivaldi"));

        assert_eq!(replacement.composer_id, 2);
    }

    #[test]
    fn test_create_fills_lowest_gap_first() {
        let mut registry = Registry::from_records(
            vec![composer(1, "Bach"), composer(3, "Telemann"), composer(5, "Vivaldi")],
            Vec::new(),
        );

        assert_eq!(registry.create_composer(new_composer("Handel")).composer_id, 2);
        assert_eq!(registry.create_composer(new_composer("Purcell")).composer_id, 4);
        assert_eq!(registry.create_composer(new_composer("Corelli")).composer_id, 6);
    }

    #[test]
    fn test_list_composers_sorted_by_id() {
        let registry = Registry::from_records(
            vec![composer(3, "Telemann"), composer(1, "Bach"), composer(2, "Handel")],
            Vec::new(),
        );

        let listed = registry.list_composers();
        let ids: Vec<i64> = listed.iter().map(|c| c.composer_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_upsert_with_id_replaces_fields_in_place() {
        let mut registry = Registry::from_records(
            vec![composer(3, "Telemann"), composer(1, "Bach")],
            Vec::new(),
        );

        let updated = registry
            .upsert_composer(
                Some(3),
                NewComposer {
                    name: "Georg Philipp Telemann".to_string(),
                    home_country: "Holy Roman Empire".to_string(),
                },
            )
            .unwrap();

        assert_eq!(updated.composer_id, 3);
        assert_eq!(updated.name, "Georg Philipp Telemann");
        assert_eq!(updated.home_country, "Holy Roman Empire");
        // Position in the underlying list is unchanged (still first)
        assert_eq!(registry.composers[0].name, "Georg Philipp Telemann");
        assert_eq!(registry.composer_count(), 2);
    }

    #[test]
    fn test_upsert_with_unknown_id_is_not_found() {
        let mut registry = Registry::from_records(vec![composer(1, "Bach")], Vec::new());

        let result = registry.upsert_composer(Some(99), new_composer("Handel"));

        assert!(matches!(result, Err(Error::NotFound(_))));
        // No record was created
        assert_eq!(registry.composer_count(), 1);
    }

    #[test]
    fn test_upsert_without_id_appends_above_max() {
        let mut registry = Registry::from_records(
            vec![composer(1, "Bach"), composer(5, "Vivaldi")],
            Vec::new(),
        );

        let first = registry.upsert_composer(None, new_composer("Handel")).unwrap();
        let second = registry.upsert_composer(None, new_composer("Purcell")).unwrap();

        // Gap at 2..=4 is not reused on this path; ids keep climbing
        assert_eq!(first.composer_id, 6);
        assert_eq!(second.composer_id, 7);
        assert_eq!(registry.composer_count(), 4);
    }

    #[test]
    fn test_upsert_without_id_on_empty_registry_starts_at_one() {
        let mut registry = Registry::new();

        let created = registry.upsert_composer(None, new_composer("Bach")).unwrap();

        assert_eq!(created.composer_id, 1);
    }

    #[test]
    fn test_allocation_asymmetry_after_delete() {
        let mut registry = Registry::new();
        registry.create_composer(new_composer("Bach"));
        registry.create_composer(new_composer("Handel"));
        registry.create_composer(new_composer("Telemann"));
        registry.delete_composer(Some(2)).unwrap();

        // Upsert without id skips the gap, create fills it
        let upserted = registry.upsert_composer(None, new_composer("Vivaldi")).unwrap();
        let created = registry.create_composer(new_composer("Purcell"));

        assert_eq!(upserted.composer_id, 4);
        assert_eq!(created.composer_id, 2);
    }

    #[test]
    fn test_delete_composer_requires_id() {
        let mut registry = Registry::from_records(vec![composer(1, "Bach")], Vec::new());

        let result = registry.delete_composer(None);

        assert!(matches!(result, Err(Error::InvalidRequest(_))));
        assert_eq!(registry.composer_count(), 1);
    }

    #[test]
    fn test_delete_composer_unknown_id_is_not_found() {
        let mut registry = Registry::from_records(vec![composer(1, "Bach")], Vec::new());

        let result = registry.delete_composer(Some(42));

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(registry.composer_count(), 1);
    }

    #[test]
    fn test_delete_composer_returns_removed_record() {
        let mut registry = Registry::from_records(
            vec![composer(1, "Bach"), composer(2, "Handel")],
            Vec::new(),
        );

        let removed = registry.delete_composer(Some(1)).unwrap();

        assert_eq!(removed.name, "Bach");
        assert_eq!(registry.composer_count(), 1);
    }

    #[test]
    fn test_create_piece_requires_existing_composer() {
        let mut registry = Registry::new();

        let result = registry.create_piece(piece("Chaconne", 1));

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(registry.piece_count(), 0);
    }

    #[test]
    fn test_create_piece_for_known_composer() {
        let mut registry = Registry::from_records(vec![composer(1, "Bach")], Vec::new());

        let created = registry.create_piece(piece("Chaconne", 1)).unwrap();

        assert_eq!(created.name, "Chaconne");
        assert_eq!(registry.piece_count(), 1);
    }

    #[test]
    fn test_deleting_composer_orphans_pieces() {
        let mut registry = Registry::from_records(vec![composer(1, "Bach")], Vec::new());
        registry.create_piece(piece("Chaconne", 1)).unwrap();

        registry.delete_composer(Some(1)).unwrap();

        // The piece survives with its original composer_id
        let orphans = registry.list_pieces(Some(1));
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].composer_id, 1);
    }

    #[test]
    fn test_list_pieces_filters_by_composer() {
        let mut registry = Registry::from_records(
            vec![composer(1, "Bach"), composer(2, "Handel")],
            Vec::new(),
        );
        registry.create_piece(piece("Chaconne", 1)).unwrap();
        registry.create_piece(piece("Sarabande", 2)).unwrap();
        registry.create_piece(piece("Partita", 1)).unwrap();

        assert_eq!(registry.list_pieces(None).len(), 3);
        assert_eq!(registry.list_pieces(Some(1)).len(), 2);
        assert_eq!(registry.list_pieces(Some(2)).len(), 1);
        assert!(registry.list_pieces(Some(3)).is_empty());
    }

    #[test]
    fn test_update_piece_replaces_first_match_only() {
        let mut registry = Registry::from_records(vec![composer(1, "Bach")], Vec::new());
        registry.create_piece(piece("Prelude", 1)).unwrap();
        registry.create_piece(piece("Prelude", 1)).unwrap();

        let mut replacement = piece("Prelude", 1);
        replacement.difficulty = 9;
        registry.update_piece("Prelude", replacement).unwrap();

        let pieces = registry.list_pieces(None);
        assert_eq!(pieces[0].difficulty, 9);
        assert_eq!(pieces[1].difficulty, 5);
    }

    #[test]
    fn test_update_piece_can_rename_and_reassign() {
        let mut registry = Registry::from_records(vec![composer(1, "Bach")], Vec::new());
        registry.create_piece(piece("Prelude", 1)).unwrap();
        registry.delete_composer(Some(1)).unwrap();

        // Wholesale replacement, and the new composer_id is not validated
        let replacement = Piece {
            name: "Prelude in C".to_string(),
            alt_name: "BWV 846".to_string(),
            difficulty: 3,
            composer_id: 42,
        };
        let updated = registry.update_piece("Prelude", replacement).unwrap();

        assert_eq!(updated.name, "Prelude in C");
        assert_eq!(updated.composer_id, 42);
        assert!(registry.list_pieces(None).iter().all(|p| p.name != "Prelude"));
    }

    #[test]
    fn test_update_piece_unknown_name_is_not_found() {
        let mut registry = Registry::new();

        let result = registry.update_piece("Nocturne", piece("Nocturne", 1));

        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_delete_piece_removes_first_match_only() {
        let mut registry = Registry::from_records(vec![composer(1, "Bach")], Vec::new());
        registry.create_piece(piece("Prelude", 1)).unwrap();
        let mut second = piece("Prelude", 1);
        second.alt_name = "second copy".to_string();
        registry.create_piece(second).unwrap();

        let removed = registry.delete_piece("Prelude").unwrap();

        assert_eq!(removed.alt_name, "");
        let remaining = registry.list_pieces(None);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].alt_name, "second copy");
    }

    #[test]
    fn test_delete_piece_unknown_name_is_not_found() {
        let mut registry = Registry::new();

        let result = registry.delete_piece("Nocturne");

        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_error_messages_match_wire_contract() {
        let mut registry = Registry::new();

        match registry.upsert_composer(Some(1), new_composer("Bach")) {
            Err(Error::NotFound(msg)) => assert_eq!(msg, "Composer not found"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
        match registry.delete_composer(None) {
            Err(Error::InvalidRequest(msg)) => {
                assert_eq!(msg, "composer_id is required for removing a composer")
            }
            other => panic!("Expected InvalidRequest, got {:?}", other),
        }
        match registry.delete_piece("Nocturne") {
            Err(Error::NotFound(msg)) => assert_eq!(msg, "Piece not found"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }
}
