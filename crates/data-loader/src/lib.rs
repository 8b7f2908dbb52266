//! # Data Loader Crate
//!
//! This crate loads the id-mapping artifacts that sit next to a trained
//! recommendation model, plus the ratings payload handed to the CLI.
//!
//! ## Main Components
//!
//! - **types**: UserMap, ItemMap, IdMaps, RatingsPayload
//! - **parser**: Parse JSON and `.dat` map files
//! - **index**: Load both maps from disk
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::IdMaps;
//! use std::path::Path;
//!
//! let maps = IdMaps::load_from_files(
//!     Path::new("artifacts/movie_map.json"),
//!     Path::new("artifacts/user_map.json"),
//! )?;
//!
//! let user_index = maps.users.resolve("42");
//! let movie_id = maps.items.external_id_for(7);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    UserIndex,
    ItemIndex,
    // Core types
    UserMap,
    ItemMap,
    IdMaps,
    RatingsPayload,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn users(n: usize) -> UserMap {
        UserMap::from_entries((0..n).map(|i| (format!("user{}", i), i as UserIndex)))
    }

    #[test]
    fn test_known_user_resolves_to_its_index() {
        let map = UserMap::from_entries(vec![("42".to_string(), 7), ("43".to_string(), 3)]);
        assert_eq!(map.resolve("42"), 7);
        assert_eq!(map.resolve("43"), 3);
    }

    #[test]
    fn test_unknown_user_falls_back_to_middle_index() {
        assert_eq!(users(0).resolve("nobody"), 0);
        assert_eq!(users(1).resolve("nobody"), 0);
        assert_eq!(users(5).resolve("nobody"), 2);
        assert_eq!(users(6040).resolve("nobody"), 3020);
    }

    #[test]
    fn test_user_map_duplicate_key_keeps_last() {
        let map = UserMap::from_entries(vec![("a".to_string(), 1), ("a".to_string(), 9)]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), Some(9));
    }

    #[test]
    fn test_item_reverse_lookup_first_match_wins() {
        let map = ItemMap::from_entries(vec![
            ("100".to_string(), 0),
            ("200".to_string(), 1),
            ("300".to_string(), 1),
        ]);
        assert_eq!(map.external_id_for(0), Some("100"));
        assert_eq!(map.external_id_for(1), Some("200"));
        assert_eq!(map.external_id_for(2), None);
    }

    #[test]
    fn test_item_duplicate_key_keeps_position() {
        let map = ItemMap::from_entries(vec![
            ("100".to_string(), 0),
            ("200".to_string(), 1),
            ("100".to_string(), 1),
        ]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("100"), Some(1));
        // "100" still precedes "200", so it wins index 1
        assert_eq!(map.external_id_for(1), Some("100"));
        assert_eq!(map.external_id_for(0), None);

        let order: Vec<&str> = map.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec!["100", "200"]);
    }

    #[test]
    fn test_ratings_payload_accepts_any_json() {
        let payload = RatingsPayload::parse(r#"[{"movieId": 550, "rating": 4}]"#).unwrap();
        assert_eq!(payload.entry_count(), 1);

        assert_eq!(RatingsPayload::parse("{}").unwrap().entry_count(), 0);
        assert_eq!(RatingsPayload::parse("3").unwrap().entry_count(), 0);
        assert!(RatingsPayload::parse("[{").is_err());
        assert!(RatingsPayload::parse("").is_err());
    }

    #[test]
    fn test_ratings_payload_is_strict_json() {
        // Non-standard number literals and very deep nesting are rejected
        assert!(RatingsPayload::parse(r#"[{"movieId": 550, "rating": NaN}]"#).is_err());
        assert!(RatingsPayload::parse("[Infinity]").is_err());

        let deep = format!("{}{}", "[".repeat(200), "]".repeat(200));
        assert!(RatingsPayload::parse(&deep).is_err());

        let shallow = format!("{}{}", "[".repeat(100), "]".repeat(100));
        assert!(RatingsPayload::parse(&shallow).is_ok());
    }

    #[test]
    fn test_empty_maps() {
        let maps = IdMaps::default();
        assert!(maps.users.is_empty());
        assert!(maps.items.is_empty());
        assert_eq!(maps.users.resolve("x"), 0);
        assert!(maps.items.external_id_for(0).is_none());
    }
}
