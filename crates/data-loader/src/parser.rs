//! Parsers for the id-map artifacts.
//!
//! Two layouts are understood:
//! - JSON object: `{"<external id>": <index>, ...}` (key order is kept)
//! - `.dat` lines: `externalId::index`

use crate::error::{DataLoadError, Result};
use std::fs;
use std::path::Path;

/// A parsed map file, in file order
pub type MapEntries = Vec<(String, u32)>;

/// Parse a map file, picking the layout from its extension.
pub fn parse_id_map(path: &Path) -> Result<MapEntries> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("dat") => parse_dat_map(path),
        _ => parse_json_map(path),
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse a JSON object of `external id → index`.
pub fn parse_json_map(path: &Path) -> Result<MapEntries> {
    let file = file_label(path);
    let content = fs::read_to_string(path)?;
    parse_json_map_str(&file, &content)
}

/// Parse JSON map content already in memory. `file` is only used for errors.
pub fn parse_json_map_str(file: &str, content: &str) -> Result<MapEntries> {
    let document: serde_json::Value =
        serde_json::from_str(content).map_err(|source| DataLoadError::Json {
            file: file.to_string(),
            source,
        })?;

    let serde_json::Value::Object(fields) = document else {
        return Err(DataLoadError::InvalidValue {
            field: format!("{} (top level)", file),
            value: "expected a JSON object".to_string(),
        });
    };

    let mut entries = Vec::with_capacity(fields.len());
    for (external_id, value) in fields {
        let index = value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| DataLoadError::InvalidValue {
                field: format!("index of {:?} in {}", external_id, file),
                value: value.to_string(),
            })?;
        entries.push((external_id, index));
    }

    Ok(entries)
}

/// Parse `externalId::index` lines. Blank lines are skipped.
pub fn parse_dat_map(path: &Path) -> Result<MapEntries> {
    let file = file_label(path);
    let content = fs::read_to_string(path)?;
    parse_dat_map_str(&file, &content)
}

pub fn parse_dat_map_str(file: &str, content: &str) -> Result<MapEntries> {
    let mut entries = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line_trimmed.split("::").collect();
        let [external_id, index] = parts.as_slice() else {
            return Err(DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!("expected 2 fields, found {}", parts.len()),
            });
        };

        if external_id.is_empty() {
            return Err(DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: "Missing external id".to_string(),
            });
        }

        let index: u32 = index.trim().parse().map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: format!("Invalid index: {}", e),
        })?;

        entries.push((external_id.to_string(), index));
    }

    Ok(entries)
}
