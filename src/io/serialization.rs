// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Record and settings serialization.
//!
//! This module reads and writes submission records and settings files in
//! YAML and JSON formats, picking the format from the file extension.

use anyhow::{bail, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

/// Supported on-disk formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Format implied by the extension of `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(|s| s.to_str());
        match extension {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => bail!("Unsupported file extension: {:?}", extension),
        }
    }
}

/// Export data to YAML format.
pub fn export_yaml<T: Serialize>(data: &T, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export data to JSON format.
pub fn export_json<T: Serialize>(data: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import data from YAML format.
pub fn import_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let yaml = std::fs::read_to_string(path)?;
    let data = serde_yaml::from_str(&yaml)?;
    Ok(data)
}

/// Import data from JSON format.
pub fn import_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path)?;
    let data = serde_json::from_str(&json)?;
    Ok(data)
}

/// Export data in the format named by the extension of `path`.
pub fn export<T: Serialize>(data: &T, path: &Path) -> Result<()> {
    match Format::from_path(path)? {
        Format::Yaml => export_yaml(data, path),
        Format::Json => export_json(data, path),
    }
}

/// Import data in the format named by the extension of `path`.
pub fn import<T: DeserializeOwned>(path: &Path) -> Result<T> {
    match Format::from_path(path)? {
        Format::Yaml => import_yaml(path),
        Format::Json => import_json(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submission::Submission;

    fn record() -> Submission {
        Submission {
            name: "Ada Lovelace".to_string(),
            event_code: Some(7),
            signature: "data:image/png;base64,AAAA".to_string(),
            signature_url: Some("file:///tmp/signature.png".to_string()),
            proof_url: None,
            submitted_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a.yml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a.yaml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a.json")).unwrap(), Format::Json);
        assert!(Format::from_path(Path::new("a.txt")).is_err());
        assert!(Format::from_path(Path::new("record")).is_err());
    }

    #[test]
    fn test_yaml_record_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.yaml");
        export(&record(), &path).unwrap();
        let loaded: Submission = import(&path).unwrap();
        assert_eq!(loaded, record());
    }

    #[test]
    fn test_json_record_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        export(&record(), &path).unwrap();
        let loaded: Submission = import(&path).unwrap();
        assert_eq!(loaded, record());
    }

    #[test]
    fn test_optional_fields_omitted() {
        let mut data = record();
        data.event_code = None;
        data.signature_url = None;
        let json = serde_json::to_string(&data).unwrap();
        assert!(!json.contains("event_code"));
        assert!(!json.contains("signature_url"));
    }

    #[test]
    fn test_unsupported_extension_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.txt");
        assert!(export(&record(), &path).is_err());
        assert!(!path.exists());
    }
}
