//! Registry file persistence
//!
//! The registry is saved as a single JSON document with an `Assets`
//! array, one record per asset, ordered by handle so diffs stay
//! stable. Loading is fail-soft: an unreadable or malformed file
//! yields an empty registry, and individual bad records are skipped,
//! so a damaged project still opens.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AssetError;
use crate::handle::AssetHandle;
use crate::metadata::AssetMetadata;
use crate::registry::AssetRegistry;
use crate::types::AssetType;

#[derive(Debug, Serialize, Deserialize)]
struct RegistryRecord {
    #[serde(rename = "Handle")]
    handle: u64,
    #[serde(rename = "FilePath")]
    file_path: String,
    #[serde(rename = "FileSize")]
    file_size: u64,
    #[serde(rename = "Type")]
    asset_type: String,
}

// An empty registry is written as a null marker, not an empty array
#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryFile {
    #[serde(rename = "Assets")]
    assets: Option<Vec<serde_json::Value>>,
}

/// Write the registry file, dropping invalid and memory-only entries
pub fn save_registry(registry: &AssetRegistry, path: &Path) -> Result<(), AssetError> {
    let mut entries = registry.snapshot();
    entries.retain(|meta| meta.is_valid());
    entries.sort_by_key(|meta| meta.handle);

    let records: Vec<serde_json::Value> = entries
        .iter()
        .map(|meta| {
            serde_json::to_value(RegistryRecord {
                handle: meta.handle.id(),
                file_path: meta.file_path.to_string_lossy().into_owned(),
                file_size: meta.file_size,
                asset_type: meta.asset_type.name().to_string(),
            })
        })
        .collect::<Result<_, _>>()?;

    let count = records.len();
    let doc = RegistryFile {
        assets: if records.is_empty() {
            None
        } else {
            Some(records)
        },
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(&doc)?)?;
    log::debug!("saved registry with {count} assets to {}", path.display());
    Ok(())
}

/// Read a registry file into a fresh registry
///
/// Never fails: a missing, unreadable or malformed file produces an
/// empty registry and a log message.
pub fn load_registry(path: &Path) -> AssetRegistry {
    let registry = AssetRegistry::new();

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                log::warn!("could not read registry {}: {err}", path.display());
            }
            return registry;
        }
    };

    let doc: RegistryFile = match serde_json::from_str(&text) {
        Ok(doc) => doc,
        Err(err) => {
            log::warn!("malformed registry {}: {err}", path.display());
            return registry;
        }
    };

    for value in doc.assets.unwrap_or_default() {
        let record: RegistryRecord = match serde_json::from_value(value) {
            Ok(record) => record,
            Err(err) => {
                log::warn!("skipping malformed registry record: {err}");
                continue;
            }
        };
        let Some(asset_type) = AssetType::from_name(&record.asset_type) else {
            log::warn!("skipping registry record with unknown type {:?}", record.asset_type);
            continue;
        };
        let handle = AssetHandle::new(record.handle);
        if !handle.is_valid() {
            log::warn!("skipping registry record with invalid handle");
            continue;
        }
        registry.insert(AssetMetadata::new(
            handle,
            asset_type,
            record.file_path,
            record.file_size,
        ));
    }

    log::debug!("loaded registry with {} assets from {}", registry.len(), path.display());
    registry
}
