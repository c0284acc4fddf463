use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::LightState;

/// One saved scene: a display name plus the target state per light id.
///
/// The on-disk record is a `[name, entries]` pair, keeping the file format
/// of earlier panel firmwares readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PresetRecord", into = "PresetRecord")]
pub struct Preset {
    pub name: String,
    pub entries: BTreeMap<String, LightState>,
}

#[derive(Serialize, Deserialize)]
struct PresetRecord(String, BTreeMap<String, LightState>);

impl From<PresetRecord> for Preset {
    fn from(record: PresetRecord) -> Self {
        Self {
            name: record.0,
            entries: record.1,
        }
    }
}

impl From<Preset> for PresetRecord {
    fn from(preset: Preset) -> Self {
        Self(preset.name, preset.entries)
    }
}

/// All presets, keyed by the numeric-key slot ("1".."9"), persisted as one
/// JSON file. Saves rewrite the whole file.
pub struct PresetStore {
    path: PathBuf,
    presets: BTreeMap<String, Preset>,
}

impl PresetStore {
    /// Load the preset file; a missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let presets = match fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path: path.to_path_buf(),
            presets,
        })
    }

    pub fn save(&self) -> Result<(), AppError> {
        let raw = serde_json::to_string(&self.presets)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    pub fn get(&self, slot: &str) -> Option<&Preset> {
        self.presets.get(slot)
    }

    pub fn set(&mut self, slot: &str, preset: Preset) {
        self.presets.insert(slot.to_string(), preset);
    }

    /// Slot ids in ascending order.
    pub fn slots(&self) -> Vec<String> {
        self.presets.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
