use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Panel settings, read once at startup from a flat `key=value` file and
/// passed by reference to every component that needs it.
///
/// Lines starting with `#` and lines without a `=` are skipped.
#[derive(Debug)]
pub struct Settings {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let mut values = BTreeMap::new();
        for line in fs::read_to_string(path)?.lines() {
            if line.starts_with('#') {
                continue;
            }
            if let Some((name, value)) = line.split_once('=') {
                values.insert(name.trim().to_string(), value.trim().to_string());
            }
        }
        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    fn require(&self, name: &str) -> Result<&str, AppError> {
        self.get(name)
            .ok_or_else(|| AppError::Config(format!("missing setting '{}'", name)))
    }

    /// Hostname of the lighting bridge, e.g. `homeassistant.lan`.
    pub fn bridge_host(&self) -> Result<&str, AppError> {
        self.require("bridge_host")
    }

    /// Bridge API key (the deCONZ user token).
    pub fn api_key(&self) -> Result<&str, AppError> {
        self.require("api_key")
    }

    pub fn wifi_ssid(&self) -> Option<&str> {
        self.get("wifi_ssid")
    }

    pub fn calendar_url(&self) -> Option<&str> {
        self.get("calendar_url")
    }

    /// Update one value and rewrite the whole settings file.
    pub fn update(&mut self, name: &str, value: &str) -> Result<(), AppError> {
        self.values.insert(name.to_string(), value.to_string());
        let mut out = String::new();
        for (k, v) in &self.values {
            out.push_str(k);
            out.push('=');
            out.push_str(v);
            out.push('\n');
        }
        fs::write(&self.path, out)?;
        Ok(())
    }
}
