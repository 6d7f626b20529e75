use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::ReconError;

const TMP_SUFFIX: &str = "tmp";

/// Tunable thresholds and limits for the aggregation surfaces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Days an invoice must be old before it counts as overdue client debt.
    pub overdue_cutoff_days: i64,
    /// Maximum entries on the cheque/credit due reminder surface.
    pub reminder_limit: usize,
    /// Maximum entries on the delinquent client surface.
    pub delinquency_limit: usize,
    /// Label shown when a supplier or client join misses.
    pub fallback_party_label: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            overdue_cutoff_days: 30,
            reminder_limit: 8,
            delinquency_limit: 5,
            fallback_party_label: "(unknown)".into(),
        }
    }
}

impl EngineConfig {
    /// Loads the configuration file, falling back to defaults when absent.
    pub fn load_from_path(path: &Path) -> Result<Self, ReconError> {
        if path.exists() {
            let data = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Persists the configuration atomically (write to a temp file, then rename).
    pub fn save_to_path(&self, path: &Path) -> Result<(), ReconError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        let tmp = tmp_path(path);
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_dashboard_contract() {
        let config = EngineConfig::default();
        assert_eq!(config.overdue_cutoff_days, 30);
        assert_eq!(config.reminder_limit, 8);
        assert_eq!(config.delinquency_limit, 5);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("engine.json");
        let config = EngineConfig {
            overdue_cutoff_days: 45,
            reminder_limit: 10,
            delinquency_limit: 3,
            fallback_party_label: "n/a".into(),
        };
        config.save_to_path(&path).expect("save config");
        let loaded = EngineConfig::load_from_path(&path).expect("load config");
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("absent.json");
        let loaded = EngineConfig::load_from_path(&path).expect("load defaults");
        assert_eq!(loaded, EngineConfig::default());
    }
}
