//! Preset store backed by the user's config file

use serde::Deserialize;
use sqldeck_core::{Preset, Result, SqldeckError};
use std::path::{Path, PathBuf};

/// Name of the per-user config file holding the preset list
pub const RC_FILE_NAME: &str = ".rgwfuncsrc";

/// On-disk shape of the config file; only the preset list matters here
#[derive(Debug, Deserialize)]
struct RcFile {
    #[serde(default)]
    db_presets: Vec<Preset>,
}

/// Path of the per-user config file
pub fn rc_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(RC_FILE_NAME))
}

/// Load the preset list from the user's home config
///
/// Missing file, unreadable file, and parse failure all collapse into the
/// single `PresetLoad` outcome; there is no partial success. File order is
/// preserved because the first preset is the dispatcher's default.
pub fn load_presets() -> Result<Vec<Preset>> {
    let path = rc_file_path()
        .ok_or_else(|| SqldeckError::PresetLoad("could not determine home directory".into()))?;
    load_presets_from(&path)
}

/// Load the preset list from an explicit config path
pub fn load_presets_from(path: &Path) -> Result<Vec<Preset>> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| SqldeckError::PresetLoad(format!("{}: {}", path.display(), e)))?;
    let config: RcFile = serde_json::from_str(&data)
        .map_err(|e| SqldeckError::PresetLoad(format!("{}: {}", path.display(), e)))?;

    tracing::info!(
        count = config.db_presets.len(),
        path = %path.display(),
        "loaded DB presets"
    );
    Ok(config.db_presets)
}

/// Find a preset by exact, case-sensitive name
pub fn get_preset_by_name<'a>(presets: &'a [Preset], name: &str) -> Option<&'a Preset> {
    presets.iter().find(|p| p.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_rc(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn test_load_preserves_file_order() {
        let file = write_rc(
            r#"{
                "db_presets": [
                    { "name": "customers", "db_type": "mssql", "username": "sa",
                      "password": "pw", "host": "db1", "database": "crm" },
                    { "name": "partners", "db_type": "mysql", "username": "root",
                      "password": "pw", "host": "db2", "database": "partners" }
                ]
            }"#,
        );

        let presets = load_presets_from(file.path()).expect("load presets");
        assert_eq!(presets.len(), 2);
        assert_eq!(presets[0].name, "customers");
        assert_eq!(presets[0].db_type, "mssql");
        assert_eq!(presets[1].name, "partners");
        assert_eq!(presets[1].db_type, "mysql");
    }

    #[test]
    fn test_missing_preset_key_is_empty_list() {
        let file = write_rc(r#"{ "other_settings": {} }"#);
        let presets = load_presets_from(file.path()).expect("load presets");
        assert!(presets.is_empty());
    }

    #[test]
    fn test_missing_file_is_a_load_error() {
        let err = load_presets_from(Path::new("/nonexistent/.rgwfuncsrc")).unwrap_err();
        assert!(matches!(err, SqldeckError::PresetLoad(_)));
        assert!(err.to_string().starts_with("Failed to load presets:"));
    }

    #[test]
    fn test_unparsable_file_is_a_load_error() {
        let file = write_rc("{ not json");
        let err = load_presets_from(file.path()).unwrap_err();
        assert!(matches!(err, SqldeckError::PresetLoad(_)));
    }

    #[test]
    fn test_get_preset_by_name_exact_match() {
        let presets = vec![
            Preset::new("customers", "mssql"),
            Preset::new("partners", "mysql"),
        ];

        for p in &presets {
            assert_eq!(get_preset_by_name(&presets, &p.name), Some(p));
        }
        assert_eq!(get_preset_by_name(&presets, "Customers"), None);
        assert_eq!(get_preset_by_name(&presets, "unknown"), None);
        assert_eq!(get_preset_by_name(&[], "customers"), None);
    }
}
