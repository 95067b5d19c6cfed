//! Format detection (RON/JSON/TOML), file discovery, and deserialization
//! helpers.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// The file parsed but holds a value outside its allowed range.
    #[error("invalid value for '{field}' in {file}: {detail}")]
    Invalid {
        file: PathBuf,
        field: &'static str,
        detail: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Ron, Format::Toml, Format::Json];

    pub fn extension(self) -> &'static str {
        match self {
            Format::Ron => "ron",
            Format::Toml => "toml",
            Format::Json => "json",
        }
    }
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    let ext = path.extension().and_then(|e| e.to_str());
    Format::ALL
        .into_iter()
        .find(|f| Some(f.extension()) == ext)
        .ok_or_else(|| DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        })
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for `{base_name}.ron`, `.toml` or `.json`.
///
/// Returns `Ok(None)` if none exists, or `Err(ConflictingFormats)` if more
/// than one does.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;

    for format in Format::ALL {
        let candidate = dir.join(format!("{base_name}.{}", format.extension()));
        if candidate.exists() {
            if let Some(existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing,
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Deserialize a string in the given format. `file` is only used for error
/// reporting.
pub fn deserialize_str<T: DeserializeOwned>(
    content: &str,
    format: Format,
    file: &Path,
) -> Result<T, DataLoadError> {
    let parse_err = |detail: String| DataLoadError::Parse {
        file: file.to_path_buf(),
        detail,
    };
    match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string())),
    }
}

/// Read a file and deserialize it according to its extension.
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    tracing::debug!(file = %path.display(), ?format, "loading data file");
    deserialize_str(&content, format, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::fs;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        name: String,
        rate: f64,
    }

    // -----------------------------------------------------------------------
    // detect_format
    // -----------------------------------------------------------------------

    #[test]
    fn detect_format_by_extension() {
        assert_eq!(detect_format(Path::new("settings.ron")).unwrap(), Format::Ron);
        assert_eq!(detect_format(Path::new("settings.toml")).unwrap(), Format::Toml);
        assert_eq!(detect_format(Path::new("settings.json")).unwrap(), Format::Json);
    }

    #[test]
    fn detect_format_unsupported() {
        assert!(matches!(
            detect_format(Path::new("settings.cfg")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            detect_format(Path::new("settings")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // find_data_file
    // -----------------------------------------------------------------------

    #[test]
    fn find_data_file_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("settings.toml"), "").unwrap();
        let result = find_data_file(dir.path(), "settings").unwrap();
        assert_eq!(result, Some(dir.path().join("settings.toml")));
    }

    #[test]
    fn find_data_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(find_data_file(dir.path(), "settings").unwrap(), None);
    }

    #[test]
    fn find_data_file_conflict() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("settings.ron"), "()").unwrap();
        fs::write(dir.path().join("settings.json"), "{}").unwrap();
        assert!(matches!(
            find_data_file(dir.path(), "settings"),
            Err(DataLoadError::ConflictingFormats { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // deserialize_file
    // -----------------------------------------------------------------------

    #[test]
    fn deserialize_each_format() {
        let dir = tempfile::tempdir().unwrap();
        let expected = Sample {
            name: "panel".to_string(),
            rate: 1.5,
        };

        let ron_path = dir.path().join("a.ron");
        fs::write(&ron_path, r#"(name: "panel", rate: 1.5)"#).unwrap();
        assert_eq!(deserialize_file::<Sample>(&ron_path).unwrap(), expected);

        let json_path = dir.path().join("b.json");
        fs::write(&json_path, r#"{"name": "panel", "rate": 1.5}"#).unwrap();
        assert_eq!(deserialize_file::<Sample>(&json_path).unwrap(), expected);

        let toml_path = dir.path().join("c.toml");
        fs::write(&toml_path, "name = \"panel\"\nrate = 1.5\n").unwrap();
        assert_eq!(deserialize_file::<Sample>(&toml_path).unwrap(), expected);
    }

    #[test]
    fn deserialize_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        match deserialize_file::<Sample>(&path) {
            Err(DataLoadError::Parse { file, .. }) => assert_eq!(file, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn deserialize_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = deserialize_file::<Sample>(&dir.path().join("absent.ron"));
        assert!(matches!(result, Err(DataLoadError::Io(_))));
    }
}
