use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_null_marker")]
    pub null_marker: String, // shown in preview cells that hold no value
}

fn default_null_marker() -> String {
    "NaN".into()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            null_marker: default_null_marker(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilingConfig {
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
    #[serde(default = "default_preview_columns")]
    pub preview_columns: usize,
    #[serde(default = "default_distinct_threshold")]
    pub distinct_threshold: usize,
    #[serde(default = "default_distinct_display_cap")]
    pub distinct_display_cap: usize,
}

fn default_preview_rows() -> usize {
    5
}
fn default_preview_columns() -> usize {
    8
}
fn default_distinct_threshold() -> usize {
    10
}
fn default_distinct_display_cap() -> usize {
    10
}

impl Default for ProfilingConfig {
    fn default() -> Self {
        Self {
            preview_rows: default_preview_rows(),
            preview_columns: default_preview_columns(),
            distinct_threshold: default_distinct_threshold(),
            distinct_display_cap: default_distinct_display_cap(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_format")]
    pub format: String, // "text" or "json"
}

fn default_format() -> String {
    "text".into()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub profiling: ProfilingConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sheet-lens")
            .join("config.toml")
    }

    pub fn load() -> crate::Result<Self> {
        let path = if let Ok(env_path) = std::env::var("SHEET_LENS_CONFIG") {
            PathBuf::from(env_path) // $SHEET_LENS_CONFIG overrides default config path
        } else {
            Self::config_path()
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::SheetLensError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.profiling.preview_rows, 5);
        assert_eq!(cfg.profiling.preview_columns, 8);
        assert_eq!(cfg.profiling.distinct_threshold, 10);
        assert_eq!(cfg.display.null_marker, "NaN");
        assert_eq!(cfg.export.format, "text");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "[profiling]\npreview_rows = 3\n\n[display]\nnull_marker = \"-\"").unwrap();
        let cfg = Config::load_from(tmp.path()).unwrap();
        assert_eq!(cfg.profiling.preview_rows, 3);
        assert_eq!(cfg.profiling.preview_columns, 8);
        assert_eq!(cfg.display.null_marker, "-");
    }

    #[test]
    fn malformed_file_is_config_error() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "[profiling\npreview_rows = ").unwrap();
        let err = Config::load_from(tmp.path()).unwrap_err();
        assert!(matches!(err, crate::SheetLensError::Config(_)));
    }
}
