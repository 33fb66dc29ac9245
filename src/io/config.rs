use crate::editor::EditorConfig;
use crate::io::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads and validates an editor configuration file.
pub fn load_config(path: &Path) -> Result<EditorConfig, Error> {
    let content =
        fs::read_to_string(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
    parse_config(&content, Some(path.to_path_buf()))
}

/// Parses a TOML configuration; absent keys keep their defaults.
pub fn parse_config(content: &str, path: Option<PathBuf>) -> Result<EditorConfig, Error> {
    let config: EditorConfig =
        toml::from_str(content).map_err(|e| Error::parse("TOML", path.clone(), e.message()))?;
    config
        .validate()
        .map_err(|e| Error::invalid_config(e, path))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() {
        let config = parse_config("atom_radius = 12.0\nstar_seed = 9\n", None).unwrap();

        assert_eq!(config.atom_radius, 12.0);
        assert_eq!(config.star_seed, Some(9));
        assert_eq!(config.history_depth, 20);
    }

    #[test]
    fn empty_document_is_the_default_config() {
        assert_eq!(parse_config("", None).unwrap(), EditorConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_config("atom_size = 3.0\n", None).unwrap_err();

        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn semantically_invalid_values_are_rejected() {
        let err = parse_config("min_scale = 4.0\nmax_scale = 1.0\n", None).unwrap_err();

        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = load_config(Path::new("/nonexistent/molsketch.toml")).unwrap_err();

        assert!(matches!(err, Error::Io { path: Some(_), .. }));
    }
}
