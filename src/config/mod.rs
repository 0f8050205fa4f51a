//! `.ecolabel.toml` configuration.
//!
//! ```toml
//! [analysis]
//! max_urls = 5
//!
//! [auditor]
//! timeout_secs = 90
//!
//! [grading]
//! scale = "legacy"
//! ```

mod core;
mod loader;

pub use core::{
    AnalysisConfig, AuditorConfig, EcolabelConfig, GradingConfig, ReportsConfig,
    DEFAULT_CONFIG_TOML, MAX_URLS_HARD_CAP,
};

pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_path,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

#[cfg(test)]
mod tests {
    use super::loader::{handle_read_error, try_load_config_from_path};
    use super::*;
    use crate::scoring::GradeScale;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = EcolabelConfig::default();
        assert_eq!(config.analysis.max_urls, 10);
        assert_eq!(config.auditor.timeout_secs, 120);
        assert_eq!(config.reports.dir, PathBuf::from("reports"));
        assert_eq!(config.grading.scale, GradeScale::SixBand);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_file_parses_to_defaults() {
        let parsed = parse_and_validate_config(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(parsed, EcolabelConfig::default());
    }

    #[test]
    fn test_parse_partial_config() {
        let contents = r#"
[analysis]
max_urls = 3

[grading]
scale = "legacy"
"#;
        let config = parse_and_validate_config(contents).unwrap();
        assert_eq!(config.analysis.max_urls, 3);
        assert_eq!(config.grading.scale, GradeScale::Legacy);
        assert_eq!(config.auditor.timeout_secs, 120);
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_and_validate_config("[analysis\nmax_urls = ");
        assert!(result.unwrap_err().contains(".ecolabel.toml"));
    }

    #[test]
    fn test_unknown_scale_is_parse_error() {
        assert!(parse_and_validate_config("[grading]\nscale = \"seven-band\"").is_err());
    }

    #[test]
    fn test_out_of_range_values_replaced_with_defaults() {
        let contents = r#"
[analysis]
max_urls = 50

[auditor]
timeout_secs = 0
"#;
        let config = parse_and_validate_config(contents).unwrap();
        assert_eq!(config.analysis.max_urls, MAX_URLS_HARD_CAP);
        assert_eq!(config.auditor.timeout_secs, 120);
    }

    #[test]
    fn test_directory_ancestors_respects_max_depth() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c/d"), PathBuf::from("/a/b/c")]);
    }

    #[test]
    fn test_directory_ancestors_handles_root() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/"), 5).collect();
        assert_eq!(dirs, vec![PathBuf::from("/")]);
    }

    #[test]
    fn test_load_config_from_finds_ancestor_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[analysis]\nmax_urls = 4\n",
        )
        .unwrap();
        let nested = temp.path().join("site").join("pages");
        std::fs::create_dir_all(&nested).unwrap();

        let config = load_config_from(nested);
        assert_eq!(config.analysis.max_urls, 4);
    }

    #[test]
    fn test_try_load_config_with_invalid_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "not = [valid").unwrap();
        assert!(try_load_config_from_path(&path).is_none());
    }

    #[test]
    fn test_load_config_from_missing_path_is_error() {
        let temp = TempDir::new().unwrap();
        let err = load_config_from_path(&temp.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, crate::core::Error::FileSystem { .. }));
    }

    #[test]
    fn test_handle_read_error_with_not_found() {
        let error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        handle_read_error(&PathBuf::from(CONFIG_FILE_NAME), &error);
    }
}
