#[cfg(test)]
mod tests {
    use super::super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_report_settings() {
        let report = ReportConfig::default();
        assert_eq!(report.top_k, 10);
        assert_eq!(report.high_suitability_threshold, 0.60);
        assert_eq!(report.format, OutputFormat::Text);
    }

    #[test]
    fn test_empty_file_matches_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.dataset.path, default_dataset_path());
        assert_eq!(config.report.top_k, default_top_k());
    }

    #[test]
    fn test_partial_sections_keep_field_defaults() {
        let config = Config::from_toml_str(
            r#"
            [dataset]
            path = "data/regions.csv"

            [report]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.dataset.path, PathBuf::from("data/regions.csv"));
        assert_eq!(config.report.format, OutputFormat::Json);
        assert_eq!(config.report.high_suitability_threshold, 0.60);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = Config::from_toml_str("[report]\ntop_k = 3\n").unwrap();
        config.apply_overrides(ConfigOverrides {
            dataset_path: Some(PathBuf::from("other.csv")),
            top_k: Some(5),
            high_suitability_threshold: None,
            json: true,
        });
        assert_eq!(config.dataset.path, PathBuf::from("other.csv"));
        assert_eq!(config.report.top_k, 5);
        assert_eq!(config.report.high_suitability_threshold, 0.60);
        assert_eq!(config.report.format, OutputFormat::Json);
    }

    #[test]
    fn test_validate_rejects_out_of_range_threshold() {
        let mut config = Config::default();
        config.report.high_suitability_threshold = 1.5;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SunsiteError::Config(_)));
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let err = Config::load(Some(Path::new("/nonexistent/sunsite.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }
}
