//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

fn write_temp_config(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(name);
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

#[test]
fn default_config_path_contains_smartcalc_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("smartcalc") && path_str.ends_with("config.toml"),
        "Path should contain 'smartcalc' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let path = write_temp_config(
        "smartcalc_test_config_valid.toml",
        r#"
theme = "dark"
mode = "scientific"

[explanation]
model = "gemini-test"
language = "French"
"#,
    );

    let config = load_config_file(&path)
        .expect("Should parse valid TOML")
        .expect("File exists");
    let _ = fs::remove_file(&path);

    assert_eq!(config.theme, Some(Theme::Dark));
    assert_eq!(config.mode, Some(Mode::Scientific));
    let section = config.explanation.expect("explanation section");
    assert_eq!(section.model.as_deref(), Some("gemini-test"));
    assert_eq!(section.language.as_deref(), Some("French"));
    assert_eq!(section.endpoint, None);
}

#[test]
fn load_config_file_rejects_unknown_fields() {
    let path = write_temp_config("smartcalc_test_config_unknown.toml", "colour = \"red\"\n");

    let result = load_config_file(&path);
    let _ = fs::remove_file(&path);

    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Unknown fields should be rejected, got {:?}",
        result
    );
}

#[test]
fn load_config_file_rejects_unknown_theme() {
    let path = write_temp_config("smartcalc_test_config_theme.toml", "theme = \"neon\"\n");

    let result = load_config_file(&path);
    let _ = fs::remove_file(&path);

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn merge_config_none_returns_defaults() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_partial_section_keeps_other_defaults() {
    let config_file = ConfigFile {
        explanation: Some(ExplanationSection {
            language: Some("German".to_string()),
            ..ExplanationSection::default()
        }),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(config_file));
    let defaults = ExplanationSettings::default();
    assert_eq!(resolved.explanation.language, "German");
    assert_eq!(resolved.explanation.model, defaults.model);
    assert_eq!(resolved.explanation.endpoint, defaults.endpoint);
    assert_eq!(resolved.explanation.api_key_env, defaults.api_key_env);
}

#[test]
#[serial(env)]
fn load_config_with_precedence_prefers_explicit_path() {
    let explicit = write_temp_config("smartcalc_test_explicit.toml", "theme = \"dark\"\n");
    let from_env = write_temp_config("smartcalc_test_env.toml", "theme = \"light\"\n");
    env::set_var("SMARTCALC_CONFIG", &from_env);

    let result = load_config_with_precedence(Some(explicit.clone()));

    env::remove_var("SMARTCALC_CONFIG");
    let _ = fs::remove_file(&explicit);
    let _ = fs::remove_file(&from_env);

    assert_eq!(result.unwrap().unwrap().theme, Some(Theme::Dark));
}

#[test]
#[serial(env)]
fn load_config_with_precedence_uses_env_path() {
    let from_env = write_temp_config("smartcalc_test_env_only.toml", "mode = \"ai\"\n");
    env::set_var("SMARTCALC_CONFIG", &from_env);

    let result = load_config_with_precedence(None);

    env::remove_var("SMARTCALC_CONFIG");
    let _ = fs::remove_file(&from_env);

    assert_eq!(result.unwrap().unwrap().mode, Some(Mode::Ai));
}

#[test]
#[serial(env)]
fn env_overrides_theme_and_model() {
    env::set_var("SMARTCALC_THEME", "dark");
    env::set_var("SMARTCALC_MODEL", "gemini-env");

    let config = apply_env_overrides(ResolvedConfig::default());

    env::remove_var("SMARTCALC_THEME");
    env::remove_var("SMARTCALC_MODEL");

    assert_eq!(config.theme, Theme::Dark);
    assert_eq!(config.explanation.model, "gemini-env");
}

#[test]
#[serial(env)]
fn env_override_with_unknown_theme_is_ignored() {
    env::set_var("SMARTCALC_THEME", "plaid");
    let config = apply_env_overrides(ResolvedConfig::default());
    env::remove_var("SMARTCALC_THEME");

    assert_eq!(config.theme, Theme::Light);
}

#[test]
fn cli_overrides_win() {
    let base = ResolvedConfig {
        theme: Theme::Dark,
        mode: Mode::Scientific,
        ..ResolvedConfig::default()
    };

    let config = apply_cli_overrides(base.clone(), Some(Theme::Light), None);
    assert_eq!(config.theme, Theme::Light);
    assert_eq!(config.mode, Mode::Scientific, "unset CLI flag keeps lower layer");

    let config = apply_cli_overrides(base, None, Some(Mode::Ai));
    assert_eq!(config.mode, Mode::Ai);
}
