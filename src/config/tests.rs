use super::*;
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

fn no_env(_: &str) -> Option<String> {
    None
}

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.output_dir, PathBuf::from("./output"));
    assert_eq!(
        config.default_teams,
        vec!["Team1", "Team2", "Team3", "Team4", "Team5"]
    );
    assert_eq!(config.seed, 0);
    assert_eq!(config.log_level, "info");
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = Config::from_toml_str("seed = 42\n").unwrap();
    assert_eq!(config.seed, 42);
    assert_eq!(config.output_dir, PathBuf::from("./output"));
    assert_eq!(config.default_teams.len(), 5);
}

#[test]
fn test_full_toml() {
    let config = Config::from_toml_str(
        r#"
output_dir = "/tmp/traffic"
default_teams = ["Red", "Blue"]
seed = 7
log_level = "debug"
"#,
    )
    .unwrap();
    assert_eq!(config.output_dir, PathBuf::from("/tmp/traffic"));
    assert_eq!(config.default_teams, vec!["Red", "Blue"]);
    assert_eq!(config.seed, 7);
    assert_eq!(config.log_level, "debug");
}

#[test]
fn test_non_text_team_is_type_error() {
    let err = Config::from_toml_str("default_teams = [1, 2, 3]\n").unwrap_err();
    assert!(matches!(err, TaskError::InvalidType { .. }));
    assert!(err.to_string().contains("default_teams"));
}

#[test]
fn test_invalid_toml() {
    let err = Config::from_toml_str("seed = = 3").unwrap_err();
    assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_TOML);
}

#[test]
fn test_env_overrides() {
    let env: HashMap<&str, &str> = [
        ("DATATASKS_OUTPUT_DIR", "env-out"),
        ("DATATASKS_SEED", "99"),
        ("DATATASKS_LOG_LEVEL", "trace"),
        ("DATATASKS_TEAMS", "North, South,,East"),
    ]
    .into_iter()
    .collect();

    let mut config = Config::default();
    config.merge_env_from(|key| env.get(key).map(|v| v.to_string()));

    assert_eq!(config.output_dir, PathBuf::from("env-out"));
    assert_eq!(config.seed, 99);
    assert_eq!(config.log_level, "trace");
    assert_eq!(config.default_teams, vec!["North", "South", "East"]);
}

#[test]
fn test_bad_env_seed_is_ignored() {
    let mut config = Config::default();
    config.merge_env_from(|key| (key == "DATATASKS_SEED").then(|| "abc".to_string()));
    assert_eq!(config.seed, 0);
}

#[test]
fn test_loader_finds_file_in_search_dir() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "seed = 11\n");

    let loader = ConfigLoader::with_search_dirs(vec![dir.path().to_path_buf()]);
    assert!(loader.find_config_file().is_some());
    let config = loader.load_with_env(None, no_env).unwrap();
    assert_eq!(config.seed, 11);
}

#[test]
fn test_loader_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let loader = ConfigLoader::with_search_dirs(vec![dir.path().to_path_buf()]);
    let config = loader.load_with_env(None, no_env).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_loader_explicit_path() {
    let dir = TempDir::new().unwrap();
    let custom = dir.path().join("custom.toml");
    fs::write(&custom, "log_level = \"warn\"\n").unwrap();

    let loader = ConfigLoader::with_search_dirs(Vec::new());
    let config = loader.load_with_env(Some(&custom), no_env).unwrap();
    assert_eq!(config.log_level, "warn");
}

#[test]
fn test_loader_missing_explicit_path() {
    let dir = TempDir::new().unwrap();
    let loader = ConfigLoader::with_search_dirs(Vec::new());
    let err = loader
        .load_with_env(Some(&dir.path().join("nope.toml")), no_env)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::CONFIG_NOT_FOUND);
}

#[test]
fn test_empty_output_dir_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "output_dir = \"\"\n");
    let loader = ConfigLoader::with_search_dirs(Vec::new());
    let err = loader.load_with_env(Some(&path), no_env).unwrap_err();
    assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_VALUE);
}
