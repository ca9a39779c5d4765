use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tempfile::tempdir;

use super::types::{ConfigFile, QueryConfig};
use super::{apply_config, load_config};
use crate::args::TesterArgs;
use crate::error::{AppError, ConfigError};

fn parse_cli(argv: &[&str]) -> Result<(TesterArgs, ArgMatches), String> {
    let matches = TesterArgs::command()
        .try_get_matches_from(argv)
        .map_err(|err| format!("parse failed: {}", err))?;
    let args = TesterArgs::from_arg_matches(&matches)
        .map_err(|err| format!("from matches failed: {}", err))?;
    Ok((args, matches))
}

#[test]
fn parse_toml_config_with_query_table() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("volley.toml");
    let content = r#"
url = "http://localhost:3000/api/incidents"
requests = 500
concurrency = 20
timeout = 8
delay = 25
headers = ["X-Env: staging"]

[query]
from = "2025-04-28 18:35:32"
to = "2025-04-29 23:59:59"
category = "all"
presets = ["HOUSE | FIRE", "OTHER | NEWS"]
limit = 50

[query.extra]
page = "1"
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = ConfigFile::read(&path).map_err(|err| err.to_string())?;
    if config.url.as_deref() != Some("http://localhost:3000/api/incidents") {
        return Err("Unexpected url".to_owned());
    }
    if config.requests != Some(500) || config.concurrency != Some(20) {
        return Err("Unexpected requests/concurrency".to_owned());
    }
    let query = config.query.ok_or("Expected query table")?;
    if query.presets.as_ref().map(Vec::len) != Some(2) {
        return Err(format!("Unexpected presets: {:?}", query.presets));
    }
    let extra = query.extra.ok_or("Expected extra table")?;
    if extra.get("page").map(String::as_str) != Some("1") {
        return Err("Unexpected extra query".to_owned());
    }
    Ok(())
}

#[test]
fn parse_json_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("volley.json");
    let content = r#"{
  "url": "http://localhost:3000",
  "concurrency": 4,
  "debug": true,
  "query": { "keywords": "smoke" }
}"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = ConfigFile::read(&path).map_err(|err| err.to_string())?;
    if config.concurrency != Some(4) || config.debug != Some(true) {
        return Err("Unexpected concurrency/debug".to_owned());
    }
    let keywords = config.query.and_then(|query| query.keywords);
    if keywords.as_deref() != Some("smoke") {
        return Err("Unexpected keywords".to_owned());
    }
    Ok(())
}

#[test]
fn unknown_extension_is_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("volley.yaml");
    std::fs::write(&path, "url: x").map_err(|err| format!("write failed: {}", err))?;
    if ConfigFile::read(&path).is_ok() {
        return Err("Expected unsupported extension error".to_owned());
    }
    Ok(())
}

#[test]
fn unknown_keys_are_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("volley.toml");
    std::fs::write(&path, "urll = \"http://localhost\"\n")
        .map_err(|err| format!("write failed: {}", err))?;
    if ConfigFile::read(&path).is_ok() {
        return Err("Expected unknown key to fail".to_owned());
    }
    Ok(())
}

#[test]
fn cli_values_win_over_config() -> Result<(), String> {
    let (mut args, matches) = parse_cli(&["volley", "-n", "7", "--category", "fire"])?;
    let config = ConfigFile {
        url: Some("http://localhost:9000".to_owned()),
        requests: Some(300),
        concurrency: Some(30),
        query: Some(QueryConfig {
            category: Some("all".to_owned()),
            keywords: Some("smoke".to_owned()),
            ..Default::default()
        }),
        ..ConfigFile::default()
    };

    apply_config(&mut args, &matches, &config).map_err(|err| err.to_string())?;

    if args.url.as_deref() != Some("http://localhost:9000") {
        return Err("Expected url from config".to_owned());
    }
    if args.requests.get() != 7 {
        return Err(format!("Expected CLI requests, got {}", args.requests.get()));
    }
    if args.concurrency.get() != 30 {
        return Err(format!(
            "Expected config concurrency, got {}",
            args.concurrency.get()
        ));
    }
    if args.search.category.as_deref() != Some("fire") {
        return Err("Expected CLI category".to_owned());
    }
    if args.search.keywords.as_deref() != Some("smoke") {
        return Err("Expected config keywords".to_owned());
    }
    Ok(())
}

#[test]
fn zero_requests_in_config_is_rejected() -> Result<(), String> {
    let (mut args, matches) = parse_cli(&["volley", "-u", "http://localhost"])?;
    let config = ConfigFile {
        requests: Some(0),
        ..ConfigFile::default()
    };
    if apply_config(&mut args, &matches, &config).is_ok() {
        return Err("Expected zero requests to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn invalid_config_header_is_rejected() -> Result<(), String> {
    let (mut args, matches) = parse_cli(&["volley", "-u", "http://localhost"])?;
    let config = ConfigFile {
        headers: Some(vec!["missing-colon".to_owned()]),
        ..ConfigFile::default()
    };
    if apply_config(&mut args, &matches, &config).is_ok() {
        return Err("Expected invalid header to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn explicit_config_path_is_loaded() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("custom.json");
    std::fs::write(&path, "{\"requests\": 12}").map_err(|err| format!("write failed: {}", err))?;

    let path_arg = path.to_string_lossy().into_owned();
    let config = load_config(Some(path_arg.as_str()))
        .map_err(|err| err.to_string())?
        .ok_or("Expected a config")?;
    if config.requests != Some(12) {
        return Err(format!("Unexpected requests: {:?}", config.requests));
    }
    Ok(())
}

#[test]
fn extension_is_checked_before_reading() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    match ConfigFile::read(&dir.path().join("volley.yaml")) {
        Err(ConfigError::UnsupportedExtension { ext }) if ext == "yaml" => Ok(()),
        Err(other) => Err(format!("Expected unsupported extension, got {}", other)),
        Ok(_) => Err("Expected unsupported extension error".to_owned()),
    }
}

#[test]
fn missing_explicit_config_is_a_config_app_error() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let missing = dir.path().join("none.toml");
    let missing_arg = missing.to_string_lossy().into_owned();

    let err = match load_config(Some(missing_arg.as_str())) {
        Err(err) => AppError::from(err),
        Ok(_) => return Err("Expected a missing config file to fail".to_owned()),
    };
    match err {
        AppError::Config(ConfigError::ReadConfig { path, .. }) if path == missing => Ok(()),
        other => Err(format!("Expected a config read error, got {}", other)),
    }
}

#[test]
fn invalid_config_value_is_a_config_app_error() -> Result<(), String> {
    let (mut args, matches) = parse_cli(&["volley", "-u", "http://localhost"])?;
    let config = ConfigFile {
        concurrency: Some(0),
        ..ConfigFile::default()
    };
    let err = match apply_config(&mut args, &matches, &config) {
        Err(err) => AppError::from(err),
        Ok(()) => return Err("Expected zero concurrency to be rejected".to_owned()),
    };
    match err {
        AppError::Config(ConfigError::FieldMustBePositive { field, .. }) if field == "concurrency" => {
            Ok(())
        }
        other => Err(format!("Expected a positive-field error, got {}", other)),
    }
}
