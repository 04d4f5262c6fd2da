//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AssetportConfig;
use crate::domain::errors::AssetportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AssetportConfig
/// 4. Applies environment variable overrides (ASSETPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use assetport::config::loader::load_config;
///
/// let config = load_config("assetport.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AssetportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AssetportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AssetportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Loads configuration from a TOML file if it exists, defaults otherwise
///
/// Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<AssetportConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    let mut config = AssetportConfig::default();
    apply_env_overrides(&mut config)?;
    config.validate().map_err(|e| {
        AssetportError::Configuration(format!("Configuration validation failed: {}", e))
    })?;
    Ok(config)
}

/// Parses, overrides and validates configuration text
pub fn load_config_from_str(contents: &str) -> Result<AssetportConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: AssetportConfig = toml::from_str(&contents)
        .map_err(|e| AssetportError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        AssetportError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| AssetportError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(AssetportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using ASSETPORT_* prefix
///
/// Environment variables follow the pattern: ASSETPORT_<SECTION>_<KEY>
/// For example: ASSETPORT_SERVER_PORT, ASSETPORT_EXPORT_REVEAL_FOLDER
fn apply_env_overrides(config: &mut AssetportConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("ASSETPORT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Server overrides
    if let Ok(val) = std::env::var("ASSETPORT_SERVER_HOST") {
        config.server.host = val;
    }
    if let Ok(val) = std::env::var("ASSETPORT_SERVER_PORT") {
        config.server.port = val.parse().map_err(|_| {
            AssetportError::Configuration(format!("ASSETPORT_SERVER_PORT is not a port: {val}"))
        })?;
    }
    if let Ok(val) = std::env::var("ASSETPORT_SERVER_DOMAIN") {
        config.server.domain = val;
    }

    // Export overrides
    if let Ok(val) = std::env::var("ASSETPORT_EXPORT_DEFAULT_FORMAT") {
        config.export.default_format = val;
    }
    if let Ok(val) = std::env::var("ASSETPORT_EXPORT_REVEAL_FOLDER") {
        config.export.reveal_folder = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("ASSETPORT_EXPORT_ASSET_DIR_SUFFIX") {
        config.export.asset_dir_suffix = val;
    }
    if let Ok(val) = std::env::var("ASSETPORT_EXPORT_UNSAVED_BASE_DIR") {
        config.export.unsaved_base_dir = Some(val);
    }
    if let Ok(val) = std::env::var("ASSETPORT_EXPORT_TEMP_DIR") {
        config.export.temp_dir = Some(val);
    }
    if let Ok(val) = std::env::var("ASSETPORT_EXPORT_MAX_DIMENSION") {
        config.export.max_dimension = val.parse().map_err(|_| {
            AssetportError::Configuration(format!(
                "ASSETPORT_EXPORT_MAX_DIMENSION is not a pixel count: {val}"
            ))
        })?;
    }

    // Host overrides
    if let Ok(val) = std::env::var("ASSETPORT_HOST_ACTIVE_DOCUMENT") {
        if let Ok(id) = val.parse() {
            config.host.active_document = Some(id);
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("ASSETPORT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("ASSETPORT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("ASSETPORT_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("ASSETPORT_LOADER_TEST_VAR", "test_value");
        let input = "unsaved_base_dir = \"${ASSETPORT_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "unsaved_base_dir = \"test_value\"\n");
        std::env::remove_var("ASSETPORT_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("ASSETPORT_LOADER_MISSING_VAR");
        let input = "temp_dir = \"${ASSETPORT_LOADER_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# uses ${ASSETPORT_LOADER_NEVER_SET}\nport = 1";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${ASSETPORT_LOADER_NEVER_SET}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[server]
port = 60000

[export]
default_format = "jpg"
reveal_folder = false

[[host.documents]]
id = 1
path = "/tmp/poster.png"

[[host.documents.layers]]
id = 10
name = "title"
bounds = [0, 0, 100, 40]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.server.port, 60000);
        assert_eq!(config.export.default_format, "jpg");
        assert!(!config.export.reveal_folder);
        assert_eq!(config.host.documents.len(), 1);
        assert_eq!(config.host.documents[0].layers[0].bounds, [0, 0, 100, 40]);
    }

    #[test]
    fn test_load_config_or_default_without_file() {
        let config = load_config_or_default("definitely-missing-assetport.toml").unwrap();
        assert_eq!(config.export.default_format, "png");
    }
}
