//! Configuration loader for the overlay batch.
//!
//! Reads an optional YAML file into [`OverlayConfig`], expanding environment
//! variables with `${VAR}` and `${VAR:-default}` syntax, then applies command
//! line overrides. Missing sections keep their built-in defaults.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use products::OverlayConfig;

/// Values given on the command line; `None` keeps the file or default value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub fail_fast: bool,
}

/// Build the run configuration from an optional file plus overrides.
pub fn load_config(path: Option<&Path>, overrides: &Overrides) -> Result<OverlayConfig> {
    let mut config = match path {
        Some(path) => load_config_file(path)?,
        None => OverlayConfig::default(),
    };

    if let Some(dir) = &overrides.input_dir {
        config.input_dir = dir.clone();
    }
    if let Some(dir) = &overrides.output_dir {
        config.output_dir = dir.clone();
    }
    if overrides.fail_fast {
        config.isolate_failures = false;
    }

    config.input_dir = expand_home(&config.input_dir);
    config.output_dir = expand_home(&config.output_dir);

    config.validate().context("Invalid overlay configuration")?;
    Ok(config)
}

/// Load and parse a YAML config file with environment variable substitution.
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<OverlayConfig> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read config from {:?}", path.as_ref()))?;

    let expanded = expand_env_vars(&content)?;

    serde_yaml::from_str(&expanded)
        .with_context(|| format!("Failed to parse config YAML from {:?}", path.as_ref()))
}

/// `~/data` style paths are resolved against the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    }
}

// ============================================================================
// Environment Variable Expansion
// ============================================================================

/// Expand `${VAR}` and `${VAR:-default}` in YAML content.
fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = String::new();
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'

            let mut var_expr = String::new();
            let mut brace_count = 1;

            while brace_count > 0 {
                match chars.next() {
                    Some('{') => {
                        brace_count += 1;
                        var_expr.push('{');
                    }
                    Some('}') => {
                        brace_count -= 1;
                        if brace_count > 0 {
                            var_expr.push('}');
                        }
                    }
                    Some(c) => var_expr.push(c),
                    None => anyhow::bail!("Unclosed variable substitution: ${{{}", var_expr),
                }
            }

            result.push_str(&resolve_var_expr(&var_expr)?);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

/// Resolve `VAR` or `VAR:-default`; an empty variable takes the default.
fn resolve_var_expr(expr: &str) -> Result<String> {
    if let Some((var_name, default)) = expr.split_once(":-") {
        match std::env::var(var_name.trim()) {
            Ok(val) if !val.is_empty() => Ok(val),
            _ => Ok(default.to_string()),
        }
    } else {
        std::env::var(expr.trim()).with_context(|| format!("Environment variable {} not set", expr))
    }
}
