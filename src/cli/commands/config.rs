//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager, MatrixFormat, LOCAL_CONFIG_NAME};
use crate::error::{MatcacheError, MatcacheResult};
use crate::linalg::InvertMethod;
use crate::ui::{self, UiContext};
use clap::ValueEnum;
use tokio::fs;

const VALID_KEYS: [&str; 6] = [
    "general.verbose",
    "general.log_format",
    "solver.method",
    "solver.tolerance",
    "output.format",
    "output.precision",
];

/// Execute the config command
pub async fn execute(args: ConfigArgs, config: &Config, manager: &ConfigManager) -> MatcacheResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value, local }) => {
            if local {
                set_local_value(&key, &value).await?
            } else {
                set_value(manager, &key, &value).await?
            }
        }
    }

    Ok(())
}

fn show_config(config: &Config) -> MatcacheResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> MatcacheResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;

    ui::step_ok_detail(
        &ctx,
        "Configuration initialized",
        &path.display().to_string(),
    );

    Ok(())
}

async fn set_value(manager: &ConfigManager, key: &str, value: &str) -> MatcacheResult<()> {
    let ctx = UiContext::detect();

    // Edit the global file alone so local overrides are not baked into it
    let mut config = manager.load().await?;
    if let Err(e) = apply_value(&mut config, key, value) {
        if matches!(e, MatcacheError::User(ref msg) if msg.starts_with("Unknown config key")) {
            ui::step_error_detail(&ctx, "Unknown config key", key);
            ui::remark(&ctx, "Valid keys:");
            print_valid_keys();
        }
        return Err(e);
    }

    manager.save(&config).await?;
    ui::step_ok(&ctx, &format!("Set {} = {}", key, value));

    Ok(())
}

async fn set_local_value(key: &str, value: &str) -> MatcacheResult<()> {
    let ctx = UiContext::detect();

    let cwd =
        std::env::current_dir().map_err(|e| MatcacheError::io("getting current directory", e))?;
    let local_path = cwd.join(LOCAL_CONFIG_NAME);

    // Validate key and value before touching the file
    apply_value(&mut Config::default(), key, value)?;

    // Load existing local config or start with an empty TOML table
    let mut doc: toml::Value = if local_path.exists() {
        let content = fs::read_to_string(&local_path)
            .await
            .map_err(|e| MatcacheError::io(format!("reading {}", local_path.display()), e))?;
        content
            .parse()
            .map_err(|e: toml::de::Error| MatcacheError::ConfigInvalid {
                path: local_path.clone(),
                reason: e.to_string(),
            })?
    } else {
        toml::Value::Table(toml::map::Map::new())
    };

    set_toml_value(&mut doc, key, value)?;

    // Write back only the keys the user has explicitly set
    let content = toml::to_string_pretty(&doc)?;
    fs::write(&local_path, content)
        .await
        .map_err(|e| MatcacheError::io(format!("writing {}", local_path.display()), e))?;

    ui::step_ok(
        &ctx,
        &format!("Set {} = {} in {}", key, value, local_path.display()),
    );

    Ok(())
}

/// Parse `value` for the dot-separated `key` and store it in `config`
fn apply_value(config: &mut Config, key: &str, value: &str) -> MatcacheResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "verbose"] => config.general.verbose = parse_bool(value)?,
        ["general", "log_format"] => config.general.log_format = parse_log_format(value)?,

        ["solver", "method"] => config.solver.method = parse_enum::<InvertMethod>(value)?,
        ["solver", "tolerance"] => config.solver.tolerance = parse_tolerance(value)?,

        ["output", "format"] => config.output.format = parse_enum::<MatrixFormat>(value)?,
        ["output", "precision"] => config.output.precision = parse_usize(value)?,

        _ => return Err(MatcacheError::User(format!("Unknown config key: {}", key))),
    }

    Ok(())
}

/// Set a dot-separated key in a TOML value tree, creating intermediate tables as needed.
fn set_toml_value(doc: &mut toml::Value, key: &str, value: &str) -> MatcacheResult<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let (leaf, parents) = parts
        .split_last()
        .ok_or_else(|| MatcacheError::User(format!("Invalid config key: {}", key)))?;

    let mut current = doc;
    for &part in parents {
        current = current
            .as_table_mut()
            .ok_or_else(|| MatcacheError::User(format!("Expected table at key: {}", part)))?
            .entry(part)
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }

    let table = current
        .as_table_mut()
        .ok_or_else(|| MatcacheError::User(format!("Expected table for key: {}", key)))?;

    let toml_value = if let Ok(b) = value.parse::<bool>() {
        toml::Value::Boolean(b)
    } else if let Ok(n) = value.parse::<i64>() {
        toml::Value::Integer(n)
    } else if let Ok(f) = value.parse::<f64>() {
        toml::Value::Float(f)
    } else {
        toml::Value::String(value.to_string())
    };

    table.insert((*leaf).to_string(), toml_value);
    Ok(())
}

fn parse_bool(value: &str) -> MatcacheResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(MatcacheError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}

fn parse_usize(value: &str) -> MatcacheResult<usize> {
    value
        .parse()
        .map_err(|_| MatcacheError::User(format!("Invalid number: {}", value)))
}

fn parse_tolerance(value: &str) -> MatcacheResult<f64> {
    match value.parse::<f64>() {
        Ok(t) if t.is_finite() && t >= 0.0 => Ok(t),
        _ => Err(MatcacheError::User(format!(
            "Invalid tolerance: {}. Use a finite non-negative number",
            value
        ))),
    }
}

fn parse_log_format(value: &str) -> MatcacheResult<String> {
    match value {
        "text" | "json" => Ok(value.to_string()),
        _ => Err(MatcacheError::User(format!(
            "Invalid log format: {}. Use text/json",
            value
        ))),
    }
}

fn parse_enum<T: ValueEnum>(value: &str) -> MatcacheResult<T> {
    T::from_str(value, true).map_err(|_| {
        let choices: Vec<String> = T::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|p| p.get_name().to_string())
            .collect();
        MatcacheError::User(format!(
            "Invalid value: {}. Use one of: {}",
            value,
            choices.join(", ")
        ))
    })
}

fn print_valid_keys() {
    for key in VALID_KEYS {
        eprintln!("  {}", key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_value_sets_known_keys() {
        let mut config = Config::default();
        apply_value(&mut config, "solver.method", "gauss-jordan").unwrap();
        apply_value(&mut config, "solver.tolerance", "1e-6").unwrap();
        apply_value(&mut config, "output.format", "json").unwrap();
        apply_value(&mut config, "output.precision", "6").unwrap();
        apply_value(&mut config, "general.verbose", "yes").unwrap();

        assert_eq!(config.solver.method, InvertMethod::GaussJordan);
        assert_eq!(config.solver.tolerance, 1e-6);
        assert_eq!(config.output.format, MatrixFormat::Json);
        assert_eq!(config.output.precision, 6);
        assert!(config.general.verbose);
    }

    #[test]
    fn every_valid_key_is_accepted() {
        let samples = ["true", "json", "lu", "0.5", "table", "3"];
        for (key, value) in VALID_KEYS.iter().zip(samples) {
            apply_value(&mut Config::default(), key, value).unwrap();
        }
    }

    #[test]
    fn apply_value_rejects_bad_input() {
        let mut config = Config::default();
        assert!(apply_value(&mut config, "solver.method", "qr").is_err());
        assert!(apply_value(&mut config, "solver.tolerance", "-1").is_err());
        assert!(apply_value(&mut config, "solver.tolerance", "inf").is_err());
        assert!(apply_value(&mut config, "general.log_format", "xml").is_err());
        assert!(apply_value(&mut config, "vm.name", "x").is_err());
    }

    #[test]
    fn set_toml_value_creates_tables() {
        let mut doc = toml::Value::Table(toml::map::Map::new());
        set_toml_value(&mut doc, "solver.tolerance", "1e-6").unwrap();
        set_toml_value(&mut doc, "solver.method", "lu").unwrap();
        set_toml_value(&mut doc, "output.precision", "2").unwrap();

        let config: Config = doc.try_into().unwrap();
        assert_eq!(config.solver.tolerance, 1e-6);
        assert_eq!(config.solver.method, InvertMethod::Lu);
        assert_eq!(config.output.precision, 2);
    }
}
