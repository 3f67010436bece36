use super::context::AppContext;
use super::prompts;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use watchlog_config::{Config, API_KEY_ENV};

pub fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, output),
        crate::ConfigCommands::ApiKey { key } => configure_api_key(key, output),
        crate::ConfigCommands::Set { key, value } => set_value(&key, &value, output),
    }
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let config_file = ctx.paths.config_file();
    let api_key = ctx.credentials()?.resolve_api_key();
    let api_key_display = match &api_key {
        Some(key) if full => key.clone(),
        Some(key) => mask_string(key),
        None => "(not set)".to_string(),
    };
    let key_from_env = std::env::var(API_KEY_ENV).map(|v| !v.trim().is_empty()).unwrap_or(false);

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "config_file_exists": config_file.exists(),
            "data_dir": ctx.data_dir().display().to_string(),
            "catalog": {
                "base_url": ctx.config.catalog.base_url,
                "image_base_url": ctx.config.catalog.image_base_url,
                "timeout_secs": ctx.config.catalog.timeout_secs,
                "search_limit": ctx.config.catalog.search_limit,
                "api_key": api_key_display,
                "api_key_from_env": key_from_env,
            },
            "library": {
                "storage_key": ctx.config.library.storage_key,
            },
        }));
        return Ok(());
    }

    println!("\n{}", "Configuration".bright_cyan().bold());
    if !config_file.exists() {
        println!("{}", format!("No config file at {}, using defaults", config_file.display()).bright_black());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Value").fg(Color::Cyan).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Config File"), Cell::new(config_file.display())]);
    table.add_row(vec![Cell::new("Data Directory"), Cell::new(ctx.data_dir().display())]);
    table.add_row(vec![Cell::new("catalog.base_url"), Cell::new(&ctx.config.catalog.base_url)]);
    table.add_row(vec![
        Cell::new("catalog.image_base_url"),
        Cell::new(&ctx.config.catalog.image_base_url),
    ]);
    table.add_row(vec![
        Cell::new("catalog.timeout_secs"),
        Cell::new(ctx.config.catalog.timeout_secs),
    ]);
    table.add_row(vec![
        Cell::new("catalog.search_limit"),
        Cell::new(ctx.config.catalog.search_limit),
    ]);
    table.add_row(vec![
        Cell::new("library.storage_key"),
        Cell::new(&ctx.config.library.storage_key),
    ]);
    let key_source = if key_from_env { format!(" (from {})", API_KEY_ENV) } else { String::new() };
    table.add_row(vec![
        Cell::new("TMDB API Key"),
        Cell::new(format!("{}{}", api_key_display, key_source)),
    ]);
    println!("{}", table);
    Ok(())
}

fn configure_api_key(key: Option<String>, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;

    let key = match key {
        Some(key) => key,
        None => prompts::prompt_secret("TMDB API key")?,
    };
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(eyre!("API key cannot be empty"));
    }

    let mut store = ctx.credentials()?;
    store.set_api_key(key);
    store
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    output.success(format!("Saved TMDB API key to {}", store.path().display()));
    if std::env::var(API_KEY_ENV).is_ok() {
        output.warn(format!("{} is set and takes precedence over the stored key", API_KEY_ENV));
    }
    Ok(())
}

fn set_value(key: &str, value: &str, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let config_file = ctx.paths.config_file();

    let mut config: Config = ctx.config;
    config
        .set_value(key, value)
        .map_err(|e| eyre!("{}", e))?;
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Set {} = {}", key, value));
    Ok(())
}

/// Show only the last four characters of a secret
fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string("abcdef123456"), "********3456");
        assert_eq!(mask_string("abc"), "***");
        assert_eq!(mask_string(""), "");
    }
}
