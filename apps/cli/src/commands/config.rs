//! `config show | validate | path`.

use crate::cli::ConfigCommands;
use crate::config::AppConfig;
use crate::error::AppResult;

use super::Format;

/// `config` is already loaded and validated when this runs, so `validate`
/// only has to report success.
pub fn run(action: &ConfigCommands, config: &AppConfig, format: Format) -> AppResult<String> {
    match action {
        ConfigCommands::Show => match format {
            Format::Json => Ok(serde_json::to_string_pretty(config)?),
            Format::Text => config.to_toml(),
        },
        ConfigCommands::Validate => Ok("✓ Configuration is valid".to_string()),
        ConfigCommands::Path => Ok(AppConfig::default_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "no config directory on this platform".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_formats() {
        let config = AppConfig::default();

        let toml_text = run(&ConfigCommands::Show, &config, Format::Text).unwrap();
        assert_eq!(AppConfig::from_toml(&toml_text).unwrap(), config);

        let json = run(&ConfigCommands::Show, &config, Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["storage"]["storage_key"], "acai-pricing-data");
    }
}
