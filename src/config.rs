use crate::error::{CropcastError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub openweathermap: OpenWeatherMapConfig,
    pub market: MarketConfig,
    #[serde(default)]
    pub agronomy: AgronomyConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    #[serde(default = "default_owm_base_url")]
    pub base_url: String,
}

fn default_owm_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".into()
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketConfig {
    /// Commodity price ticker page to scrape.
    pub url: String,
    #[serde(default = "default_refresh_minutes")]
    pub refresh_minutes: u64,
}

fn default_refresh_minutes() -> u64 {
    60
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct AgronomyConfig {
    /// Base temperature for growing-degree-day calculations.
    #[serde(default = "default_base_temp")]
    pub base_temp_c: f64,
}

impl Default for AgronomyConfig {
    fn default() -> Self {
        Self {
            base_temp_c: default_base_temp(),
        }
    }
}

fn default_base_temp() -> f64 {
    10.0
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(CropcastError::Config(format!(
                "Config file not found at {:?}. Copy config/config.yaml.example to get started.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| CropcastError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| CropcastError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        // Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("cropcast").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        // Return XDG path as the default (will trigger "not found" in load)
        let default_path = dirs::config_dir()
            .ok_or_else(|| CropcastError::Config("Cannot determine config directory".into()))?
            .join("cropcast")
            .join("config.yaml");
        Ok(default_path)
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config_with_defaults() {
        let yaml = r#"
openweathermap:
  api_key: test_key
market:
  url: https://example.com/prices
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.market.refresh_minutes, 60);
        assert_eq!(config.agronomy.base_temp_c, 10.0);
        assert!(config.openweathermap.base_url.contains("openweathermap.org"));
    }

    #[test]
    fn substitutes_environment_variables() {
        std::env::set_var("CROPCAST_TEST_KEY", "secret123");
        let content = "api_key: ${CROPCAST_TEST_KEY}";
        let result = Config::substitute_env_vars(content);
        assert_eq!(result, "api_key: secret123");
    }

    #[test]
    fn leaves_unknown_variables_untouched() {
        let content = "api_key: ${CROPCAST_DEFINITELY_UNSET_VAR}";
        let result = Config::substitute_env_vars(content);
        assert_eq!(result, content);
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = OpenWeatherMapConfig {
            api_key: "supersecret".into(),
            base_url: default_owm_base_url(),
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("supersecret"));
        assert!(rendered.contains("REDACTED"));
    }
}
