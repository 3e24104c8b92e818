use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    pub default_grid_size: usize,
    pub min_grid_size: usize,
    pub max_grid_size: usize,
    pub max_words: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_grid_size: 8,
            min_grid_size: 6,
            max_grid_size: 20,
            max_words: 50,
        }
    }
}

impl GeneratorConfig {
    fn validate(&self) -> Result<()> {
        ensure!(self.min_grid_size >= 1, "MIN_GRID_SIZE must be at least 1");
        ensure!(
            self.min_grid_size <= self.default_grid_size
                && self.default_grid_size <= self.max_grid_size,
            "grid sizes must satisfy MIN_GRID_SIZE <= DEFAULT_GRID_SIZE <= MAX_GRID_SIZE (got {} <= {} <= {})",
            self.min_grid_size,
            self.default_grid_size,
            self.max_grid_size
        );
        ensure!(self.max_words >= 1, "MAX_WORDS must be at least 1");
        Ok(())
    }
}

/// Read a variable, falling back to `default` when unset
fn var_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .ok()
            .with_context(|| format!("{} must be a number", key)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: var_or("PORT", 3000)?,
        };

        let defaults = GeneratorConfig::default();
        let generator = GeneratorConfig {
            default_grid_size: var_or("DEFAULT_GRID_SIZE", defaults.default_grid_size)?,
            min_grid_size: var_or("MIN_GRID_SIZE", defaults.min_grid_size)?,
            max_grid_size: var_or("MAX_GRID_SIZE", defaults.max_grid_size)?,
            max_words: var_or("MAX_WORDS", defaults.max_words)?,
        };
        generator.validate()?;

        Ok(Config { server, generator })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
