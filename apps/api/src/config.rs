use anyhow::{Context, Result};

use crate::layout::renderer::{clamp_zoom, DEFAULT_ZOOM};

pub const DEFAULT_AUTOSAVE_DEBOUNCE_MS: u64 = 2000;
pub const DEFAULT_EXPORT_SCALE: f32 = 1.5;

/// Application configuration loaded from environment variables.
/// Everything has a default; without `DATABASE_URL` documents live in memory.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Quiet period before an edited document is persisted.
    pub autosave_debounce_ms: u64,
    /// Display zoom used when a preview request does not name one.
    pub preview_zoom: f32,
    /// Pixel ratio handed to the rasterizer on export.
    pub export_scale: f32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: None,
            port: 8080,
            rust_log: "info".to_string(),
            autosave_debounce_ms: DEFAULT_AUTOSAVE_DEBOUNCE_MS,
            preview_zoom: DEFAULT_ZOOM,
            export_scale: DEFAULT_EXPORT_SCALE,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            autosave_debounce_ms: parse_env("AUTOSAVE_DEBOUNCE_MS", defaults.autosave_debounce_ms)?,
            preview_zoom: clamp_zoom(parse_env("PREVIEW_ZOOM", defaults.preview_zoom)?),
            export_scale: parse_env("EXPORT_SCALE", defaults.export_scale)?,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.autosave_debounce_ms, 2000);
        assert_eq!(config.preview_zoom, 0.8);
        assert_eq!(config.export_scale, 1.5);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u64 = parse_env("CV_API_TEST_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }
}
