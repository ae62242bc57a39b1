//! Render and server configuration parsed from environment variables.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DPI: u32 = 300;
pub const DEFAULT_FIGURE_WIDTH_IN: f64 = 12.0;
pub const DEFAULT_FIGURE_HEIGHT_IN: f64 = 3.0;
pub const DEFAULT_FONT_FAMILY: &str = "DejaVu Sans";
pub const DEFAULT_MAX_INPUT_BYTES: usize = 64 * 1024;
pub const DEFAULT_MAX_CONSTRUCTS: usize = 32;

const MIN_DPI: u32 = 10;
const MAX_DPI: u32 = 1200;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key}: cannot parse `{value}`")]
    Parse { key: &'static str, value: String },
    #[error("{key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub dpi: u32,
    pub figure_width_in: f64,
    pub figure_height_in: f64,
    pub font_family: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            figure_width_in: DEFAULT_FIGURE_WIDTH_IN,
            figure_height_in: DEFAULT_FIGURE_HEIGHT_IN,
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
        }
    }
}

impl RenderConfig {
    /// Build render config from environment variables.
    ///
    /// Optional:
    /// - `GENECIRCUIT_DPI`: default 300, between 10 and 1200
    /// - `GENECIRCUIT_FIGURE_WIDTH_IN`: default 12.0
    /// - `GENECIRCUIT_FIGURE_HEIGHT_IN`: default 3.0
    /// - `GENECIRCUIT_FONT_FAMILY`: default `DejaVu Sans`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but unparseable or out
    /// of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Same as [`RenderConfig::from_env`] with a custom variable source.
    ///
    /// # Errors
    ///
    /// See [`RenderConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = Self {
            dpi: parse_or(&lookup, "GENECIRCUIT_DPI", DEFAULT_DPI)?,
            figure_width_in: parse_or(&lookup, "GENECIRCUIT_FIGURE_WIDTH_IN", DEFAULT_FIGURE_WIDTH_IN)?,
            figure_height_in: parse_or(&lookup, "GENECIRCUIT_FIGURE_HEIGHT_IN", DEFAULT_FIGURE_HEIGHT_IN)?,
            font_family: lookup("GENECIRCUIT_FONT_FAMILY")
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_owned()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending variable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_DPI..=MAX_DPI).contains(&self.dpi) {
            return Err(ConfigError::Invalid {
                key: "GENECIRCUIT_DPI",
                reason: format!("must be between {MIN_DPI} and {MAX_DPI}, got {}", self.dpi),
            });
        }
        for (key, value) in [
            ("GENECIRCUIT_FIGURE_WIDTH_IN", self.figure_width_in),
            ("GENECIRCUIT_FIGURE_HEIGHT_IN", self.figure_height_in),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid { key, reason: format!("must be a positive number, got {value}") });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub max_input_bytes: usize,
    pub max_constructs: usize,
    pub render: RenderConfig,
}

impl ServerConfig {
    /// Build server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `GENECIRCUIT_MAX_INPUT_BYTES`: request body limit, default 65536
    /// - `GENECIRCUIT_MAX_CONSTRUCTS`: constructs per request, default 32
    /// - every variable read by [`RenderConfig::from_env`]
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Same as [`ServerConfig::from_env`] with a custom variable source.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let max_input_bytes = parse_or(&lookup, "GENECIRCUIT_MAX_INPUT_BYTES", DEFAULT_MAX_INPUT_BYTES)?;
        let max_constructs = parse_or(&lookup, "GENECIRCUIT_MAX_CONSTRUCTS", DEFAULT_MAX_CONSTRUCTS)?;
        for (key, value) in [
            ("GENECIRCUIT_MAX_INPUT_BYTES", max_input_bytes),
            ("GENECIRCUIT_MAX_CONSTRUCTS", max_constructs),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid { key, reason: "must be at least 1".into() });
            }
        }
        let render = RenderConfig::from_lookup(&lookup)?;
        Ok(Self { port, max_input_bytes, max_constructs, render })
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::Parse { key, value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
