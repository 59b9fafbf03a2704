//! Server configuration parsed from environment variables.

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub use summary::DEFAULT_TITLE;
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// A configuration variable was set to an unusable value.
#[derive(Debug, thiserror::Error)]
#[error("invalid {var}={value:?}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Heading and `<title>` of the summary page.
    pub title: String,
    /// Largest accepted request body; larger payloads get `413`.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            title: DEFAULT_TITLE.to_owned(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `HOST`: bind address, default `0.0.0.0`
    /// - `PORT`: default 3000
    /// - `UTIL_REPORT_TITLE`: page title, default `Utilization Summary`
    /// - `UTIL_REPORT_MAX_BODY_BYTES`: default 1 MiB
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `PORT` or `UTIL_REPORT_MAX_BODY_BYTES` is
    /// set but not a positive integer in range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = non_empty(lookup("HOST")).unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = parse_port(lookup("PORT").as_deref())?;
        let title = non_empty(lookup("UTIL_REPORT_TITLE")).unwrap_or_else(|| DEFAULT_TITLE.to_owned());
        let max_body_bytes = parse_max_body_bytes(lookup("UTIL_REPORT_MAX_BODY_BYTES").as_deref())?;

        Ok(Self { host, port, title, max_body_bytes })
    }

    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_owned()).filter(|value| !value.is_empty())
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_PORT);
    };
    match raw.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ConfigError { var: "PORT", value: raw.to_owned(), reason: "expected an integer in 1..=65535" }),
    }
}

fn parse_max_body_bytes(raw: Option<&str>) -> Result<usize, ConfigError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_MAX_BODY_BYTES);
    };
    match raw.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(ConfigError {
            var: "UTIL_REPORT_MAX_BODY_BYTES",
            value: raw.to_owned(),
            reason: "expected a positive byte count",
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
