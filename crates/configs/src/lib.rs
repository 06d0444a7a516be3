use std::path::Path;

use anyhow::{anyhow, Result};
use common::utils::logging::LogFormat;
use serde::Deserialize;

/// Environment variables consulted for the provider endpoint, in priority order.
pub const PROVIDER_URL_VARS: [&str; 2] = ["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"];
/// Environment variables consulted for the provider public key, in priority order.
pub const PROVIDER_KEY_VARS: [&str; 2] = ["SUPABASE_ANON_KEY", "NEXT_PUBLIC_SUPABASE_ANON_KEY"];

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Identity provider endpoint and public (anon) key.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProviderConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub anon_key: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

/// Path of the TOML file: `CONFIG_PATH`, or `config.toml` in the working directory.
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

/// Load the config file if present; a missing file yields the defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = config_path();
    if !Path::new(&path).exists() {
        return Ok(AppConfig::default());
    }
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    from_toml_str(&content)
}

pub fn from_toml_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load, merge the process environment, and validate. Fails when the
    /// provider endpoint or key is missing.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.apply_env(|key| std::env::var(key).ok());
        self.server.normalize()?;
        self.provider.normalize();
        self.provider.validate()?;
        Ok(())
    }

    /// Merge environment values through `lookup`.
    ///
    /// Provider fields are only filled when the file left them empty; server
    /// bind settings and the log format are overridden when set.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| {
            keys.iter()
                .filter_map(|&k| lookup(k))
                .find(|v| !v.trim().is_empty())
        };

        if self.provider.url.trim().is_empty() {
            if let Some(url) = first(&PROVIDER_URL_VARS[..]) {
                self.provider.url = url;
            }
        }
        if self.provider.anon_key.trim().is_empty() {
            if let Some(key) = first(&PROVIDER_KEY_VARS[..]) {
                self.provider.anon_key = key;
            }
        }
        if let Some(host) = first(&["SERVER_HOST"][..]) {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT").and_then(|p| p.trim().parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.trim().parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(format) = lookup("LOG_FORMAT").as_deref().and_then(LogFormat::parse) {
            self.logging.format = format;
        }
    }

    /// `host:port` string suitable for `SocketAddr` parsing.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl ProviderConfig {
    fn normalize(&mut self) {
        self.url = self.url.trim().trim_end_matches('/').to_string();
        self.anon_key = self.anon_key.trim().to_string();
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(anyhow!(
                "provider.url is empty; set it in config.toml or via SUPABASE_URL"
            ));
        }
        let lower = self.url.to_ascii_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("provider.url must start with http:// or https://"));
        }
        if self.anon_key.is_empty() {
            return Err(anyhow!(
                "provider.anon_key is empty; set it in config.toml or via SUPABASE_ANON_KEY"
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn parses_full_file() {
        let cfg = from_toml_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            worker_threads = 2

            [provider]
            url = "https://abc.supabase.co/"
            anon_key = "public-key"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.provider.anon_key, "public-key");
        assert_eq!(cfg.logging.format, LogFormat::Json);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = from_toml_str("").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.provider.url.is_empty());
        assert_eq!(cfg.logging.format, LogFormat::Compact);
    }

    #[test]
    fn env_fills_missing_provider() {
        let mut cfg = AppConfig::default();
        cfg.apply_env(env(&[
            ("NEXT_PUBLIC_SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]));
        assert_eq!(cfg.provider.url, "https://abc.supabase.co");
        assert_eq!(cfg.provider.anon_key, "anon");
    }

    #[test]
    fn primary_env_var_wins_over_alias() {
        let mut cfg = AppConfig::default();
        cfg.apply_env(env(&[
            ("SUPABASE_URL", "https://primary.example"),
            ("NEXT_PUBLIC_SUPABASE_URL", "https://alias.example"),
        ]));
        assert_eq!(cfg.provider.url, "https://primary.example");
    }

    #[test]
    fn file_values_are_not_replaced_by_env() {
        let mut cfg = from_toml_str("[provider]\nurl = \"https://file.example\"\nanon_key = \"k\"").unwrap();
        cfg.apply_env(env(&[("SUPABASE_URL", "https://env.example")]));
        assert_eq!(cfg.provider.url, "https://file.example");
    }

    #[test]
    fn server_env_overrides() {
        let mut cfg = AppConfig::default();
        cfg.apply_env(env(&[("SERVER_PORT", "9100"), ("LOG_FORMAT", "json"), ("SERVER_HOST", "0.0.0.0")]));
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9100");
        assert_eq!(cfg.logging.format, LogFormat::Json);
    }

    #[test]
    fn missing_provider_fails_validation() {
        let cfg = ProviderConfig::default();
        let err = cfg.validate().unwrap_err().to_string();
        assert!(err.contains("provider.url"), "{err}");

        let cfg = ProviderConfig { url: "https://abc.supabase.co".into(), anon_key: String::new() };
        let err = cfg.validate().unwrap_err().to_string();
        assert!(err.contains("anon_key"), "{err}");
    }

    #[test]
    fn provider_url_scheme_checked() {
        let cfg = ProviderConfig { url: "abc.supabase.co".into(), anon_key: "k".into() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn normalize_trims_trailing_slash_and_defaults_workers() {
        let mut cfg = from_toml_str(
            "[server]\nhost = \"\"\nport = 8081\nworker_threads = 0\n[provider]\nurl = \" https://abc.supabase.co/ \"\nanon_key = \"k\"",
        )
        .unwrap();
        cfg.server.normalize().unwrap();
        cfg.provider.normalize();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.provider.url, "https://abc.supabase.co");
        assert!(cfg.provider.validate().is_ok());
    }

    #[test]
    fn zero_port_rejected() {
        let mut s = ServerConfig { host: "127.0.0.1".into(), port: 0, worker_threads: None };
        assert!(s.normalize().is_err());
    }
}
