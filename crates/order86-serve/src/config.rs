//! Application configuration loaded from environment variables.

use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:3000").
    pub bind_addr: String,

    /// Base URL for canonical links and OG image URLs.
    /// e.g., "https://theorderof86.com"
    pub base_url: String,

    /// Site name shown in titles, OG tags, and the card footer.
    pub site_name: String,

    /// Document root for static files and portrait assets.
    pub site_root: PathBuf,

    /// Path to the bundled wizard data source.
    pub data_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional and default to local development values:
    /// - `ORDER86_BIND_ADDR`: bind address (default: "0.0.0.0:3000")
    /// - `ORDER86_BASE_URL`: base URL for links/OG tags
    ///   (default: "http://localhost:3000")
    /// - `ORDER86_SITE_NAME`: site name (default: "The Order of 86")
    /// - `ORDER86_SITE_ROOT`: static document root (default: "site")
    /// - `ORDER86_WIZARD_DATA`: wizard data source
    ///   (default: "data/wizards.json")
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("ORDER86_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let base_url = std::env::var("ORDER86_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        let site_name =
            std::env::var("ORDER86_SITE_NAME").unwrap_or_else(|_| "The Order of 86".to_string());

        let site_root =
            PathBuf::from(std::env::var("ORDER86_SITE_ROOT").unwrap_or_else(|_| "site".to_string()));

        let data_path = PathBuf::from(
            std::env::var("ORDER86_WIZARD_DATA").unwrap_or_else(|_| "data/wizards.json".to_string()),
        );

        tracing::info!(
            bind_addr = %bind_addr,
            base_url = %base_url,
            site_name = %site_name,
            site_root = %site_root.display(),
            data_path = %data_path.display(),
            "configuration loaded"
        );

        Ok(Self {
            bind_addr,
            base_url,
            site_name,
            site_root,
            data_path,
        })
    }

    /// The base URL's host, for display in the card footer.
    pub fn display_host(&self) -> &str {
        let trimmed = self
            .base_url
            .strip_prefix("https://")
            .or_else(|| self.base_url.strip_prefix("http://"))
            .unwrap_or(&self.base_url);
        trimmed.trim_end_matches('/')
    }
}
