//! Runtime configuration, read once from the environment.

use anyhow::{bail, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Origin of the REST backend; the collection lives at `{base_url}/todos`.
    pub base_url: String,
}

impl Config {
    /// `TODOS_URL` overrides the default backend origin.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup("TODOS_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            bail!("TODOS_URL must be an http(s) URL, got {base_url:?}");
        }
        Ok(Self { base_url })
    }
}
