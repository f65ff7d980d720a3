//! Resolves base URLs, the organisation and credentials from the environment.

use std::fmt;

use url::Url;

use crate::error::{Error, Result};

pub const GITHUB_API_URL: &str = "GITHUB_API_URL";
pub const GITHUB_ORG: &str = "GITHUB_ORG";
pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const EXPIRE_API_URL: &str = "EXPIRE_API_URL";
pub const EXPIRE_API_TOKEN: &str = "EXPIRE_API_TOKEN";

/// Raw configuration values as found in the environment. Nothing is validated
/// until a command asks for the credentials it needs.
#[derive(Default)]
pub struct Config {
    github_api_url: Option<String>,
    org: Option<String>,
    github_token: Option<String>,
    expire_api_url: Option<String>,
    expire_api_token: Option<String>,
}

/// Everything a GitHub command needs to build a request
#[derive(Clone)]
pub struct GithubCredentials {
    pub api_url: Url,
    pub org: String,
    pub token: String,
}

/// Everything the `expire` command needs to build a request
#[derive(Clone)]
pub struct ExpireCredentials {
    pub api_url: Url,
    pub token: String,
}

impl Config {
    pub fn from_env() -> Config {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Config {
            github_api_url: get(GITHUB_API_URL),
            org: get(GITHUB_ORG),
            github_token: get(GITHUB_TOKEN),
            expire_api_url: get(EXPIRE_API_URL),
            expire_api_token: get(EXPIRE_API_TOKEN),
        }
    }

    /// Command-line values win over the environment
    pub fn with_overrides(mut self, access_token: Option<&String>, org: Option<&String>) -> Config {
        if let Some(access_token) = access_token.filter(|t| !t.is_empty()) {
            self.github_token = Some(access_token.clone());
        }
        if let Some(org) = org.filter(|o| !o.is_empty()) {
            self.org = Some(org.clone());
        }
        self
    }

    pub fn github(&self) -> Result<GithubCredentials> {
        let api_url = parse_base_url(GITHUB_API_URL, &self.github_api_url)?;
        let org = required(GITHUB_ORG, &self.org)?;
        let token = required(GITHUB_TOKEN, &self.github_token)?;
        Ok(GithubCredentials {
            api_url,
            org,
            token,
        })
    }

    pub fn expire(&self) -> Result<ExpireCredentials> {
        let api_url = parse_base_url(EXPIRE_API_URL, &self.expire_api_url)?;
        let token = required(EXPIRE_API_TOKEN, &self.expire_api_token)?;
        Ok(ExpireCredentials { api_url, token })
    }
}

fn required(variable: &'static str, value: &Option<String>) -> Result<String> {
    value
        .clone()
        .ok_or_else(|| Error::config(variable, "is not set"))
}

fn parse_base_url(variable: &'static str, value: &Option<String>) -> Result<Url> {
    let raw = required(variable, value)?;
    let url = Url::parse(raw.trim()).map_err(|e| Error::config(variable, format!("is not a valid URL: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::config(variable, "is not a valid base URL"));
    }
    Ok(url)
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("github_api_url", &self.github_api_url)
            .field("org", &self.org)
            .field("github_token", &redact(&self.github_token))
            .field("expire_api_url", &self.expire_api_url)
            .field("expire_api_token", &redact(&self.expire_api_token))
            .finish()
    }
}

impl fmt::Debug for GithubCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubCredentials")
            .field("api_url", &self.api_url.as_str())
            .field("org", &self.org)
            .field("token", &"***")
            .finish()
    }
}

impl fmt::Debug for ExpireCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpireCredentials")
            .field("api_url", &self.api_url.as_str())
            .field("token", &"***")
            .finish()
    }
}

fn redact(value: &Option<String>) -> Option<&'static str> {
    value.as_ref().map(|_| "***")
}
