//! Environment configuration read once per cold start.
//!
//! - `IAM_ROLES_PAGE_SIZE`: optional `MaxItems` hint for each `ListRoles` call
//!   (1..=1000). Only changes how many pages are fetched, never the result.
//! - `LOG_FORMAT`: `json` for JSON lines, anything else for compact text.
//!
//! Region and credentials come from the standard `aws-config` chain.

use thiserror::Error;

use crate::runtime::contract::MAX_LIST_ROLES_PAGE_SIZE;

pub const PAGE_SIZE_ENV: &str = "IAM_ROLES_PAGE_SIZE";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListerConfig {
    pub page_size: Option<i32>,
    pub log_format: LogFormat,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("IAM_ROLES_PAGE_SIZE must be an integer, got '{0}'")]
    InvalidPageSize(String),
    #[error("IAM_ROLES_PAGE_SIZE must be between 1 and 1000, got {0}")]
    PageSizeOutOfRange(i64),
}

impl ListerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let page_size = lookup(PAGE_SIZE_ENV)
            .map(|raw| parse_page_size(&raw))
            .transpose()?
            .flatten();

        let log_format = match lookup(LOG_FORMAT_ENV) {
            Some(value) if value.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            page_size,
            log_format,
        })
    }
}

fn parse_page_size(raw: &str) -> Result<Option<i32>, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: i64 = trimmed
        .parse()
        .map_err(|_| ConfigError::InvalidPageSize(trimmed.to_string()))?;
    if !(1..=i64::from(MAX_LIST_ROLES_PAGE_SIZE)).contains(&value) {
        return Err(ConfigError::PageSizeOutOfRange(value));
    }

    // Range-checked above.
    Ok(Some(value as i32))
}
