// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Pennywise", "pennywise"));

pub const DATA_DIR_ENV: &str = "PENNYWISE_DATA_DIR";
pub const AUTH_URL_ENV: &str = "PENNYWISE_AUTH_URL";
pub const AUTH_KEY_ENV: &str = "PENNYWISE_AUTH_KEY";

/// Where the auth provider lives. Both values are required to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub url: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub auth: Option<AuthConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let data_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => ProjectDirs::from(APP.0, APP.1, APP.2)
                .context("Could not determine platform-specific data dir")?
                .data_dir()
                .to_path_buf(),
        };
        let auth = match (std::env::var(AUTH_URL_ENV), std::env::var(AUTH_KEY_ENV)) {
            (Ok(url), Ok(api_key)) if !url.trim().is_empty() => Some(AuthConfig {
                url: url.trim().trim_end_matches('/').to_string(),
                api_key,
            }),
            _ => None,
        };
        Ok(Self { data_dir, auth })
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        fs::create_dir_all(&self.data_dir).context("Failed to create data dir")?;
        Ok(self.data_dir.join("pennywise.sqlite"))
    }
}
