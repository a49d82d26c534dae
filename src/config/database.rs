// ABOUTME: Database configuration for the read-only SQLite catalog source
// ABOUTME: Resolves the database URL from the CLI, DATABASE_URL, or the backend default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

use macrofit_intelligence::ConfigError;
use serde::{Deserialize, Serialize};

/// Database used when neither the CLI nor the environment names one
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./backend/database.db";

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// A bare path is treated as a `SQLite` file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for empty or non-`SQLite` URLs
    pub fn parse_url(s: &str) -> Result<Self, ConfigError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ConfigError::Parse("Database URL is empty".to_owned()));
        }

        if let Some(rest) = s.strip_prefix("sqlite:") {
            let path_str = rest.strip_prefix("//").unwrap_or(rest);
            return match path_str {
                ":memory:" => Ok(Self::Memory),
                "" => Err(ConfigError::Parse(format!("Missing SQLite path in {s:?}"))),
                path => Ok(Self::SQLite {
                    path: PathBuf::from(path),
                }),
            };
        }

        if s.contains("://") {
            return Err(ConfigError::Parse(format!(
                "Unsupported database URL {s:?}: only SQLite is supported"
            )));
        }

        Ok(Self::SQLite {
            path: PathBuf::from(s),
        })
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./backend/database.db"),
        }
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Catalog database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Pool size; reads are sequential so one connection suffices
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DatabaseUrl::default(),
            max_connections: 1,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for an explicit URL
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            url: DatabaseUrl::parse_url(url)?,
            ..Self::default()
        })
    }

    /// Resolve the URL: explicit value, then `DATABASE_URL`, then the default
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen URL cannot be parsed
    pub fn resolve(explicit: Option<&str>) -> Result<Self, ConfigError> {
        match explicit {
            Some(url) => Self::from_url(url),
            None => match env::var("DATABASE_URL") {
                Ok(url) => Self::from_url(&url),
                Err(_) => Self::from_url(DEFAULT_DATABASE_URL),
            },
        }
    }
}
