//! Runtime configuration injected by the host

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing an environment name
#[derive(Debug, Clone)]
pub struct ParseEnvironmentError(String);

impl fmt::Display for ParseEnvironmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid environment: {}", self.0)
    }
}

impl std::error::Error for ParseEnvironmentError {}

/// Deployment environment the interception layer runs in.
///
/// Development enables the diagnostic log lines emitted by the lifecycle
/// handlers; nothing else branches on it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl FromStr for Environment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            _ => Err(ParseEnvironmentError(s.to_string())),
        }
    }
}

/// Process-wide configuration shared by strategies and lifecycle handlers.
///
/// The version string doubles as the default cache-store identifier, so
/// bumping it on deploy namespaces new writes and marks every older store
/// for eviction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub version: String,
    pub environment: Environment,
}

impl RuntimeConfig {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            environment: Environment::Production,
        }
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Resolve the store identifier for an operation: an explicit name
    /// wins, otherwise the configured version is used verbatim.
    pub fn resolve_store(&self, explicit: Option<&str>) -> String {
        match explicit {
            Some(name) => name.to_string(),
            None => self.version.clone(),
        }
    }
}
