use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::Role;

/// Result type for composition rolls
pub type Result<T> = std::result::Result<T, RollError>;

/// Reasons a roll is rejected. Every variant aborts the whole roll; no
/// partial composition is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RollError {
    /// A role lock names an agent that is also excluded
    #[error("Locked agent {agent} is excluded. Remove it from the excluded list.")]
    LockedExcluded { role: Role, agent: String },

    /// A role lock names an unknown agent, or one that cannot play the role
    #[error("Locked agent {agent} cannot play {role}.")]
    LockRoleMismatch { role: Role, agent: String },

    /// The dive slot was handed an agent without the dive capability
    #[error(
        "Dive Duelist required. Locked duelist \"{agent}\" is not a dive duelist. Try: {suggestions}."
    )]
    DiveRequired {
        slot: String,
        agent: String,
        suggestions: String,
    },

    /// A lock would place an agent that an earlier slot already holds
    #[error("Locked agent {agent} already used by another slot ({slot}).")]
    LockCollision {
        slot: String,
        role: Role,
        agent: String,
    },

    /// Nothing eligible is left for a slot
    #[error("No available agents left for {slot} ({role}).")]
    PoolExhausted { slot: String, role: Role },

    /// Bookkeeping let the same agent into two slots
    #[error("Internal error: duplicate agent {agent} generated.")]
    DuplicatePick { agent: String },

    #[error("Unknown map: {0}")]
    UnknownMap(String),

    #[error("Catalog has no maps to roll from")]
    EmptyCatalog,
}

impl RollError {
    /// Role the failure is about, when there is one
    pub fn role(&self) -> Option<Role> {
        match self {
            RollError::LockedExcluded { role, .. }
            | RollError::LockRoleMismatch { role, .. }
            | RollError::LockCollision { role, .. }
            | RollError::PoolExhausted { role, .. } => Some(*role),
            RollError::DiveRequired { .. } => Some(Role::Duelist),
            _ => None,
        }
    }
}

/// Problems loading or validating a roller config
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}
