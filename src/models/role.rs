//! Front-of-house role model.
//!
//! Servers and bartenders are treated differently at several points of the
//! tip-out calculation, so the role is a closed enum matched exhaustively
//! rather than a free-form string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The role a front-of-house worker held during a service period.
///
/// # Example
///
/// ```
/// use tip_engine::models::Role;
///
/// let role: Role = "bartender".parse().unwrap();
/// assert_eq!(role, Role::Bartender);
/// assert!("host".parse::<Role>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Table server; pays into the kitchen pool and the bartender pool.
    Server,
    /// Bartender; pays into the kitchen pool and receives a bartender pool share.
    Bartender,
}

impl Role {
    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Server => "server",
            Role::Bartender => "bartender",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "server" => Ok(Role::Server),
            "bartender" => Ok(Role::Bartender),
            _ => Err(EngineError::InvalidRole {
                role: s.to_string(),
            }),
        }
    }
}
