//! Block-explorer configuration models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::errors::ResolutionError;

/// What an explorer link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    Tx,
    Address,
}

impl PathKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathKind::Tx => "tx",
            PathKind::Address => "address",
        }
    }
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathKind {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tx" => Ok(PathKind::Tx),
            "address" => Ok(PathKind::Address),
            other => Err(ResolutionError::UnknownPathKind(other.to_string())),
        }
    }
}

/// One row of the explorer table.
///
/// `tx_path` and `address_path` are appended to `base_url`. A path containing `{value}` gets
/// the hash or address substituted there instead, for explorers that need a suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerEndpoint {
    pub base_url: String,
    #[serde(default = "default_tx_path")]
    pub tx_path: String,
    #[serde(default = "default_address_path")]
    pub address_path: String,
}

impl ExplorerEndpoint {
    pub fn new(base_url: &str, tx_path: &str, address_path: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            tx_path: tx_path.to_string(),
            address_path: address_path.to_string(),
        }
    }

    pub fn path_for(&self, kind: PathKind) -> &str {
        match kind {
            PathKind::Tx => &self.tx_path,
            PathKind::Address => &self.address_path,
        }
    }
}

fn default_tx_path() -> String {
    "/tx/".to_string()
}

fn default_address_path() -> String {
    "/address/".to_string()
}
