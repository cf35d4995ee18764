use lazy_static::lazy_static;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::models::{ExplorerEndpoint, PathKind};
use crate::utils::errors::{ConfigError, ResolutionError};

const VALUE_PLACEHOLDER: &str = "{value}";

lazy_static! {
    /// Built-in explorer rows. Adding a chain is a new row here or in the override file.
    static ref BUILTIN_EXPLORERS: ExplorerTable = ExplorerTable::from_rows(&[
        ("ethereum", "https://etherscan.io", "/tx/", "/address/"),
        ("sepolia", "https://sepolia.etherscan.io", "/tx/", "/address/"),
        ("bsc", "https://bscscan.com", "/tx/", "/address/"),
        ("polygon", "https://polygonscan.com", "/tx/", "/address/"),
        ("arbitrum", "https://arbiscan.io", "/tx/", "/address/"),
        ("optimism", "https://optimistic.etherscan.io", "/tx/", "/address/"),
        ("base", "https://basescan.org", "/tx/", "/address/"),
        ("avalanche", "https://snowtrace.io", "/tx/", "/address/"),
        ("linea", "https://lineascan.build", "/tx/", "/address/"),
        ("bitcoin", "https://mempool.space", "/tx/", "/address/"),
        ("solana", "https://solscan.io", "/tx/", "/account/"),
        ("tron", "https://tronscan.org", "/#/transaction/", "/#/address/"),
        ("near", "https://nearblocks.io", "/txns/", "/address/"),
        ("aptos", "https://explorer.aptoslabs.com", "/txn/{value}?network=mainnet", "/account/{value}?network=mainnet"),
        ("sui", "https://suiscan.xyz/mainnet", "/tx/", "/account/"),
    ]);
}

/// Immutable `network id -> explorer` mapping.
///
/// Network ids are matched trimmed and lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplorerTable {
    endpoints: HashMap<String, ExplorerEndpoint>,
}

impl ExplorerTable {
    /// The table compiled into the binary
    pub fn builtin() -> Self {
        BUILTIN_EXPLORERS.clone()
    }

    fn from_rows(rows: &[(&str, &str, &str, &str)]) -> Self {
        let endpoints = rows
            .iter()
            .map(|(network, base, tx, address)| {
                (normalize_network(network), ExplorerEndpoint::new(base, tx, address))
            })
            .collect();
        Self { endpoints }
    }

    /// Parse a JSON object of `network -> { base_url, tx_path, address_path }`
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, ExplorerEndpoint> = serde_json::from_str(json)?;
        let endpoints = raw
            .into_iter()
            .map(|(network, endpoint)| (normalize_network(&network), endpoint))
            .collect();
        Ok(Self { endpoints })
    }

    /// Built-in table with the rows of the JSON file at `path` layered on top
    pub fn builtin_with_overrides(path: &Path) -> Result<Self, ConfigError> {
        let load_error = |reason: String| ConfigError::ExplorerTable {
            path: path.display().to_string(),
            reason,
        };

        let json = std::fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        let overrides = Self::from_json_str(&json).map_err(|e| load_error(e.to_string()))?;

        info!(
            "Loaded {} explorer override(s) from {}",
            overrides.len(),
            path.display()
        );

        let mut table = Self::builtin();
        table.endpoints.extend(overrides.endpoints);
        Ok(table)
    }

    pub fn get(&self, network: &str) -> Option<&ExplorerEndpoint> {
        self.endpoints.get(&normalize_network(network))
    }

    /// Configured network ids, sorted
    pub fn networks(&self) -> Vec<&str> {
        let mut networks: Vec<&str> = self.endpoints.keys().map(String::as_str).collect();
        networks.sort_unstable();
        networks
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

fn normalize_network(network: &str) -> String {
    network.trim().to_ascii_lowercase()
}

/// Build the explorer URL for `value` on `network`.
///
/// Pure string work: no lookups beyond the table, no I/O.
pub fn resolve(
    table: &ExplorerTable,
    network: &str,
    kind: PathKind,
    value: &str,
) -> Result<String, ResolutionError> {
    let endpoint = table
        .get(network)
        .ok_or_else(|| ResolutionError::UnknownNetwork(network.to_string()))?;

    let value = value.trim();
    if value.is_empty() {
        return Err(ResolutionError::EmptyValue);
    }

    let base = endpoint.base_url.trim_end_matches('/');
    let template = endpoint.path_for(kind);

    let path = if template.contains(VALUE_PLACEHOLDER) {
        template.replace(VALUE_PLACEHOLDER, value)
    } else {
        format!("{}{}", template, value)
    };

    if path.starts_with('/') {
        Ok(format!("{}{}", base, path))
    } else {
        Ok(format!("{}/{}", base, path))
    }
}

/// Cheap-to-clone handle on a shared explorer table
#[derive(Debug, Clone)]
pub struct ExplorerResolver {
    table: Arc<ExplorerTable>,
}

impl ExplorerResolver {
    pub fn new(table: ExplorerTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    pub fn table(&self) -> &ExplorerTable {
        &self.table
    }

    pub fn resolve(
        &self,
        network: &str,
        kind: PathKind,
        value: &str,
    ) -> Result<String, ResolutionError> {
        let result = resolve(&self.table, network, kind, value);
        if let Err(e) = &result {
            debug!("Explorer link for {} {} on '{}' not built: {}", kind, value, network, e);
        }
        result
    }

    /// Resolve a `tx/<hash>` or `address/<addr>` fragment
    pub fn resolve_fragment(&self, network: &str, fragment: &str) -> Result<String, ResolutionError> {
        let fragment = fragment.trim().trim_start_matches('/');
        let (kind, value) = fragment
            .split_once('/')
            .ok_or_else(|| ResolutionError::UnknownPathKind(fragment.to_string()))?;
        let kind: PathKind = kind.parse()?;
        self.resolve(network, kind, value)
    }
}

impl Default for ExplorerResolver {
    fn default() -> Self {
        Self::new(ExplorerTable::builtin())
    }
}
