//! Contracts and the evaluation results handed over by the dependency graph service.
//!
//! The service report is a JSON document:
//!
//! ```json
//! {
//!   "contracts": [
//!     {
//!       "name": "Document must not import billing",
//!       "type": "forbidden",
//!       "source_modules": ["domains.document"],
//!       "forbidden_modules": ["domains.billing.*"],
//!       "kept": false,
//!       "metadata": {
//!         "invalid_chains": [
//!           { "chains": [[{ "importer": "domains.document.core",
//!                           "imported": "domains.billing.payments",
//!                           "line_numbers": [3] }]] }
//!         ]
//!       }
//!     }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::pattern::Pattern;

/// The rule a contract declares. Any unknown `type` tag loads as [`ContractKind::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContractKind {
    /// Broken if any import runs from a source module to a forbidden module.
    #[serde(alias = "ForbiddenContract")]
    Forbidden {
        source_modules: Vec<Pattern>,
        forbidden_modules: Vec<Pattern>,
    },
    /// Broken if members of the group import each other across domains.
    #[serde(alias = "IndependenceContract")]
    Independence { modules: Vec<Pattern> },
    /// Source modules may only import the allowed modules.
    #[serde(alias = "WhitelistContract")]
    Whitelist {
        source_modules: Vec<Pattern>,
        allowed_modules: Vec<Pattern>,
    },
    #[serde(other)]
    Unrecognized,
}

impl ContractKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractKind::Forbidden { .. } => "forbidden",
            ContractKind::Independence { .. } => "independence",
            ContractKind::Whitelist { .. } => "whitelist",
            ContractKind::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for ContractKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named contract together with its evaluation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub name: String,
    #[serde(flatten)]
    pub kind: ContractKind,
    #[serde(default = "default_kept")]
    pub kept: bool,
    #[serde(default)]
    pub metadata: Evidence,
}

fn default_kept() -> bool {
    true
}

impl Contract {
    pub fn is_broken(&self) -> bool {
        !self.kept
    }
}

/// Proof that a contract is broken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(default)]
    pub invalid_chains: Vec<InvalidChain>,
}

impl Evidence {
    /// Every well-formed link across all chains, in report order.
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.invalid_chains
            .iter()
            .flat_map(|group| group.chains.iter())
            .flat_map(|chain| chain.iter())
            .filter(|link| link.is_well_formed())
    }

    pub fn is_empty(&self) -> bool {
        self.links().next().is_none()
    }
}

/// One group of import chains between an upstream and a downstream module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidChain {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_module: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downstream_module: Option<String>,
    #[serde(default)]
    pub chains: Vec<Vec<Link>>,
}

/// A single importer -> imported step, captured at whatever granularity the graph service used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub importer: String,
    #[serde(default)]
    pub imported: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_numbers: Vec<u32>,
}

impl Link {
    pub fn new(importer: &str, imported: &str) -> Self {
        Self {
            importer: importer.to_string(),
            imported: imported.to_string(),
            line_numbers: vec![],
        }
    }

    pub fn is_well_formed(&self) -> bool {
        !self.importer.is_empty() && !self.imported.is_empty()
    }
}

/// All contracts of one analysis run, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSet {
    #[serde(default)]
    pub contracts: Vec<Contract>,
}

impl ContractSet {
    pub fn new(contracts: Vec<Contract>) -> Self {
        Self { contracts }
    }

    /// Load a dependency graph service report from disk.
    pub fn load(path: &Path) -> Result<Self, ContractLoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| ContractLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let set: ContractSet =
            serde_json::from_str(&content).map_err(|source| ContractLoadError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        for contract in &set.contracts {
            if contract.kind == ContractKind::Unrecognized {
                tracing::info!(contract = %contract.name, "ignoring contract of unrecognized kind");
            }
        }
        Ok(set)
    }

    pub fn broken(&self) -> impl Iterator<Item = &Contract> {
        self.contracts.iter().filter(|c| c.is_broken())
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

/// Errors that can occur while reading a contract report.
#[derive(Debug, thiserror::Error)]
pub enum ContractLoadError {
    #[error("failed to read contract report {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse contract report {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
