//! Message catalogue for reported violations.

use std::path::PathBuf;

use serde::Serialize;
use strata_core::contract::ContractKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MessageId {
    /// E9001: generic contract violation (whitelist and other kinds).
    ContractViolation,
    /// E9002: contract report could not be loaded.
    ContractError,
    /// E9003: forbidden import across a boundary.
    BoundaryViolation,
    /// E9005: import between independent modules.
    IndependenceViolation,
}

impl MessageId {
    pub fn for_contract(kind: &ContractKind) -> Self {
        match kind {
            ContractKind::Forbidden { .. } => MessageId::BoundaryViolation,
            ContractKind::Independence { .. } => MessageId::IndependenceViolation,
            ContractKind::Whitelist { .. } | ContractKind::Unrecognized => {
                MessageId::ContractViolation
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            MessageId::ContractViolation => "E9001",
            MessageId::ContractError => "E9002",
            MessageId::BoundaryViolation => "E9003",
            MessageId::IndependenceViolation => "E9005",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            MessageId::ContractViolation => "import-contract-violation",
            MessageId::ContractError => "import-contract-error",
            MessageId::BoundaryViolation => "import-boundary-violation",
            MessageId::IndependenceViolation => "import-independence-violation",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MessageId::ContractViolation => "Import contract violation",
            MessageId::ContractError => "Import contract error",
            MessageId::BoundaryViolation => "Domain boundary violation",
            MessageId::IndependenceViolation => "Independence violation",
        }
    }
}

/// `<title>: '<importer>' imports '<imported>' (violates <contract>)`, with a
/// `(targeting folders: ...)` suffix when the run is restricted to folders.
pub fn format_violation(
    id: MessageId,
    contract: &str,
    importer: &str,
    imported: &str,
    target_folders: &[PathBuf],
) -> String {
    let mut message = format!(
        "{}: '{importer}' imports '{imported}' (violates {contract})",
        id.title()
    );
    if !target_folders.is_empty() {
        let folders: Vec<String> = target_folders
            .iter()
            .map(|f| f.display().to_string())
            .collect();
        message.push_str(&format!(" (targeting folders: {})", folders.join(", ")));
    }
    message
}
