use serde::{Deserialize, Serialize};

use crate::messages::MessageId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub version: String,
    pub command: String,
    pub status: String, // "ok" | "violations"
    pub summary: CheckSummary,
    pub violations: Vec<ViolationRecord>,
    pub contracts: Vec<ContractSummary>,
    pub skipped: Vec<SkippedImport>,
    /// Present only when parse timings were requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timings: Option<ParseTimings>,
}

impl CheckResult {
    pub fn broken_contracts(&self) -> impl Iterator<Item = &ContractSummary> {
        self.contracts.iter().filter(|c| !c.kept)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub analyzed_files: u32,
    pub edges_checked: u32,
    pub edges_skipped: u32,
    pub contracts_total: u32,
    pub contracts_kept: u32,
    pub contracts_broken: u32,
    pub has_violations: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseTimings {
    /// Sum of per-file parse times, in microseconds.
    pub total_us: u64,
    pub max_us: u64,
    pub slowest_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSummary {
    pub name: String,
    pub kind: String,
    pub kept: bool,
    /// Line-level violations attributed to this contract.
    pub violations: u32,
}

/// One reported import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationRecord {
    pub file: String,
    pub line: u32,
    pub contract: String,
    pub code: String,   // "E9001" | "E9003" | "E9005"
    pub symbol: String, // e.g. "import-boundary-violation"
    pub message: String,
    pub importer: String,
    pub imported: String,
    pub matched_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedImport {
    pub file: String,
    pub line: u32,
    /// The import as written, e.g. `..utils`.
    pub import: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The importing file has no valid module name.
    UnresolvableFile,
    /// A relative import could not be anchored.
    UnresolvableImport,
    /// The importing file sits exactly on a search root.
    PackageRoot,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::UnresolvableFile => "unresolvable_file",
            SkipReason::UnresolvableImport => "unresolvable_import",
            SkipReason::PackageRoot => "package_root",
        }
    }
}

/// A command that failed before producing a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub version: String,
    pub command: String,
    pub status: String, // always "error"
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub symbol: String,
    pub message: String,
}

impl ErrorReport {
    pub fn new(command: &str, id: MessageId, message: String) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: command.to_string(),
            status: "error".to_string(),
            error: ErrorDetail {
                code: id.code().to_string(),
                symbol: id.symbol().to_string(),
                message,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveResult {
    pub version: String,
    pub command: String,
    pub files: Vec<ResolvedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFile {
    pub file: String,
    /// `None` when the file has no valid module name; `""` for a package root.
    pub module: Option<String>,
    pub strategy: Option<String>,
}
