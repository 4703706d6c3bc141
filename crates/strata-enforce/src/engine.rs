use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use strata_core::contract::{Contract, ContractSet};
use strata_core::types::{ImportEdge, ModuleId};
use strata_parsers::module_path::ModulePathResolver;
use strata_parsers::python::resolve_relative_import;
use strata_parsers::resolver::FileImports;

use crate::evaluator::{is_implicated, Implication};
use crate::messages::{format_violation, MessageId};
use crate::types::{
    CheckResult, CheckSummary, ContractSummary, ParseTimings, ResolveResult, ResolvedFile, SkipReason,
    SkippedImport, ViolationRecord,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Attributes broken contracts to the import statements that cause them.
///
/// Owns the module path resolver, the contract report, and a per-file cache
/// of resolved module names that lives for one engine instance.
pub struct ResolutionEngine {
    resolver: ModulePathResolver,
    contracts: ContractSet,
    target_folders: Vec<PathBuf>,
    collect_timings: bool,
    module_cache: HashMap<PathBuf, Option<ModuleId>>,
}

impl ResolutionEngine {
    pub fn new(resolver: ModulePathResolver, contracts: ContractSet) -> Self {
        Self {
            resolver,
            contracts,
            target_folders: vec![],
            collect_timings: false,
            module_cache: HashMap::new(),
        }
    }

    /// Folders named in violation messages as the scope of the run.
    pub fn with_target_folders(mut self, folders: &[PathBuf]) -> Self {
        self.target_folders = folders.to_vec();
        self
    }

    /// Restrict the run to the named contracts. An empty list keeps all of them.
    pub fn with_only_contracts(mut self, names: &[String]) -> Self {
        if names.is_empty() {
            return self;
        }
        for name in names {
            if !self.contracts.contracts.iter().any(|c| &c.name == name) {
                tracing::warn!(contract = %name, "selected contract not found in report");
            }
        }
        self.contracts.contracts.retain(|c| names.contains(&c.name));
        tracing::info!(selected = self.contracts.len(), "contracts limited by name");
        self
    }

    /// Report per-file parse time totals in [`CheckResult::timings`].
    pub fn with_timings(mut self, enabled: bool) -> Self {
        self.collect_timings = enabled;
        self
    }

    /// Module name of a file, computed once per path.
    pub fn resolve_file(&mut self, path: &Path) -> Option<ModuleId> {
        if let Some(cached) = self.module_cache.get(path) {
            return cached.clone();
        }
        let module = self.resolver.resolve(path);
        self.module_cache.insert(path.to_path_buf(), module.clone());
        module
    }

    /// Report the first broken contract, in declaration order, that
    /// implicates this edge.
    pub fn check_edge(&self, edge: &ImportEdge) -> Option<ViolationRecord> {
        self.implicating_contract(edge)
            .map(|(_, contract, implication)| self.violation(edge, contract, implication))
    }

    fn implicating_contract(&self, edge: &ImportEdge) -> Option<(usize, &Contract, Implication)> {
        self.contracts
            .contracts
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_broken())
            .find_map(|(idx, contract)| {
                is_implicated(contract, &edge.current_module, &edge.imported_module)
                    .map(|implication| (idx, contract, implication))
            })
    }

    fn violation(&self, edge: &ImportEdge, contract: &Contract, implication: Implication) -> ViolationRecord {
        let id = MessageId::for_contract(&contract.kind);
        let importer = edge.current_module.to_string();
        let imported = edge.imported_module.to_string();
        ViolationRecord {
            file: edge.source_file.display().to_string(),
            line: edge.line,
            contract: contract.name.clone(),
            code: id.code().to_string(),
            symbol: id.symbol().to_string(),
            message: format_violation(id, &contract.name, &importer, &imported, &self.target_folders),
            importer,
            imported,
            matched_by: implication.to_string(),
        }
    }

    /// Turn parsed imports into edges, recording every import that cannot
    /// become one.
    pub fn collect_edges(&mut self, files: &[FileImports]) -> (Vec<ImportEdge>, Vec<SkippedImport>) {
        let mut edges = Vec::new();
        let mut skipped = Vec::new();

        for file in files {
            let current = self.resolve_file(&file.file_path);
            for imp in &file.imports {
                let skip = |reason: SkipReason| SkippedImport {
                    file: file.file_path.display().to_string(),
                    line: imp.line,
                    import: imp.display_name(),
                    reason,
                };
                let module = match &current {
                    None => {
                        skipped.push(skip(SkipReason::UnresolvableFile));
                        continue;
                    }
                    Some(m) if m.is_root() => {
                        skipped.push(skip(SkipReason::PackageRoot));
                        continue;
                    }
                    Some(m) => m,
                };
                match resolve_relative_import(&imp.module, imp.level, module) {
                    Some(imported) => edges.push(ImportEdge {
                        current_module: module.clone(),
                        imported_module: imported,
                        source_file: file.file_path.clone(),
                        line: imp.line,
                    }),
                    None => {
                        tracing::debug!(
                            file = %file.file_path.display(),
                            line = imp.line,
                            import = %imp.display_name(),
                            "skipping unresolvable import"
                        );
                        skipped.push(skip(SkipReason::UnresolvableImport));
                    }
                }
            }
        }

        (edges, skipped)
    }

    /// Resolve and evaluate every import in `files`.
    pub fn run(&mut self, files: &[FileImports]) -> CheckResult {
        let (edges, skipped) = self.collect_edges(files);

        let has_broken = self.contracts.broken().next().is_some();
        let matches: Vec<(usize, ViolationRecord)> = if has_broken {
            edges
                .par_iter()
                .filter_map(|edge| {
                    self.implicating_contract(edge).map(|(idx, contract, implication)| {
                        (idx, self.violation(edge, contract, implication))
                    })
                })
                .collect()
        } else {
            vec![]
        };

        let mut per_contract = vec![0u32; self.contracts.len()];
        for (idx, _) in &matches {
            per_contract[*idx] += 1;
        }
        let contracts: Vec<ContractSummary> = self
            .contracts
            .contracts
            .iter()
            .zip(per_contract)
            .map(|(c, violations)| ContractSummary {
                name: c.name.clone(),
                kind: c.kind.to_string(),
                kept: c.kept,
                violations,
            })
            .collect();
        let violations: Vec<ViolationRecord> = matches.into_iter().map(|(_, v)| v).collect();

        let contracts_broken = contracts.iter().filter(|c| !c.kept).count() as u32;
        let summary = CheckSummary {
            analyzed_files: files.len() as u32,
            edges_checked: edges.len() as u32,
            edges_skipped: skipped.len() as u32,
            contracts_total: contracts.len() as u32,
            contracts_kept: contracts.len() as u32 - contracts_broken,
            contracts_broken,
            has_violations: !violations.is_empty(),
        };

        tracing::info!(
            files = summary.analyzed_files,
            edges = summary.edges_checked,
            skipped = summary.edges_skipped,
            violations = violations.len(),
            "contract resolution complete"
        );

        CheckResult {
            version: VERSION.to_string(),
            command: "check".to_string(),
            status: if violations.is_empty() { "ok" } else { "violations" }.to_string(),
            summary,
            violations,
            contracts,
            skipped,
            timings: self.collect_timings.then(|| parse_timings(files)),
        }
    }
}

/// Describe how each file resolves, for `strata resolve`.
fn parse_timings(files: &[FileImports]) -> ParseTimings {
    let slowest = files.iter().max_by_key(|f| f.parse_duration_us);
    ParseTimings {
        total_us: files.iter().map(|f| f.parse_duration_us).sum(),
        max_us: slowest.map_or(0, |f| f.parse_duration_us),
        slowest_file: slowest.map(|f| f.file_path.display().to_string()),
    }
}

pub fn resolve_files(resolver: &ModulePathResolver, files: &[PathBuf]) -> ResolveResult {
    let files = files
        .iter()
        .map(|path| {
            let resolved = resolver.resolve_with_strategy(path);
            ResolvedFile {
                file: path.display().to_string(),
                module: resolved.as_ref().map(|(m, _)| m.to_string()),
                strategy: resolved.map(|(_, s)| s.to_string()),
            }
        })
        .collect();
    ResolveResult {
        version: VERSION.to_string(),
        command: "resolve".to_string(),
        files,
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
