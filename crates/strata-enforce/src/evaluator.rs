//! Deciding whether a broken contract covers a specific import.

use serde::Serialize;
use strata_core::contract::{Contract, ContractKind, Evidence};
use strata_core::pattern::matches_any;
use strata_core::types::ModuleId;

use crate::link_matcher::{match_link, LinkRule};

/// Why an import was attributed to a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "rule", rename_all = "snake_case")]
pub enum Implication {
    /// An evidence link matched under the given rule.
    Evidence(LinkRule),
    /// Source and forbidden patterns both matched; no evidence link did.
    ForbiddenPattern,
    /// Both ends are in the independence group but in different domains.
    CrossDomain,
    /// An evidence link names exactly this importer.
    WhitelistEvidence,
}

impl std::fmt::Display for Implication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Implication::Evidence(rule) => write!(f, "evidence:{rule}"),
            Implication::ForbiddenPattern => f.write_str("forbidden_pattern"),
            Implication::CrossDomain => f.write_str("cross_domain"),
            Implication::WhitelistEvidence => f.write_str("whitelist_evidence"),
        }
    }
}

/// Test whether the import `current -> imported` is implicated by `contract`.
///
/// Only the contract's kind and evidence are consulted; whether the contract
/// is kept is the caller's concern. Unrecognized kinds never implicate.
pub fn is_implicated(contract: &Contract, current: &ModuleId, imported: &ModuleId) -> Option<Implication> {
    match &contract.kind {
        ContractKind::Forbidden {
            source_modules,
            forbidden_modules,
        } => evidence_match(&contract.metadata, current, imported)
            .map(Implication::Evidence)
            .or_else(|| {
                (matches_any(current, source_modules) && matches_any(imported, forbidden_modules))
                    .then_some(Implication::ForbiddenPattern)
            }),
        ContractKind::Independence { modules } => (matches_any(current, modules)
            && matches_any(imported, modules)
            && !same_domain(current, imported))
        .then_some(Implication::CrossDomain),
        ContractKind::Whitelist { source_modules, .. } => {
            // Unlisted imports are only reported when evidence proves them.
            (matches_any(current, source_modules)
                && whitelist_evidence(&contract.metadata, current, imported))
            .then_some(Implication::WhitelistEvidence)
        }
        ContractKind::Unrecognized => None,
    }
}

fn evidence_match(evidence: &Evidence, current: &ModuleId, imported: &ModuleId) -> Option<LinkRule> {
    evidence
        .links()
        .find_map(|link| match_link(link, current.as_str(), imported.as_str()))
}

fn whitelist_evidence(evidence: &Evidence, current: &ModuleId, imported: &ModuleId) -> bool {
    // `imported` is a plain string prefix, so `pkg.billing` also covers `pkg.billing_v2`
    evidence.links().any(|link| {
        link.importer == current.as_str() && imported.as_str().starts_with(link.imported.as_str())
    })
}

/// The first two segments of a module, or the whole module if shorter.
pub fn domain_key(module: &ModuleId) -> Vec<&str> {
    module.segments().take(2).collect()
}

/// Modules sharing a domain key never break independence with each other.
pub fn same_domain(a: &ModuleId, b: &ModuleId) -> bool {
    domain_key(a) == domain_key(b)
}
