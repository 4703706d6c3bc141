//! Matching evidence links against a concrete import.
//!
//! Evidence from the dependency graph may be recorded at a coarser or finer
//! granularity than a single import statement. Each rule below relaxes the
//! previous one; they are tried in [`LinkRule::CASCADE`] order and the first
//! success is reported.

use serde::Serialize;
use strata_core::contract::Link;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkRule {
    /// Both sides equal.
    Exact,
    /// The link's importer is a package-level suffix of the current module.
    CoarserImporter,
    /// The current module is a segment suffix of the link's importer.
    FinerImporter,
    /// The link's imported module is a package the import reaches into.
    ImportedSubmodule,
    /// The link's importer occurs anywhere in the current module.
    ///
    /// Plain substring test with no segment boundary, so `a.billing_utils`
    /// contains `billing`. Known to over-match.
    Containment,
    /// The link's importer ends with `.<current module>`.
    SegmentSuffix,
}

impl LinkRule {
    pub const CASCADE: [LinkRule; 6] = [
        LinkRule::Exact,
        LinkRule::CoarserImporter,
        LinkRule::FinerImporter,
        LinkRule::ImportedSubmodule,
        LinkRule::Containment,
        LinkRule::SegmentSuffix,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkRule::Exact => "exact",
            LinkRule::CoarserImporter => "coarser_importer",
            LinkRule::FinerImporter => "finer_importer",
            LinkRule::ImportedSubmodule => "imported_submodule",
            LinkRule::Containment => "containment",
            LinkRule::SegmentSuffix => "segment_suffix",
        }
    }

    /// Evaluate this single rule.
    pub fn matches(&self, link: &Link, current: &str, imported: &str) -> bool {
        let (importer, target) = (link.importer.as_str(), link.imported.as_str());
        match self {
            LinkRule::Exact => current == importer && imported == target,
            LinkRule::CoarserImporter => ends_with_segments(current, importer) && imported == target,
            LinkRule::FinerImporter => ends_with_segments(importer, current) && imported == target,
            LinkRule::ImportedSubmodule => {
                importer.ends_with(current) && is_strict_submodule(imported, target)
            }
            LinkRule::Containment => current.contains(importer) && imported.starts_with(target),
            LinkRule::SegmentSuffix => {
                importer.ends_with(&format!(".{current}")) && imported.starts_with(target)
            }
        }
    }
}

impl std::fmt::Display for LinkRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First rule in the cascade that ties `link` to the import
/// `current -> imported`, if any.
pub fn match_link(link: &Link, current: &str, imported: &str) -> Option<LinkRule> {
    if !link.is_well_formed() || current.is_empty() || imported.is_empty() {
        return None;
    }
    let rule = LinkRule::CASCADE
        .into_iter()
        .find(|rule| rule.matches(link, current, imported))?;
    tracing::debug!(
        rule = %rule,
        link_importer = %link.importer,
        link_imported = %link.imported,
        current,
        imported,
        "evidence link matched"
    );
    Some(rule)
}

/// `module` equals `suffix` or ends with `.suffix`.
fn ends_with_segments(module: &str, suffix: &str) -> bool {
    module == suffix
        || (module.len() > suffix.len()
            && module.ends_with(suffix)
            && module.as_bytes()[module.len() - suffix.len() - 1] == b'.')
}

fn is_strict_submodule(module: &str, package: &str) -> bool {
    module.len() > package.len() + 1
        && module.starts_with(package)
        && module.as_bytes()[package.len()] == b'.'
}
