//! Anchoring relative imports (`from ..x import y`) on the importing module.

use strata_core::types::ModuleId;

/// Resolve an imported name against the module that contains the import.
///
/// `raw` may carry its own leading dots; when it does they take precedence over
/// `level`. Returns `None` when the import cannot be anchored: the current
/// module has no containing package, the walk climbs past the top-level
/// package, or the result is not a valid module name.
pub fn resolve_relative_import(raw: &str, level: u32, current: &ModuleId) -> Option<ModuleId> {
    let stripped = raw.trim_start_matches('.');
    let dots = (raw.len() - stripped.len()) as u32;
    let level = if dots > 0 { dots } else { level };

    if level == 0 {
        return ModuleId::parse(stripped).ok();
    }

    let mut package = current.parent()?;
    for _ in 1..level {
        package = match package.parent() {
            Some(p) => p,
            None => {
                tracing::debug!(
                    import = raw,
                    level,
                    current = %current,
                    "relative import climbs above the top-level package"
                );
                return None;
            }
        };
    }

    if stripped.is_empty() {
        return Some(package);
    }
    let rest = ModuleId::parse(stripped).ok()?;
    Some(package.join(&rest))
}
