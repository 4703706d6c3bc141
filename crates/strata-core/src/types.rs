use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A canonical dotted module name such as `billing.payments`.
///
/// Stored as its dot-joined rendering; every segment is non-empty and free of
/// path separators, so string equality is segment equality. The root module
/// (zero segments) renders as the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleId(String);

impl ModuleId {
    /// Parse a dotted module name. The empty string is rejected; use [`ModuleId::root`].
    pub fn parse(dotted: &str) -> Result<Self, ModuleIdError> {
        if dotted.is_empty() {
            return Err(ModuleIdError::Empty);
        }
        for segment in dotted.split('.') {
            validate_segment(dotted, segment)?;
        }
        Ok(Self(dotted.to_string()))
    }

    /// Build a module from path-like parts. Parts containing dots contribute
    /// several segments, exactly as if the parts had been dot-joined first.
    pub fn from_parts<I, S>(parts: I) -> Result<Self, ModuleIdError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = parts
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(".");
        Self::parse(&joined)
    }

    /// The package root: a module with no segments.
    pub fn root() -> Self {
        Self(String::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|s| !s.is_empty())
    }

    pub fn len(&self) -> usize {
        self.segments().count()
    }

    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    /// The containing package. `None` for the root and for single-segment modules.
    pub fn parent(&self) -> Option<Self> {
        self.0.rfind('.').map(|idx| Self(self.0[..idx].to_string()))
    }

    /// Append `child`'s segments. Joining onto the root yields `child` itself.
    pub fn join(&self, child: &ModuleId) -> Self {
        match (self.is_root(), child.is_root()) {
            (true, _) => child.clone(),
            (_, true) => self.clone(),
            _ => Self(format!("{}.{}", self.0, child.0)),
        }
    }

    /// True when `self` equals `ancestor` or is nested below it.
    pub fn starts_with(&self, ancestor: &ModuleId) -> bool {
        if ancestor.is_root() {
            return true;
        }
        self.0 == ancestor.0
            || (self.0.starts_with(&ancestor.0) && self.0[ancestor.0.len()..].starts_with('.'))
    }
}

fn validate_segment(dotted: &str, segment: &str) -> Result<(), ModuleIdError> {
    if segment.is_empty() {
        return Err(ModuleIdError::EmptySegment(dotted.to_string()));
    }
    if segment
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_whitespace())
    {
        return Err(ModuleIdError::InvalidSegment {
            module: dotted.to_string(),
            segment: segment.to_string(),
        });
    }
    Ok(())
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ModuleId {
    type Err = ModuleIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ModuleId {
    type Error = ModuleIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Ok(Self::root());
        }
        Self::parse(&value)
    }
}

impl From<ModuleId> for String {
    fn from(value: ModuleId) -> Self {
        value.0
    }
}

/// One concrete import statement, with both ends resolved to module identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportEdge {
    pub current_module: ModuleId,
    pub imported_module: ModuleId,
    pub source_file: PathBuf,
    /// 1-based line of the import statement.
    pub line: u32,
}

/// Errors raised when constructing a [`ModuleId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModuleIdError {
    #[error("module name is empty")]
    Empty,

    #[error("module name '{0}' has an empty segment")]
    EmptySegment(String),

    #[error("module name '{module}' has invalid segment '{segment}'")]
    InvalidSegment { module: String, segment: String },
}
