//! Contract module patterns.
//!
//! A pattern is a dotted module name whose segments may be the wildcard `*`
//! (exactly one segment) or, in final position only, `**` (zero or more
//! trailing segments). A pattern with no wildcard covers the named module and
//! everything nested below it.

use serde::{Deserialize, Serialize};

use crate::types::ModuleId;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    AnySegment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Shape {
    /// No wildcard: the module itself or any descendant.
    Package(ModuleId),
    /// Fixed-length segment match, optionally followed by `**`.
    Wildcard { tokens: Vec<Token>, recursive: bool },
    /// Could not be parsed; never matches.
    Malformed,
}

/// A parsed contract pattern. Keeps its source text for display and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Pattern {
    raw: String,
    shape: Shape,
}

/// Why a pattern string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,

    #[error("pattern '{0}' has an empty segment")]
    EmptySegment(String),

    #[error("pattern '{pattern}' has a partial wildcard in segment '{segment}'")]
    PartialWildcard { pattern: String, segment: String },

    #[error("pattern '{0}' uses '**' before its final segment")]
    RecursiveNotLast(String),

    #[error("pattern '{pattern}' has invalid segment '{segment}'")]
    InvalidSegment { pattern: String, segment: String },
}

impl Pattern {
    /// Parse strictly, reporting why a pattern is malformed.
    pub fn try_parse(raw: &str) -> Result<Self, PatternError> {
        if raw.is_empty() {
            return Err(PatternError::Empty);
        }
        let parts: Vec<&str> = raw.split('.').collect();
        let last = parts.len() - 1;
        let mut tokens = Vec::with_capacity(parts.len());
        let mut recursive = false;
        let mut has_wildcard = false;

        for (i, part) in parts.iter().enumerate() {
            match *part {
                "" => return Err(PatternError::EmptySegment(raw.to_string())),
                "**" if i == last => {
                    recursive = true;
                    has_wildcard = true;
                }
                "**" => return Err(PatternError::RecursiveNotLast(raw.to_string())),
                "*" => {
                    tokens.push(Token::AnySegment);
                    has_wildcard = true;
                }
                seg if seg.contains('*') => {
                    return Err(PatternError::PartialWildcard {
                        pattern: raw.to_string(),
                        segment: seg.to_string(),
                    })
                }
                seg => {
                    if ModuleId::parse(seg).is_err() {
                        return Err(PatternError::InvalidSegment {
                            pattern: raw.to_string(),
                            segment: seg.to_string(),
                        });
                    }
                    tokens.push(Token::Literal(seg.to_string()));
                }
            }
        }

        let shape = if has_wildcard {
            Shape::Wildcard { tokens, recursive }
        } else {
            // Every segment was validated above.
            match ModuleId::parse(raw) {
                Ok(id) => Shape::Package(id),
                Err(_) => return Err(PatternError::EmptySegment(raw.to_string())),
            }
        };
        Ok(Self {
            raw: raw.to_string(),
            shape,
        })
    }

    /// Parse leniently: a malformed pattern is kept as a literal that never matches.
    pub fn parse(raw: &str) -> Self {
        match Self::try_parse(raw) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(pattern = raw, error = %e, "malformed contract pattern never matches");
                Self {
                    raw: raw.to_string(),
                    shape: Shape::Malformed,
                }
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self.shape, Shape::Malformed)
    }

    pub fn has_wildcard(&self) -> bool {
        matches!(self.shape, Shape::Wildcard { .. })
    }

    /// Whole-identifier, case-sensitive match of `module` against this pattern.
    pub fn matches(&self, module: &ModuleId) -> bool {
        match &self.shape {
            Shape::Malformed => false,
            Shape::Package(package) => module.starts_with(package) && !module.is_root(),
            Shape::Wildcard { tokens, recursive } => {
                let segments: Vec<&str> = module.segments().collect();
                if segments.len() < tokens.len() {
                    return false;
                }
                if !recursive && segments.len() != tokens.len() {
                    return false;
                }
                tokens.iter().zip(&segments).all(|(token, seg)| match token {
                    Token::AnySegment => true,
                    Token::Literal(lit) => lit == seg,
                })
            }
        }
    }
}

/// True when `module` matches any of `patterns`.
pub fn matches_any(module: &ModuleId, patterns: &[Pattern]) -> bool {
    patterns.iter().any(|p| p.matches(module))
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<String> for Pattern {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for Pattern {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<Pattern> for String {
    fn from(value: Pattern) -> Self {
        value.raw
    }
}
