//! Line-level attribution of broken import contracts.
//!
//! Given the contracts a dependency graph service found broken, decides which
//! concrete import statements are responsible:
//! - E9003: forbidden import across a boundary
//! - E9005: import between independent domains
//! - E9001: whitelist violation proven by evidence
//! - E9002: the contract report itself could not be loaded

pub mod types;
pub mod messages;
pub mod link_matcher;
pub mod evaluator;
pub mod engine;
