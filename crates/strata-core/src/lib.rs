//! Core types, contract model, and configuration for strata.
//!
//! This crate provides the foundational data structures used across all strata crates:
//! - [`types`]: Module identifiers, import edges, and their error types
//! - [`pattern`]: Contract module patterns with `*` / `**` wildcards
//! - [`contract`]: Contracts, their kept/broken result, and the evidence chains behind it
//! - [`config`]: Configuration loading from `.strata/strata.json`

pub mod config;
pub mod contract;
pub mod pattern;
pub mod types;
