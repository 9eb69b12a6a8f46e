//! Shared types for build version metadata.
//!
//! # Invariants
//! - A [`Category`] is always one of the four known variants.
//! - Snapshots are owned values; holding one never aliases registry state.

pub mod types;

pub use types::{Category, ParseCategoryError, VersionEntry, VersionInfo, VersionSnapshot};

pub fn crate_info() -> &'static str {
    "buildver-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
