//! Version registry: collects versions and commit hashes reported by build
//! steps so a final summary can be produced.
//!
//! # Invariants
//! - At most one entry per name; names are never empty.
//! - Entries are never removed or rewritten. A repeated report either matches
//!   the recorded value (no-op) or is rejected as a conflict.
//! - Snapshots are owned copies and never alias registry state.

pub mod registry;

pub use buildver_common::{Category, VersionEntry, VersionInfo, VersionSnapshot};
pub use registry::{ReportError, VersionRegistry, shared};

pub fn crate_info() -> &'static str {
    "buildver-registry v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("registry"));
    }
}
