use buildver_common::{Category, VersionEntry, VersionInfo, VersionSnapshot};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::{debug, error, warn};

/// Errors from reporting a version.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    /// Two reporters disagree about the same fact. The recorded entry is kept.
    #[error("{name} key registered with a different value (old: {old}, new: {new})")]
    Conflict {
        name: String,
        old: String,
        new: String,
    },
    #[error("version name must not be empty")]
    EmptyName,
}

/// Registry of versions reported during a build.
///
/// All access goes through `&self`; a single lock serializes reports and
/// snapshots, so the insert-or-conflict decision in [`report`] is atomic and
/// a snapshot never observes a partial update.
///
/// Prefer constructing one registry and handing it to collaborators. The
/// process-wide instance from [`shared`] exists for code that cannot be
/// threaded a reference.
///
/// [`report`]: VersionRegistry::report
#[derive(Debug, Default)]
pub struct VersionRegistry {
    versions: Mutex<BTreeMap<String, VersionInfo>>,
}

impl VersionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for `name` under `category`.
    ///
    /// Reporting the same value again is accepted and logged as a warning.
    /// Reporting a different value fails with [`ReportError::Conflict`] and
    /// leaves the recorded entry untouched. The category of a repeated
    /// report is not compared.
    pub fn report(
        &self,
        name: impl Into<String>,
        value: impl Into<String>,
        category: Category,
    ) -> Result<(), ReportError> {
        let name = name.into();
        let value = value.into();
        if name.is_empty() {
            return Err(ReportError::EmptyName);
        }

        let mut versions = self.lock();
        match versions.entry(name) {
            Entry::Vacant(slot) => {
                debug!(name = %slot.key(), value = %value, %category, "recorded version");
                let info = VersionInfo {
                    name: slot.key().clone(),
                    value,
                    category,
                };
                slot.insert(info);
                Ok(())
            }
            Entry::Occupied(slot) => {
                let recorded = slot.get();
                if recorded.value == value {
                    warn!(
                        name = %slot.key(),
                        value = %value,
                        "key/value pair was already registered"
                    );
                    return Ok(());
                }
                error!(
                    name = %slot.key(),
                    old = %recorded.value,
                    new = %value,
                    "key registered with a different value"
                );
                Err(ReportError::Conflict {
                    name: slot.key().clone(),
                    old: recorded.value.clone(),
                    new: value,
                })
            }
        }
    }

    pub fn report_entry(&self, entry: VersionEntry) -> Result<(), ReportError> {
        self.report(entry.name, entry.value, entry.category)
    }

    /// Owned copy of every recorded entry.
    pub fn snapshot(&self) -> VersionSnapshot {
        self.lock().clone()
    }

    /// Owned copy of the entry recorded for `name`, if any.
    pub fn get(&self, name: &str) -> Option<VersionInfo> {
        self.lock().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Every mutation is a single `insert`, so a poisoned map is still whole.
    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, VersionInfo>> {
        self.versions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

static SHARED: OnceLock<VersionRegistry> = OnceLock::new();

/// The process-wide registry, created on first call.
pub fn shared() -> &'static VersionRegistry {
    SHARED.get_or_init(|| {
        debug!("setting up version registry");
        VersionRegistry::new()
    })
}
