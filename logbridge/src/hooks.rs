use std::collections::HashMap;
use std::sync::Arc;

use crate::{HookError, Level, Record};

/// A callback fired for every record at one of the levels it registers for.
///
/// Hooks run synchronously on the logging thread, before the record is
/// formatted and written.
pub trait Hook: Send + Sync {
    /// Levels this hook wants to see.
    fn levels(&self) -> &[Level];

    /// Handles one record.
    fn fire(&self, record: &Record<'_>) -> Result<(), HookError>;
}

/// Hooks indexed by the levels they registered for.
#[derive(Clone, Default)]
pub struct LevelHooks {
    hooks: HashMap<Level, Vec<Arc<dyn Hook>>>,
}

impl LevelHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `hook` under every level it reports.
    pub fn add(&mut self, hook: Arc<dyn Hook>) {
        for level in hook.levels() {
            self.hooks.entry(*level).or_default().push(Arc::clone(&hook));
        }
    }

    /// Number of hooks registered for `level`.
    pub fn len(&self, level: Level) -> usize {
        self.hooks.get(&level).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.values().all(Vec::is_empty)
    }

    /// Fires every hook registered for `level`, in registration order.
    ///
    /// All hooks run even if an earlier one fails; the first failure is
    /// returned.
    pub fn fire(&self, level: Level, record: &Record<'_>) -> Result<(), HookError> {
        let mut first_error = None;
        for hook in self.hooks.get(&level).into_iter().flatten() {
            if let Err(e) = hook.fire(record) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
