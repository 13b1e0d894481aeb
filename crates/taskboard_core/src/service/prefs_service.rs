//! UI preference use-case service.

use crate::model::prefs::{PriorityFilter, UiPrefs};
use crate::store::kv::StateStore;
use crate::store::prefs_store::{load_prefs_or_default, save_prefs};
use crate::store::StoreResult;
use log::{error, info};

/// UI preferences bound to a store.
///
/// Every change is written immediately, search text included. A change
/// whose save fails is dropped.
pub struct PrefsService<S: StateStore> {
    store: S,
    prefs: UiPrefs,
}

impl<S: StateStore> PrefsService<S> {
    /// Loads persisted prefs; `prefers_dark` seeds dark mode on first launch.
    pub fn load(store: S, prefers_dark: bool) -> StoreResult<Self> {
        let prefs = load_prefs_or_default(&store, prefers_dark)?;
        Ok(Self { store, prefs })
    }

    pub fn prefs(&self) -> &UiPrefs {
        &self.prefs
    }

    /// Flips dark mode and returns the new value.
    pub fn toggle_dark_mode(&mut self) -> StoreResult<bool> {
        self.apply(|prefs| {
            prefs.toggle_dark_mode();
            true
        })?;
        let dark = self.prefs.is_dark_mode;
        info!("event=prefs_dark_mode module=prefs status=ok dark={dark}");
        Ok(dark)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) -> StoreResult<bool> {
        let changed = self.apply(|prefs| prefs.set_search_term(term))?;
        // Search text is user content; only its length is logged.
        info!(
            "event=prefs_search module=prefs status=ok changed={changed} term_chars={}",
            self.prefs.search_term.chars().count()
        );
        Ok(changed)
    }

    pub fn set_filter_priority(&mut self, filter: PriorityFilter) -> StoreResult<bool> {
        let changed = self.apply(|prefs| prefs.set_filter_priority(filter))?;
        info!("event=prefs_filter module=prefs status=ok changed={changed} filter={filter:?}");
        Ok(changed)
    }

    /// Applies `op` to a copy and swaps it in only after a successful save.
    fn apply(&mut self, op: impl FnOnce(&mut UiPrefs) -> bool) -> StoreResult<bool> {
        let mut next = self.prefs.clone();
        if !op(&mut next) {
            return Ok(false);
        }
        if let Err(err) = save_prefs(&self.store, &next) {
            error!("event=prefs_save module=prefs status=error error={err}");
            return Err(err);
        }
        self.prefs = next;
        Ok(true)
    }
}
