//! UI preference blob persistence.

use crate::model::prefs::UiPrefs;
use crate::store::kv::StateStore;
use crate::store::{StoreError, StoreResult};
use log::debug;

/// Fixed storage key of the UI preference blob.
pub const PREFS_STORAGE_KEY: &str = "taskBoardUI";

/// Loads persisted prefs, or `None` when nothing was saved yet.
pub fn load_prefs(store: &impl StateStore) -> StoreResult<Option<UiPrefs>> {
    let Some(raw) = store.get_value(PREFS_STORAGE_KEY)? else {
        return Ok(None);
    };
    let prefs = serde_json::from_str(&raw).map_err(|err| StoreError::InvalidData {
        key: PREFS_STORAGE_KEY.to_string(),
        message: err.to_string(),
    })?;
    Ok(Some(prefs))
}

/// Loads persisted prefs, defaulting dark mode to the host preference.
pub fn load_prefs_or_default(store: &impl StateStore, prefers_dark: bool) -> StoreResult<UiPrefs> {
    Ok(load_prefs(store)?.unwrap_or_else(|| UiPrefs::with_system_preference(prefers_dark)))
}

pub fn save_prefs(store: &impl StateStore, prefs: &UiPrefs) -> StoreResult<()> {
    let encoded = serde_json::to_string(prefs).map_err(StoreError::Encode)?;
    store.set_value(PREFS_STORAGE_KEY, &encoded)?;
    debug!("event=prefs_save module=store status=ok");
    Ok(())
}
