//! Store facade: every settings and history accessor over one storage handle.
//!
//! DESIGN
//! ======
//! Reads never fail: a missing value yields its default and a corrupt one is
//! logged and replaced by its default, so page code can render without
//! error paths. Writes overwrite the whole value (no patching) and surface
//! backend failures, since a full quota must not be silently ignored.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::page::Page;
use crate::records::{
    DeliveryRecord, FineHistoryEntry, HistoryKind, HistoryRecord, HouseListEntry, LeaveRequest, ReportRecord,
};
use crate::settings::{FineType, Settings, WebhookChannel};
use crate::storage::{Storage, keys};
use crate::theme::{self, Theme};
use crate::webhook::{WebhookClient, WebhookError, WebhookPayload};

pub struct Store<S> {
    storage: S,
}

impl<S: Storage> Store<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "storage read failed; treating value as absent");
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &'static str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode { key, source })?;
        self.storage.set_item(key, &raw)?;
        debug!(key, bytes = raw.len(), "saved value");
        Ok(())
    }

    // =========================================================================
    // SETTINGS
    // =========================================================================

    /// Current settings merged over the defaults. Never persists the merge.
    pub fn settings(&self) -> Settings {
        Settings::from_stored(self.read_raw(keys::SETTINGS).as_deref())
    }

    /// Overwrite the stored settings verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the backend write fails.
    pub fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        self.write_json(keys::SETTINGS, settings)
    }

    // =========================================================================
    // HISTORY LISTS
    // =========================================================================

    /// Raw elements of a stored list; absent or `null` reads as empty.
    fn load_list(&self, key: &'static str) -> Result<Vec<Value>, StoreError> {
        let Some(raw) = self.storage.get_item(key)? else {
            return Ok(Vec::new());
        };
        // `null` is what a page writes after JSON-encoding an undefined list.
        serde_json::from_str::<Option<Vec<Value>>>(&raw)
            .map(Option::unwrap_or_default)
            .map_err(|e| StoreError::Corrupt { key, reason: e.to_string() })
    }

    /// The stored list for `R`, or an empty list when absent or corrupt.
    /// Elements that are not JSON objects are skipped with a warning.
    pub fn history<R: HistoryRecord>(&self) -> Vec<R> {
        let key = R::KIND.storage_key();
        let items = match self.load_list(key) {
            Ok(items) => items,
            Err(e) => {
                warn!(key, error = %e, "failed to read stored history; using empty list");
                return Vec::new();
            }
        };
        items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(key, index, error = %e, "skipping history entry that is not an object");
                    None
                }
            })
            .collect()
    }

    /// Overwrite the stored list for `R`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the backend write fails.
    pub fn save_history<R: HistoryRecord>(&self, list: &[R]) -> Result<(), StoreError> {
        self.write_json(R::KIND.storage_key(), list)
    }

    /// Append one record to the stored list, leaving every existing element
    /// untouched. Returns the new length.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] without writing when the stored value
    /// is not a list of objects, and a storage error when the backend read
    /// or write fails.
    pub fn append<R: HistoryRecord>(&self, record: R) -> Result<usize, StoreError> {
        let key = R::KIND.storage_key();
        let mut items = self.load_list(key)?;
        if let Some(index) = items.iter().position(|item| !item.is_object()) {
            return Err(StoreError::Corrupt { key, reason: format!("entry {index} is not an object") });
        }
        let value = serde_json::to_value(&record).map_err(|source| StoreError::Encode { key, source })?;
        items.push(value);
        self.write_json(key, &items)?;
        Ok(items.len())
    }

    /// The stored list exactly as persisted, for tooling that does not care
    /// about the record type.
    pub fn history_json(&self, kind: HistoryKind) -> Value {
        let key = kind.storage_key();
        match self.load_list(key) {
            Ok(items) => Value::Array(items),
            Err(e) => {
                warn!(key, error = %e, "failed to read stored history; using empty list");
                Value::Array(Vec::new())
            }
        }
    }

    pub fn leave_requests(&self) -> Vec<LeaveRequest> {
        self.history()
    }

    /// # Errors
    ///
    /// Returns an error if encoding or the backend write fails.
    pub fn save_leave_requests(&self, requests: &[LeaveRequest]) -> Result<(), StoreError> {
        self.save_history(requests)
    }

    pub fn delivery_history(&self) -> Vec<DeliveryRecord> {
        self.history()
    }

    /// # Errors
    ///
    /// Returns an error if encoding or the backend write fails.
    pub fn save_delivery_history(&self, history: &[DeliveryRecord]) -> Result<(), StoreError> {
        self.save_history(history)
    }

    pub fn report_history(&self) -> Vec<ReportRecord> {
        self.history()
    }

    /// # Errors
    ///
    /// Returns an error if encoding or the backend write fails.
    pub fn save_report_history(&self, history: &[ReportRecord]) -> Result<(), StoreError> {
        self.save_history(history)
    }

    pub fn fine_history(&self) -> Vec<FineHistoryEntry> {
        self.history()
    }

    /// # Errors
    ///
    /// Returns an error if encoding or the backend write fails.
    pub fn save_fine_history(&self, history: &[FineHistoryEntry]) -> Result<(), StoreError> {
        self.save_history(history)
    }

    pub fn house_list(&self) -> Vec<HouseListEntry> {
        self.history()
    }

    /// # Errors
    ///
    /// Returns an error if encoding or the backend write fails.
    pub fn save_house_list(&self, houses: &[HouseListEntry]) -> Result<(), StoreError> {
        self.save_history(houses)
    }

    // =========================================================================
    // FINES
    // =========================================================================

    pub fn fine_list(&self) -> Vec<FineType> {
        self.settings().fine_list
    }

    /// Replace the fine list inside the stored settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings write fails.
    pub fn save_fine_list(&self, fines: Vec<FineType>) -> Result<(), StoreError> {
        let mut settings = self.settings();
        settings.fine_list = fines;
        self.save_settings(&settings)
    }

    pub fn fine_details(&self, name: &str) -> Option<FineType> {
        self.settings().fine_details(name).cloned()
    }

    // =========================================================================
    // PERMISSIONS, THEME, NOTIFICATIONS
    // =========================================================================

    pub fn check_page_permission(&self, group: &str, page: &str) -> bool {
        self.settings().check_page_permission(group, page)
    }

    /// Apply the stored theme to `page`, stamping the current year.
    pub fn apply_theme<P: Page + ?Sized>(&self, page: &P) {
        let theme = Theme::from_settings(&self.settings(), theme::current_year());
        theme::apply_theme(page, &theme);
    }

    /// Send `payload` to the webhook configured for `channel`.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::NotConfigured`] when the channel has no URL,
    /// otherwise whatever [`WebhookClient::send`] returns.
    pub async fn notify(
        &self,
        client: &WebhookClient,
        channel: WebhookChannel,
        payload: &WebhookPayload,
    ) -> Result<(), WebhookError> {
        let settings = self.settings();
        let Some(url) = settings.webhook_url(channel) else {
            warn!(%channel, "webhook not configured; notification skipped");
            return Err(WebhookError::NotConfigured(channel));
        };
        client.send(url, payload).await
    }
}
