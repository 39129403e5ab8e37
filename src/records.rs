//! Typed history records.
//!
//! Page forms decide what goes into each record, so every type names the
//! fields the site's forms use, all optional, and keeps anything else in a
//! flattened `extra` map. A known field is only lifted out of the stored
//! object when it has the expected type; a `null` or differently-typed value
//! stays in `extra` and is written back unchanged. Absent fields stay absent.
//! Persistence treats the lists as opaque, insertion-ordered arrays: no
//! dedup, ordering or size limits.

#[cfg(test)]
#[path = "records_test.rs"]
mod records_test;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::storage::keys;
use crate::util::take_field;

/// A record type persisted as a JSON array under its own storage key.
pub trait HistoryRecord: Serialize + DeserializeOwned {
    const KIND: HistoryKind;
}

/// Tags the five history lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryKind {
    Leave,
    Delivery,
    Report,
    Fine,
    House,
}

impl HistoryKind {
    pub const ALL: [Self; 5] = [Self::Leave, Self::Delivery, Self::Report, Self::Fine, Self::House];

    #[must_use]
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Leave => keys::LEAVE_REQUESTS,
            Self::Delivery => keys::DELIVERY_HISTORY,
            Self::Report => keys::REPORT_HISTORY,
            Self::Fine => keys::FINE_HISTORY,
            Self::House => keys::HOUSE_LIST,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Leave => "leave",
            Self::Delivery => "delivery",
            Self::Report => "report",
            Self::Fine => "fine",
            Self::House => "house",
        }
    }
}

impl fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for HistoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s) || k.storage_key() == s)
            .ok_or_else(|| format!("unknown history list: {s}"))
    }
}

/// A leave request submitted from `leave_form.html`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Map<String, Value>")]
pub struct LeaveRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leave_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for LeaveRequest {
    fn from(mut extra: Map<String, Value>) -> Self {
        Self {
            username: take_field(&mut extra, "username"),
            leave_type: take_field(&mut extra, "leaveType"),
            start_date: take_field(&mut extra, "startDate"),
            end_date: take_field(&mut extra, "endDate"),
            reason: take_field(&mut extra, "reason"),
            timestamp: take_field(&mut extra, "timestamp"),
            extra,
        }
    }
}

impl HistoryRecord for LeaveRequest {
    const KIND: HistoryKind = HistoryKind::Leave;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Map<String, Value>")]
pub struct DeliveryRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for DeliveryRecord {
    fn from(mut extra: Map<String, Value>) -> Self {
        Self {
            username: take_field(&mut extra, "username"),
            item: take_field(&mut extra, "item"),
            quantity: take_field(&mut extra, "quantity"),
            timestamp: take_field(&mut extra, "timestamp"),
            extra,
        }
    }
}

impl HistoryRecord for DeliveryRecord {
    const KIND: HistoryKind = HistoryKind::Delivery;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Map<String, Value>")]
pub struct ReportRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for ReportRecord {
    fn from(mut extra: Map<String, Value>) -> Self {
        Self {
            username: take_field(&mut extra, "username"),
            subject: take_field(&mut extra, "subject"),
            details: take_field(&mut extra, "details"),
            timestamp: take_field(&mut extra, "timestamp"),
            extra,
        }
    }
}

impl HistoryRecord for ReportRecord {
    const KIND: HistoryKind = HistoryKind::Report;
}

/// A fine issued against a member, priced from the settings' fine list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Map<String, Value>")]
pub struct FineHistoryEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fine_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for FineHistoryEntry {
    fn from(mut extra: Map<String, Value>) -> Self {
        Self {
            username: take_field(&mut extra, "username"),
            fine_name: take_field(&mut extra, "fineName"),
            amount: take_field(&mut extra, "amount"),
            issued_by: take_field(&mut extra, "issuedBy"),
            timestamp: take_field(&mut extra, "timestamp"),
            extra,
        }
    }
}

impl HistoryRecord for FineHistoryEntry {
    const KIND: HistoryKind = HistoryKind::Fine;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Map<String, Value>")]
pub struct HouseListEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for HouseListEntry {
    fn from(mut extra: Map<String, Value>) -> Self {
        Self {
            house_name: take_field(&mut extra, "houseName"),
            owner: take_field(&mut extra, "owner"),
            members: take_field(&mut extra, "members"),
            extra,
        }
    }
}

impl HistoryRecord for HouseListEntry {
    const KIND: HistoryKind = HistoryKind::House;
}
