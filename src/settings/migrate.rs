//! Versioned schema migrations for the stored settings document.
//!
//! Documents carry a `schemaVersion` number (absent = 0). On load, every
//! migration newer than the stored version runs in order against the raw
//! JSON, then the version is stamped. Migrations marked `every_load` also
//! run on current documents, since older pages still write the legacy shape.
//! Migrations must be idempotent: a read never writes back, so an unsaved
//! document is migrated on every load.

#[cfg(test)]
#[path = "migrate_test.rs"]
mod migrate_test;

use serde_json::{Map, Value};
use tracing::debug;

pub const SCHEMA_VERSION_KEY: &str = "schemaVersion";
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

struct Migration {
    version: u32,
    name: &'static str,
    every_load: bool,
    /// Returns whether the document changed.
    apply: fn(&mut Map<String, Value>) -> bool,
}

const MIGRATIONS: &[Migration] =
    &[Migration { version: 1, name: "user_role_to_group", every_load: true, apply: user_role_to_group }];

/// Read the stored schema version; anything that is not a small integer is 0.
#[must_use]
pub fn stored_version(doc: &Map<String, Value>) -> u32 {
    doc.get(SCHEMA_VERSION_KEY)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0)
}

/// Bring `doc` up to [`CURRENT_SCHEMA_VERSION`]. Returns the migrations that
/// ran because the document was older, or that changed a current document.
pub fn migrate(doc: &mut Map<String, Value>) -> Vec<&'static str> {
    let from = stored_version(doc);
    let mut applied = Vec::new();
    for migration in MIGRATIONS.iter().filter(|m| m.version > from || m.every_load) {
        let changed = (migration.apply)(doc);
        if migration.version <= from && !changed {
            continue;
        }
        debug!(migration = migration.name, version = migration.version, "applied settings migration");
        applied.push(migration.name);
    }
    if from < CURRENT_SCHEMA_VERSION {
        doc.insert(SCHEMA_VERSION_KEY.to_owned(), Value::from(CURRENT_SCHEMA_VERSION));
    }
    applied
}

/// v1: users used to carry `role`; it is now `group`.
fn user_role_to_group(doc: &mut Map<String, Value>) -> bool {
    let Some(Value::Object(users)) = doc.get_mut("users") else {
        return false;
    };
    let mut changed = false;
    for user in users.values_mut() {
        let Value::Object(user) = user else {
            continue;
        };
        if !is_truthy(user.get("role")) || is_truthy(user.get("group")) {
            continue;
        }
        if let Some(role) = user.remove("role") {
            user.insert("group".to_owned(), role);
            changed = true;
        }
    }
    changed
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}
