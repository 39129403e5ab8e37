//! Generic "fill what is missing" merge over JSON documents.
//!
//! Applied once per load with the serialized defaults as the template:
//! - absent, `null` or wrongly-typed values are replaced wholesale by the default;
//! - objects are merged key by key, recursively, keeping keys the template lacks;
//! - arrays and scalars of the right type are kept untouched.

#[cfg(test)]
#[path = "merge_test.rs"]
mod merge_test;

use serde_json::Value;

/// Fill `target` from `template`. Returns the number of values substituted.
pub fn fill_missing(target: &mut Value, template: &Value) -> usize {
    if !same_kind(target, template) {
        *target = template.clone();
        return 1;
    }

    let (Value::Object(fields), Value::Object(defaults)) = (target, template) else {
        return 0;
    };

    let mut filled = 0;
    for (key, default) in defaults {
        match fields.get_mut(key) {
            Some(existing) => filled += fill_missing(existing, default),
            None => {
                fields.insert(key.clone(), default.clone());
                filled += 1;
            }
        }
    }
    filled
}

fn same_kind(a: &Value, b: &Value) -> bool {
    matches!(
        (a, b),
        (Value::Bool(_), Value::Bool(_))
            | (Value::Number(_), Value::Number(_))
            | (Value::String(_), Value::String(_))
            | (Value::Array(_), Value::Array(_))
            | (Value::Object(_), Value::Object(_))
    ) || matches!(b, Value::Null)
}
