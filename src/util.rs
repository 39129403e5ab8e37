//! Small platform shims and shared helpers.

use std::time::Duration;

use serde::Deserialize as _;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Sleep on whichever timer the build targets: browser `setTimeout` in
/// hydrate builds, the tokio timer natively.
pub async fn sleep(duration: Duration) {
    #[cfg(feature = "hydrate")]
    {
        gloo_timers::future::sleep(duration).await;
    }
    #[cfg(not(feature = "hydrate"))]
    {
        tokio::time::sleep(duration).await;
    }
}

/// Move `key` out of `fields` if its value decodes as `T`; otherwise leave it.
pub(crate) fn take_field<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Option<T> {
    let typed = T::deserialize(fields.get(key)?).ok()?;
    fields.remove(key);
    Some(typed)
}
