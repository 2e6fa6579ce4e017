//! Serde support for patch fields that distinguish "absent" from `null`.
//!
//! Update payloads use `Option<Option<T>>`: the outer `None` means the field
//! was not sent, `Some(None)` means it was sent as `null` and should be cleared.
//! Pair with `#[serde(default)]` so a missing key stays `None`.

use serde::{Deserialize, Deserializer};

/// Deserialize a present key (including `null`) into `Some(..)`.
///
/// # Errors
///
/// Propagates the inner deserializer's error.
pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
