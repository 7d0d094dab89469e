//! Cart snapshots
//!
//! The whole [`CartState`] is written to a single storage slot as a versioned
//! JSON envelope:
//!
//! ```json
//! { "version": 1, "state": { "lines": [ ... ] } }
//! ```
//!
//! Restoring is best effort. A snapshot that is missing, unreadable, from
//! another version or that breaks a cart invariant is discarded in favour of
//! an empty cart.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::cart::{CartState, InvariantViolation};

mod persist;
mod storage;

pub use persist::PersistObserver;
pub use storage::{FileStorage, MemoryStorage, SnapshotStorage, StorageError, validate_key};

/// Storage key the cart is persisted under.
pub const CART_SNAPSHOT_KEY: &str = "foodie-cart";

/// Envelope version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors raised while saving or loading a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The stored bytes are not a snapshot envelope.
    #[error("failed to decode cart snapshot: {0}")]
    Decode(#[source] serde_json::Error),

    /// The state could not be serialized.
    #[error("failed to encode cart snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    /// The envelope was written by an incompatible version.
    #[error("unsupported cart snapshot version {found}, expected {expected}")]
    UnsupportedVersion {
        /// Version found in the envelope.
        found: u32,

        /// Version this build reads.
        expected: u32,
    },

    /// The decoded state breaks a cart invariant.
    #[error("corrupt cart snapshot: {0}")]
    Corrupt(#[from] InvariantViolation),

    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Deserialize)]
struct VersionProbe {
    version: u32,
}

#[derive(Debug, Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    state: &'a CartState,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    state: CartState,
}

/// Serializes a state into snapshot bytes.
///
/// # Errors
///
/// Returns [`SnapshotError::Encode`] if serialization fails.
pub fn encode(state: &CartState) -> Result<Vec<u8>, SnapshotError> {
    serde_json::to_vec(&EnvelopeRef {
        version: SNAPSHOT_VERSION,
        state,
    })
    .map_err(SnapshotError::Encode)
}

/// Deserializes snapshot bytes and checks the result against the cart
/// invariants.
///
/// # Errors
///
/// - [`SnapshotError::Decode`]: the bytes are not a snapshot envelope.
/// - [`SnapshotError::UnsupportedVersion`]: the envelope has another version.
/// - [`SnapshotError::Corrupt`]: the state breaks a cart invariant.
pub fn decode(bytes: &[u8]) -> Result<CartState, SnapshotError> {
    let probe: VersionProbe = serde_json::from_slice(bytes).map_err(SnapshotError::Decode)?;

    if probe.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found: probe.version,
            expected: SNAPSHOT_VERSION,
        });
    }

    let envelope: Envelope = serde_json::from_slice(bytes).map_err(SnapshotError::Decode)?;

    envelope.state.validate()?;

    Ok(envelope.state)
}

/// Writes the state to the slot named `key`.
///
/// # Errors
///
/// Returns a [`SnapshotError`] if encoding or the storage write fails.
pub fn save_cart(
    storage: &impl SnapshotStorage,
    key: &str,
    state: &CartState,
) -> Result<(), SnapshotError> {
    let bytes = encode(state)?;

    storage.write(key, &bytes)?;

    Ok(())
}

/// Reads the state from the slot named `key`.
///
/// Returns `Ok(None)` when the slot is empty.
///
/// # Errors
///
/// Returns a [`SnapshotError`] if the storage read or decoding fails.
pub fn load_cart(
    storage: &impl SnapshotStorage,
    key: &str,
) -> Result<Option<CartState>, SnapshotError> {
    storage
        .read(key)?
        .map(|bytes| decode(&bytes))
        .transpose()
}

/// Reads the state from the slot named `key`, falling back to an empty cart.
///
/// Failures are logged and never returned.
pub fn restore_cart(storage: &impl SnapshotStorage, key: &str) -> CartState {
    match load_cart(storage, key) {
        Ok(Some(state)) => state,
        Ok(None) => CartState::new(),
        Err(error) => {
            warn!(
                key = %key,
                error = %error,
                "discarding unusable cart snapshot; starting with an empty cart"
            );

            CartState::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::cart::{CartStore, NewCartLine};

    use super::*;

    fn sample_state() -> TestResult<CartState> {
        let mut store = CartStore::new();

        store.add_item(
            NewCartLine::new("a", "R1", "Roma", "Margherita", Decimal::new(1050, 2))
                .with_image_url("https://img/a.png"),
        )?;
        store.add_item(
            NewCartLine::new("b", "R1", "Roma", "Salad", Decimal::new(700, 2)).vegetarian(true),
        )?;
        store.add_item(NewCartLine::new(
            "a",
            "R1",
            "Roma",
            "Margherita",
            Decimal::new(1050, 2),
        ))?;

        Ok(store.state().clone())
    }

    #[test]
    fn encode_then_decode_is_structurally_equal() -> TestResult {
        let state = sample_state()?;

        let decoded = decode(&encode(&state)?)?;

        assert_eq!(decoded, state);

        Ok(())
    }

    #[test]
    fn encoded_envelope_carries_version() -> TestResult {
        let bytes = encode(&CartState::new())?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;

        assert_eq!(value.pointer("/version"), Some(&SNAPSHOT_VERSION.into()));
        assert!(
            value
                .pointer("/state/lines")
                .and_then(serde_json::Value::as_array)
                .is_some_and(Vec::is_empty)
        );

        Ok(())
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            decode(b"this is not json"),
            Err(SnapshotError::Decode(_))
        ));
    }

    #[test]
    fn decode_rejects_other_versions() {
        let bytes = br#"{"version": 0, "state": {"lines": []}}"#;

        assert!(matches!(
            decode(bytes),
            Err(SnapshotError::UnsupportedVersion {
                found: 0,
                expected: 1
            })
        ));
    }

    #[test]
    fn decode_rejects_zero_quantity_lines() {
        let bytes = br#"{"version": 1, "state": {"lines": [
            {"id": "a", "restaurant_id": "R1", "restaurant_name": "Roma",
             "name": "Margherita", "unit_price": "10.50", "quantity": 0}
        ]}}"#;

        assert!(matches!(decode(bytes), Err(SnapshotError::Corrupt(_))));
    }

    #[test]
    fn decode_rejects_overflowing_total() {
        let bytes = br#"{"version": 1, "state": {"lines": [
            {"id": "a", "restaurant_id": "R1", "restaurant_name": "Roma",
             "name": "Gold", "unit_price": "79228162514264337593543950335", "quantity": 2}
        ]}}"#;

        assert!(matches!(
            decode(bytes),
            Err(SnapshotError::Corrupt(InvariantViolation::TotalOverflow))
        ));
    }

    #[test]
    fn restore_falls_back_to_empty_on_corrupt_slot() -> TestResult {
        let storage = MemoryStorage::new();
        storage.write(CART_SNAPSHOT_KEY, b"{\"version\": 1, \"state\": 42}")?;

        let state = restore_cart(&storage, CART_SNAPSHOT_KEY);

        assert!(state.is_empty());

        Ok(())
    }

    #[test]
    fn restore_missing_slot_is_empty() {
        let storage = MemoryStorage::new();

        assert!(restore_cart(&storage, CART_SNAPSHOT_KEY).is_empty());
    }

    #[test]
    fn save_then_load_through_storage() -> TestResult {
        let storage = MemoryStorage::new();
        let state = sample_state()?;

        save_cart(&storage, CART_SNAPSHOT_KEY, &state)?;

        assert_eq!(load_cart(&storage, CART_SNAPSHOT_KEY)?, Some(state));

        Ok(())
    }
}
