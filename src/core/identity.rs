//! Client identity persisted in localStorage.
//!
//! The id is created once per browser profile and sent with every request so
//! the backend can keep per-client conversation state.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::CLIENT_ID_KEY;
use crate::core::error::StorageError;
use crate::utils::{dom, now_ms};

/// Length of a client id in hex characters (128 bits).
const CLIENT_ID_LEN: usize = 32;

/// Load the stored client id, creating and persisting a new one if missing.
///
/// Falls back to an unsaved id when storage is unavailable, so a session
/// always has an identity.
pub fn load_or_create() -> String {
    if let Some(id) = load() {
        return id;
    }

    let id = generate();
    if let Err(e) = persist(&id) {
        web_sys::console::warn_1(&format!("client id not persisted: {e}").into());
    }
    id
}

fn load() -> Option<String> {
    let id = dom::local_storage()?.get_item(CLIENT_ID_KEY).ok()??;
    is_valid(&id).then_some(id)
}

fn persist(id: &str) -> Result<(), StorageError> {
    let storage = dom::local_storage().ok_or(StorageError::Unavailable)?;
    storage
        .set_item(CLIENT_ID_KEY, id)
        .map_err(|_| StorageError::WriteFailed)
}

/// Generate a random 128-bit id as lowercase hex.
pub fn generate() -> String {
    let mut bytes = [0u8; CLIENT_ID_LEN / 2];
    if getrandom::getrandom(&mut bytes).is_err() {
        web_sys::console::warn_1(&"no entropy source, client id is not cryptographic".into());
        fill_fallback(&mut bytes);
    }
    hex::encode(bytes)
}

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Fill `bytes` from the clock, a per-process counter and a runtime seed,
/// so two clients starting in the same millisecond still differ.
fn fill_fallback(bytes: &mut [u8]) {
    let count = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut state = (now_ms() as u64) ^ count.rotate_left(32) ^ runtime_seed();
    for chunk in bytes.chunks_mut(8) {
        state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        chunk.copy_from_slice(&splitmix64(state).to_le_bytes()[..chunk.len()]);
    }
}

fn splitmix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(target_arch = "wasm32")]
fn runtime_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_seed() -> u64 {
    use std::hash::{BuildHasher, Hasher};
    std::collections::hash_map::RandomState::new()
        .build_hasher()
        .finish()
}

/// Whether a stored value looks like an id we generated.
pub fn is_valid(id: &str) -> bool {
    id.len() == CLIENT_ID_LEN && id.bytes().all(|b| b.is_ascii_hexdigit())
}
