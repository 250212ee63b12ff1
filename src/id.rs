// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Random identifiers for activities and goals.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use ring::rand::{SecureRandom, SystemRandom};

const ID_BYTES: usize = 9;

/// Generate a short URL-safe random identifier (12 characters).
pub fn new_id() -> String {
    let mut bytes = [0u8; ID_BYTES];
    if SystemRandom::new().fill(&mut bytes).is_err() {
        tracing::warn!("System RNG unavailable, deriving id from the clock");
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        bytes[..8].copy_from_slice(&nanos.to_le_bytes());
    }
    URL_SAFE_NO_PAD.encode(bytes)
}
