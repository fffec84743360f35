//! Optional integrity seal for the ledger wire format.
//!
//! A sealed payload is `{"state": <ledger>, "seal": "<hex>"}` where the seal is
//! a BLAKE3 keyed hash of the serialized state. The key never leaves the
//! server, so a client can carry the ledger but cannot alter it unnoticed.

use serde_json::{json, Value};

use super::ledger::{Ledger, LedgerError};

/// Key used to seal and open ledgers.
pub type SealKey = [u8; 32];

fn digest(key: &SealKey, state: &str) -> blake3::Hash {
    blake3::keyed_hash(key, state.as_bytes())
}

/// Serialize `ledger` with a seal.
pub fn seal(ledger: &Ledger, key: &SealKey) -> Result<String, LedgerError> {
    let state = ledger.to_json()?;
    let seal = digest(key, &state).to_hex().to_string();
    Ok(json!({ "state": ledger.to_value(), "seal": seal }).to_string())
}

/// Strictly open a sealed payload.
pub fn open(text: &str, key: &SealKey) -> Result<Ledger, LedgerError> {
    let Value::Object(mut payload) = serde_json::from_str::<Value>(text)? else {
        return Err(LedgerError::NotAnObject);
    };
    let seal = payload
        .remove("seal")
        .and_then(|v| v.as_str().and_then(|s| blake3::Hash::from_hex(s).ok()))
        .ok_or(LedgerError::MissingSeal)?;
    let ledger = Ledger::from_value(payload.remove("state").unwrap_or(Value::Null))?;
    // Hash equality is constant time.
    if digest(key, &ledger.to_json()?) != seal {
        return Err(LedgerError::SealMismatch);
    }
    Ok(ledger)
}

/// Open a sealed payload, falling back to an empty ledger on any failure.
pub fn open_lossy(text: &str, key: &SealKey) -> Ledger {
    if text.trim().is_empty() {
        return Ledger::new();
    }
    match open(text, key) {
        Ok(ledger) => ledger,
        Err(err) => {
            tracing::warn!(error = %err, "discarding unsealed or tampered ledger");
            Ledger::new()
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
