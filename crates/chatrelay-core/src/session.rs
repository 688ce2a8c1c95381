//! Session validity policy.
//!
//! Pure boundary check deciding whether a stored credential can be reused
//! without re-authentication. No side effects; `now` is injected so the
//! policy stays deterministic under test.

use chrono::{DateTime, Utc};

use chatrelay_types::credential::CredentialRecord;

/// How long a session credential stays usable: 5 days, in milliseconds.
pub const SESSION_TTL_MS: i64 = 5 * 24 * 60 * 60 * 1000;

/// Whether the credential is still usable at `now`.
///
/// Reference timestamp is `updated_at` when present, else `created_at`;
/// the record is valid iff the wall-clock difference is strictly less than
/// five days. A record with neither timestamp is invalid (fail closed).
pub fn is_session_valid(record: &CredentialRecord, now: DateTime<Utc>) -> bool {
    let Some(reference) = record.updated_at.or(record.created_at) else {
        return false;
    };
    now.signed_duration_since(reference).num_milliseconds() < SESSION_TTL_MS
}
