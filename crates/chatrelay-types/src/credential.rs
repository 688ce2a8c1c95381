//! Credential record types: the persisted phone-number-to-session mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

/// Opaque serialized session token issued by the messaging provider after a
/// successful authentication.
///
/// The relay never inspects the contents -- it is stored and handed back to
/// the protocol client verbatim. `Debug` output is redacted so the blob
/// cannot leak through logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionBlob(pub String);

impl SessionBlob {
    pub fn new(blob: impl Into<String>) -> Self {
        Self(blob.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionBlob(<{} bytes redacted>)", self.0.len())
    }
}

/// A persisted mapping from phone number to session credential.
///
/// At most one record exists per phone number; repeated authentications for
/// the same number update the record in place (upsert) rather than creating
/// a new one. Records are never deleted -- staleness is decided at read time
/// by the session validity policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub phone_number: String,
    pub session: SessionBlob,
    /// Set when the record is first created. Absent only for records written
    /// by pre-release builds; the validity policy fails closed in that case.
    pub created_at: Option<DateTime<Utc>>,
    /// Bumped on every subsequent successful authentication.
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_blob_debug_is_redacted() {
        let blob = SessionBlob::new("AQAAAC1zZWNyZXQtc2Vzc2lvbg==");
        let debug = format!("{blob:?}");
        assert!(!debug.contains("secret"));
        assert!(!debug.contains("AQAAAC"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_session_blob_serializes_transparently() {
        let blob = SessionBlob::new("opaque");
        assert_eq!(serde_json::to_string(&blob).unwrap(), "\"opaque\"");
    }

    #[test]
    fn test_credential_record_roundtrip() {
        let record = CredentialRecord {
            phone_number: "+15551234567".to_string(),
            session: SessionBlob::new("blob"),
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        let parsed: CredentialRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.phone_number, "+15551234567");
        assert_eq!(parsed.session, record.session);
    }
}
