//! Credential repository trait definition.

use chatrelay_types::credential::{CredentialRecord, SessionBlob};
use chatrelay_types::error::RepositoryError;

/// Trait for the durable phone-number-to-session store.
///
/// Implementations must guarantee at most one record per phone number:
/// `upsert` creates the record on first write and updates `session` and
/// `updated_at` in place on every later write for the same number.
pub trait CredentialRepository: Send + Sync {
    /// Look up the credential record for a phone number.
    /// Returns None when the number has never authenticated.
    fn find_by_phone(
        &self,
        phone_number: &str,
    ) -> impl std::future::Future<Output = Result<Option<CredentialRecord>, RepositoryError>> + Send;

    /// Insert or update the credential for a phone number, returning the
    /// persisted record. Concurrent upserts for the same number are
    /// last-writer-wins; no extra locking is provided.
    fn upsert(
        &self,
        phone_number: &str,
        session: &SessionBlob,
    ) -> impl std::future::Future<Output = Result<CredentialRecord, RepositoryError>> + Send;
}
