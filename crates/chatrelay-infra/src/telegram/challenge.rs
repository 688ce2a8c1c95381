//! In-flight login challenge bookkeeping.
//!
//! Challenges are taken out of the ledger for the duration of an attempt and
//! put back when the attempt fails in a retryable way (wrong code, wrong
//! password, transient gateway error). Only a successful attempt, or a code
//! attempt that escalates to a password challenge, consumes the entry for
//! good. The provider is the sole authority on code expiry; the relay never
//! invalidates a challenge server-side.

use dashmap::DashMap;

/// A code challenge: the provider token needed to finish the sign-in, plus
/// the correlation hash the caller must echo back.
pub(crate) struct CodeChallenge<C> {
    pub phone_code_hash: String,
    pub token: C,
}

/// Per-phone store of pending code and password challenges.
///
/// Generic over the token types so the consume/restore semantics are
/// testable without provider-issued tokens.
pub(crate) struct ChallengeLedger<C, P> {
    codes: DashMap<String, CodeChallenge<C>>,
    passwords: DashMap<String, P>,
}

impl<C, P> ChallengeLedger<C, P> {
    pub fn new() -> Self {
        Self {
            codes: DashMap::new(),
            passwords: DashMap::new(),
        }
    }

    /// Record a freshly issued code challenge, replacing any prior one for
    /// the phone.
    pub fn issue_code(&self, phone_number: &str, phone_code_hash: String, token: C) {
        self.codes.insert(
            phone_number.to_string(),
            CodeChallenge {
                phone_code_hash,
                token,
            },
        );
    }

    /// Take the code challenge for an attempt. A mismatched hash leaves the
    /// stored challenge untouched, so a caller echoing a stale hash cannot
    /// destroy a still-valid one.
    pub fn take_code(&self, phone_number: &str, phone_code_hash: &str) -> Option<CodeChallenge<C>> {
        let (key, challenge) = self.codes.remove(phone_number)?;
        if challenge.phone_code_hash != phone_code_hash {
            self.codes.insert(key, challenge);
            return None;
        }
        Some(challenge)
    }

    /// Put a code challenge back after a retryable failure.
    pub fn restore_code(&self, phone_number: &str, challenge: CodeChallenge<C>) {
        self.codes.insert(phone_number.to_string(), challenge);
    }

    pub fn store_password(&self, phone_number: &str, token: P) {
        self.passwords.insert(phone_number.to_string(), token);
    }

    pub fn take_password(&self, phone_number: &str) -> Option<P> {
        self.passwords.remove(phone_number).map(|(_, token)| token)
    }

    /// Put a password challenge back after a retryable failure.
    pub fn restore_password(&self, phone_number: &str, token: P) {
        self.passwords.insert(phone_number.to_string(), token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: &str = "+15551234567";

    fn ledger() -> ChallengeLedger<&'static str, &'static str> {
        ChallengeLedger::new()
    }

    #[test]
    fn test_take_with_matching_hash_consumes_challenge() {
        let ledger = ledger();
        ledger.issue_code(PHONE, "hash-1".to_string(), "token-1");

        let challenge = ledger.take_code(PHONE, "hash-1").unwrap();
        assert_eq!(challenge.token, "token-1");
        assert!(ledger.take_code(PHONE, "hash-1").is_none());
    }

    #[test]
    fn test_mismatched_hash_keeps_challenge_intact() {
        let ledger = ledger();
        ledger.issue_code(PHONE, "hash-1".to_string(), "token-1");

        assert!(ledger.take_code(PHONE, "stale-hash").is_none());
        // The valid challenge survives the bad attempt.
        let challenge = ledger.take_code(PHONE, "hash-1").unwrap();
        assert_eq!(challenge.token, "token-1");
    }

    #[test]
    fn test_restored_code_challenge_allows_retry() {
        let ledger = ledger();
        ledger.issue_code(PHONE, "hash-1".to_string(), "token-1");

        // First attempt fails with a wrong code; the challenge goes back.
        let challenge = ledger.take_code(PHONE, "hash-1").unwrap();
        ledger.restore_code(PHONE, challenge);

        // Second attempt with the same hash still reaches the token.
        let retry = ledger.take_code(PHONE, "hash-1").unwrap();
        assert_eq!(retry.token, "token-1");
        assert_eq!(retry.phone_code_hash, "hash-1");
    }

    #[test]
    fn test_reissue_replaces_prior_challenge() {
        let ledger = ledger();
        ledger.issue_code(PHONE, "hash-1".to_string(), "token-1");
        ledger.issue_code(PHONE, "hash-2".to_string(), "token-2");

        assert!(ledger.take_code(PHONE, "hash-1").is_none());
        assert_eq!(ledger.take_code(PHONE, "hash-2").unwrap().token, "token-2");
    }

    #[test]
    fn test_restored_password_challenge_allows_retry() {
        let ledger = ledger();
        ledger.store_password(PHONE, "srp-token");

        let token = ledger.take_password(PHONE).unwrap();
        ledger.restore_password(PHONE, token);

        assert_eq!(ledger.take_password(PHONE), Some("srp-token"));
        // Consumed after the successful second take.
        assert!(ledger.take_password(PHONE).is_none());
    }

    #[test]
    fn test_challenges_are_per_phone() {
        let ledger = ledger();
        ledger.issue_code(PHONE, "hash-a".to_string(), "token-a");
        ledger.issue_code("+15559876543", "hash-b".to_string(), "token-b");

        assert_eq!(ledger.take_code(PHONE, "hash-a").unwrap().token, "token-a");
        assert_eq!(
            ledger.take_code("+15559876543", "hash-b").unwrap().token,
            "token-b"
        );
    }
}
