//! In-memory fakes for the port traits, shared by the service tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;

use chatrelay_types::credential::{CredentialRecord, SessionBlob};
use chatrelay_types::error::{GatewayError, RepositoryError, SignInError};
use chatrelay_types::telegram::{DialogInfo, MessageInfo, ParticipantInfo, PendingLogin};

use crate::repository::credential::CredentialRepository;
use crate::telegram::TelegramGateway;

/// Scripted one-shot responses for [`MockGateway`]. A `None` (or consumed)
/// slot falls back to a deterministic success.
#[derive(Default)]
pub struct GatewayScript {
    pub send_code: Option<Result<PendingLogin, GatewayError>>,
    pub sign_in: Option<Result<SessionBlob, SignInError>>,
    pub check_password: Option<Result<SessionBlob, SignInError>>,
    pub dialogs: Option<Result<Vec<DialogInfo>, GatewayError>>,
    pub participants: Option<Result<Vec<ParticipantInfo>, GatewayError>>,
    pub messages: Option<Result<Vec<MessageInfo>, GatewayError>>,
}

pub struct MockGateway {
    script: Mutex<GatewayScript>,
    check_password_called: AtomicBool,
}

impl MockGateway {
    pub fn new(script: GatewayScript) -> Self {
        Self {
            script: Mutex::new(script),
            check_password_called: AtomicBool::new(false),
        }
    }

    pub fn check_password_called(&self) -> bool {
        self.check_password_called.load(Ordering::SeqCst)
    }
}

fn default_session(phone_number: &str) -> SessionBlob {
    SessionBlob::new(format!("session-for-{phone_number}"))
}

impl TelegramGateway for MockGateway {
    async fn send_login_code(&self, phone_number: &str) -> Result<PendingLogin, GatewayError> {
        match self.script.lock().unwrap().send_code.take() {
            Some(result) => result,
            None => Ok(PendingLogin {
                phone_number: phone_number.to_string(),
                phone_code_hash: format!("hash-{phone_number}"),
            }),
        }
    }

    async fn sign_in(
        &self,
        phone_number: &str,
        _phone_code: &str,
        _phone_code_hash: &str,
    ) -> Result<SessionBlob, SignInError> {
        match self.script.lock().unwrap().sign_in.take() {
            Some(result) => result,
            None => Ok(default_session(phone_number)),
        }
    }

    async fn check_password(
        &self,
        phone_number: &str,
        _password: &str,
    ) -> Result<SessionBlob, SignInError> {
        self.check_password_called.store(true, Ordering::SeqCst);
        match self.script.lock().unwrap().check_password.take() {
            Some(result) => result,
            None => Ok(default_session(phone_number)),
        }
    }

    async fn list_dialogs(
        &self,
        _phone_number: &str,
        _session: &SessionBlob,
    ) -> Result<Vec<DialogInfo>, GatewayError> {
        match self.script.lock().unwrap().dialogs.take() {
            Some(result) => result,
            None => Ok(Vec::new()),
        }
    }

    async fn chat_participants(
        &self,
        _phone_number: &str,
        _session: &SessionBlob,
        _chat_id: i64,
    ) -> Result<Vec<ParticipantInfo>, GatewayError> {
        match self.script.lock().unwrap().participants.take() {
            Some(result) => result,
            None => Ok(Vec::new()),
        }
    }

    async fn recent_messages(
        &self,
        _phone_number: &str,
        _session: &SessionBlob,
        _chat_id: i64,
        _limit: usize,
    ) -> Result<Vec<MessageInfo>, GatewayError> {
        // Deliberately ignores `limit` so the service's defensive cap is
        // exercised by tests.
        match self.script.lock().unwrap().messages.take() {
            Some(result) => result,
            None => Ok(Vec::new()),
        }
    }
}

/// HashMap-backed credential store with the upsert semantics of the real
/// repository: `created_at` set once, `updated_at` bumped on every rewrite.
#[derive(Default)]
pub struct MockRepo {
    records: Mutex<HashMap<String, CredentialRecord>>,
}

impl MockRepo {
    pub fn get(&self, phone_number: &str) -> Option<CredentialRecord> {
        self.records.lock().unwrap().get(phone_number).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn insert_record(&self, record: CredentialRecord) {
        self.records
            .lock()
            .unwrap()
            .insert(record.phone_number.clone(), record);
    }
}

impl CredentialRepository for MockRepo {
    async fn find_by_phone(
        &self,
        phone_number: &str,
    ) -> Result<Option<CredentialRecord>, RepositoryError> {
        Ok(self.records.lock().unwrap().get(phone_number).cloned())
    }

    async fn upsert(
        &self,
        phone_number: &str,
        session: &SessionBlob,
    ) -> Result<CredentialRecord, RepositoryError> {
        let mut records = self.records.lock().unwrap();
        let now = Utc::now();
        let record = match records.get(phone_number) {
            Some(existing) => CredentialRecord {
                phone_number: phone_number.to_string(),
                session: session.clone(),
                created_at: existing.created_at,
                updated_at: Some(now),
            },
            None => CredentialRecord {
                phone_number: phone_number.to_string(),
                session: session.clone(),
                created_at: Some(now),
                updated_at: None,
            },
        };
        records.insert(phone_number.to_string(), record.clone());
        Ok(record)
    }
}
