//! Application state wiring the services to their infra implementations.
//!
//! The state stays generic over the protocol gateway so the router can be
//! exercised against a scripted gateway in tests; `init` pins it to the
//! grammers implementation.

use std::sync::Arc;

use chatrelay_core::auth::AuthService;
use chatrelay_core::chats::ChatService;
use chatrelay_core::telegram::TelegramGateway;
use chatrelay_infra::config::{RelayConfig, resolve_data_dir};
use chatrelay_infra::sqlite::credential::SqliteCredentialRepository;
use chatrelay_infra::sqlite::pool::DatabasePool;
use chatrelay_infra::telegram::GrammersGateway;

/// Shared state behind every HTTP handler.
///
/// Both services hold the same gateway so in-flight login challenges and the
/// per-phone client pool are shared between the login and read endpoints.
pub struct AppState<G: TelegramGateway = GrammersGateway> {
    pub auth_service: Arc<AuthService<SqliteCredentialRepository, Arc<G>>>,
    pub chat_service: Arc<ChatService<SqliteCredentialRepository, Arc<G>>>,
    pub db_pool: DatabasePool,
}

// Manual impl: `#[derive(Clone)]` would demand `G: Clone`, which the Arcs
// make unnecessary.
impl<G: TelegramGateway> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            chat_service: Arc::clone(&self.chat_service),
            db_pool: self.db_pool.clone(),
        }
    }
}

impl AppState {
    /// Initialize production state: data directory, database, grammers
    /// gateway.
    pub async fn init(config: &RelayConfig) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("chatrelay.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        let gateway = Arc::new(GrammersGateway::new(config.api_id, config.api_hash.clone()));
        Ok(Self::assemble(db_pool, gateway))
    }
}

impl<G: TelegramGateway> AppState<G> {
    /// Wire the services around an already-built pool and gateway.
    pub fn assemble(db_pool: DatabasePool, gateway: Arc<G>) -> Self {
        let auth_service = AuthService::new(
            SqliteCredentialRepository::new(db_pool.clone()),
            Arc::clone(&gateway),
        );
        let chat_service =
            ChatService::new(SqliteCredentialRepository::new(db_pool.clone()), gateway);

        Self {
            auth_service: Arc::new(auth_service),
            chat_service: Arc::new(chat_service),
            db_pool,
        }
    }
}
