use thiserror::Error;

/// Relay-level error with a discriminated kind.
///
/// Every failure surfaced to an API caller is one of these four kinds, each
/// carrying a safe user-facing message decoupled from any library's native
/// error text. The HTTP layer maps kinds to status codes.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid request: {0}")]
    Input(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("upstream error: {0}")]
    Upstream(String),
}

/// Errors from repository operations (used by trait definitions in
/// chatrelay-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from the messaging-protocol gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("connection error: {0}")]
    Connect(String),

    #[error("telegram rpc error: {0}")]
    Rpc(String),

    #[error("stored session blob is not usable")]
    InvalidSession,
}

/// Failures of the code-verification step of the login flow.
///
/// `PasswordRequired` is the one condition with a recovery path (two-factor
/// password proof); everything else propagates unchanged.
#[derive(Debug, Error)]
pub enum SignInError {
    #[error("two-factor password required")]
    PasswordRequired,

    #[error("invalid or expired login code")]
    InvalidCode,

    #[error("invalid two-factor password")]
    InvalidPassword,

    #[error("unknown login challenge for this phone number")]
    UnknownChallenge,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl From<RepositoryError> for RelayError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => RelayError::NotFound("credential".to_string()),
            other => RelayError::Upstream(other.to_string()),
        }
    }
}

impl From<GatewayError> for RelayError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::InvalidSession => {
                RelayError::Auth("stored session is not usable, log in again".to_string())
            }
            other => RelayError::Upstream(other.to_string()),
        }
    }
}
