//! Per-phone MTProto client pool.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chatrelay_types::credential::SessionBlob;
use chatrelay_types::error::GatewayError;
use dashmap::DashMap;
use grammers_client::{Client, Config, InitParams};
use grammers_session::Session;
use tracing::debug;

/// Pool of connected MTProto clients, one per phone number.
///
/// A client created for the login flow starts with a fresh session; a client
/// created for read operations is restored from the stored blob and must be
/// authorized. Clients are cheap to clone (internally reference-counted), so
/// concurrent requests for the same phone share one connection.
pub struct ClientPool {
    api_id: i32,
    api_hash: String,
    clients: DashMap<String, Client>,
}

impl ClientPool {
    pub fn new(api_id: i32, api_hash: String) -> Self {
        Self {
            api_id,
            api_hash,
            clients: DashMap::new(),
        }
    }

    /// Client for a login flow. Reuses the phone's pooled client when one
    /// exists, otherwise connects with a blank session.
    pub async fn login_client(&self, phone_number: &str) -> Result<Client, GatewayError> {
        if let Some(existing) = self.clients.get(phone_number) {
            return Ok(existing.clone());
        }

        debug!(phone = %phone_number, "connecting fresh mtproto client");
        let client = self.connect(Session::new()).await?;
        self.clients.insert(phone_number.to_string(), client.clone());
        Ok(client)
    }

    /// Client restored from a stored session blob. Fails with
    /// [`GatewayError::InvalidSession`] when the blob does not decode or the
    /// restored session is no longer authorized.
    pub async fn session_client(
        &self,
        phone_number: &str,
        blob: &SessionBlob,
    ) -> Result<Client, GatewayError> {
        if let Some(existing) = self.clients.get(phone_number) {
            let client = existing.clone();
            drop(existing);
            if client
                .is_authorized()
                .await
                .map_err(|e| GatewayError::Rpc(e.to_string()))?
            {
                return Ok(client);
            }
            // The pooled client lost its authorization; rebuild from the blob.
            self.clients.remove(phone_number);
        }

        let bytes = BASE64
            .decode(blob.as_str())
            .map_err(|_| GatewayError::InvalidSession)?;
        let session = Session::load(&bytes).map_err(|_| GatewayError::InvalidSession)?;

        debug!(phone = %phone_number, "restoring mtproto client from stored session");
        let client = self.connect(session).await?;
        if !client
            .is_authorized()
            .await
            .map_err(|e| GatewayError::Rpc(e.to_string()))?
        {
            return Err(GatewayError::InvalidSession);
        }

        self.clients.insert(phone_number.to_string(), client.clone());
        Ok(client)
    }

    async fn connect(&self, session: Session) -> Result<Client, GatewayError> {
        Client::connect(Config {
            session,
            api_id: self.api_id,
            api_hash: self.api_hash.clone(),
            params: InitParams::default(),
        })
        .await
        .map_err(|e| GatewayError::Connect(e.to_string()))
    }
}

/// Encode a raw session dump as the opaque blob the relay stores.
pub fn encode_session_bytes(bytes: &[u8]) -> SessionBlob {
    SessionBlob::new(BASE64.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_session_bytes_is_base64() {
        let blob = encode_session_bytes(b"hello session");
        assert_eq!(BASE64.decode(blob.as_str()).unwrap(), b"hello session");
    }

    #[test]
    fn test_garbage_blob_fails_closed() {
        let bad = SessionBlob::new("not base64 at all!!!");
        assert!(BASE64.decode(bad.as_str()).is_err());
    }
}
