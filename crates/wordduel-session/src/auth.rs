//! Identity hook for connecting players.
//!
//! The game itself is anonymous, so the default [`AnonymousAuthenticator`]
//! just derives a player id from the connection. Deployments that want
//! real accounts implement [`Authenticator`] against their own provider
//! (JWT, API keys, ...) and pass it to the server builder.

use wordduel_protocol::PlayerId;
use wordduel_transport::ConnectionId;

use crate::SessionError;

/// Turns a freshly accepted connection into a player identity.
///
/// `credentials` is whatever the connection presented when it was opened
/// (for WebSocket, the `token` query parameter).
///
/// # Example
///
/// ```rust
/// use wordduel_protocol::PlayerId;
/// use wordduel_session::{Authenticator, SessionError};
/// use wordduel_transport::ConnectionId;
///
/// /// Requires a numeric token and uses it as the player id.
/// struct NumericToken;
///
/// impl Authenticator for NumericToken {
///     async fn authenticate(
///         &self,
///         _conn: ConnectionId,
///         credentials: Option<&str>,
///     ) -> Result<PlayerId, SessionError> {
///         let token = credentials.ok_or_else(|| {
///             SessionError::AuthFailed("missing token".into())
///         })?;
///         let id: u64 = token.parse().map_err(|_| {
///             SessionError::AuthFailed("token must be a number".into())
///         })?;
///         Ok(PlayerId(id))
///     }
/// }
/// ```
pub trait Authenticator: Send + Sync + 'static {
    /// Returns the player's identity, or
    /// [`SessionError::AuthFailed`] to refuse the connection.
    fn authenticate(
        &self,
        conn: ConnectionId,
        credentials: Option<&str>,
    ) -> impl Future<Output = Result<PlayerId, SessionError>> + Send;
}

/// Accepts everyone. The player id is the connection id.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousAuthenticator;

impl Authenticator for AnonymousAuthenticator {
    async fn authenticate(
        &self,
        conn: ConnectionId,
        _credentials: Option<&str>,
    ) -> Result<PlayerId, SessionError> {
        Ok(PlayerId(conn.into_inner()))
    }
}
