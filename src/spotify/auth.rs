use chrono::Utc;
use tracing::debug;

use super::{SpotifyClient, SpotifyError};
use crate::types::Token;

impl SpotifyClient {
    /// Exchanges the application's client credentials for an access token.
    ///
    /// Uses the OAuth 2.0 client-credentials grant: the id and secret are
    /// sent as HTTP basic auth and no user interaction is involved. The
    /// returned token is stamped with the time it was obtained so that
    /// [`Token::is_expired`] can be evaluated later.
    ///
    /// # Errors
    ///
    /// - [`SpotifyError::Http`] on network failures
    /// - [`SpotifyError::HttpStatus`] when the token endpoint rejects the
    ///   credentials
    /// - [`SpotifyError::Deserialization`] when the response is not a token
    pub async fn request_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Token, SpotifyError> {
        debug!(target: "spotify", url = %self.token_url, "requesting client-credentials token");

        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SpotifyError::HttpStatus { status, body });
        }

        let mut token: Token = serde_json::from_str(&body)?;
        token.obtained_at = Utc::now().timestamp() as u64;
        Ok(token)
    }
}
