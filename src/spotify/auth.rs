use reqwest::Url;

use super::SpotifyClient;
use crate::types::Token;

impl SpotifyClient {
    /// Builds the URL the browser is sent to for the authorization step.
    ///
    /// The request uses the PKCE `S256` method, so `code_challenge` must be
    /// derived from the verifier later passed to [`SpotifyClient::exchange_code_pkce`].
    /// `state` is returned unchanged on the callback and must be checked there.
    pub fn authorize_url(&self, code_challenge: &str, state: &str) -> Result<String, String> {
        let url = Url::parse_with_params(
            &self.auth_url,
            &[
                ("client_id", self.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("code_challenge", code_challenge),
                ("code_challenge_method", "S256"),
                ("scope", self.scope.as_str()),
                ("state", state),
            ],
        )
        .map_err(|e| format!("invalid authorization URL {}: {}", self.auth_url, e))?;

        Ok(url.into())
    }

    /// Exchanges an authorization code for an access token using PKCE.
    ///
    /// When a client secret is configured the request is also authenticated
    /// with HTTP Basic client credentials, as Spotify expects for confidential
    /// clients.
    ///
    /// # Errors
    ///
    /// Returns a message containing the upstream status and body when Spotify
    /// rejects the code (expired, reused, verifier mismatch), or the transport
    /// error when the accounts service cannot be reached.
    pub async fn exchange_code_pkce(&self, code: &str, verifier: &str) -> Result<Token, String> {
        let mut request = self.http.post(&self.token_url).form(&[
            ("grant_type", "authorization_code"),
            ("client_id", self.client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", self.redirect_uri.as_str()),
        ]);
        if let Some(secret) = &self.client_secret {
            request = request.basic_auth(&self.client_id, Some(secret));
        }

        let response = request.send().await.map_err(|e| self.describe(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.describe(&e))?;
        if !status.is_success() {
            return Err(format!("{}: {}", status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|e| format!("invalid token response: {}", e))
    }
}
