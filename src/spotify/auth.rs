use reqwest::Client;
use url::Url;

use crate::{
    config::Settings,
    error::{Error, Result},
    management::{HandoffStore, VERIFIER_KEY},
    types::{TokenErrorResponse, TokenResponse},
    utils,
};

/// Builds the authorization request URL for `code_challenge`.
///
/// The query carries exactly `client_id`, `response_type=code`,
/// `redirect_uri`, `scope`, `code_challenge_method=S256` and
/// `code_challenge`, in that order.
pub fn authorize_url(settings: &Settings, code_challenge: &str) -> Result<Url> {
    let mut url = Url::parse(&settings.auth_url)?;
    url.query_pairs_mut()
        .append_pair("client_id", &settings.client_id)
        .append_pair("response_type", "code")
        .append_pair("redirect_uri", &settings.redirect_uri)
        .append_pair("scope", &settings.scope)
        .append_pair("code_challenge_method", "S256")
        .append_pair("code_challenge", code_challenge);
    Ok(url)
}

/// Starts a new authorization attempt.
///
/// Generates a fresh verifier, persists it under [`VERIFIER_KEY`] (replacing
/// any verifier left by an earlier attempt) and returns the URL the browser
/// has to be sent to. The verifier is written before the URL is returned, so
/// it always exists by the time the callback can arrive.
pub async fn begin_authorization(settings: &Settings, store: &dyn HandoffStore) -> Result<Url> {
    let code_verifier = utils::generate_code_verifier(utils::VERIFIER_LENGTH);
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    store.put(VERIFIER_KEY, &code_verifier).await?;

    authorize_url(settings, &code_challenge)
}

/// Exchanges an authorization code for an access token.
///
/// The stored verifier is consumed: it is removed from the store before the
/// request is sent, whatever the outcome, since the code it belongs to is
/// single-use. Without a stored verifier no request is made.
pub async fn exchange_code(
    client: &Client,
    settings: &Settings,
    store: &dyn HandoffStore,
    code: &str,
) -> Result<TokenResponse> {
    let Some(code_verifier) = store.take(VERIFIER_KEY).await? else {
        return Err(Error::MissingVerifier);
    };

    let res = client
        .post(&settings.token_url)
        .form(&[
            ("client_id", settings.client_id.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("code_verifier", code_verifier.as_str()),
        ])
        .send()
        .await?;

    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        let (error, description) = match serde_json::from_str::<TokenErrorResponse>(&body) {
            Ok(e) => (e.error, e.error_description),
            Err(_) => (body, None),
        };
        return Err(Error::TokenEndpoint {
            status,
            error,
            description,
        });
    }

    serde_json::from_str::<TokenResponse>(&body).map_err(|e| Error::malformed("token", e))
}
