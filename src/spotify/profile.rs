use reqwest::Client;

use crate::{
    config::Settings,
    error::{Error, Result},
    types::Profile,
};

/// Fetches the profile of the user `access_token` belongs to.
///
/// Any non-success status is returned as [`Error::Http`]; a body that does
/// not match [`Profile`] as [`Error::MalformedPayload`]. No retries.
pub async fn fetch_profile(
    client: &Client,
    settings: &Settings,
    access_token: &str,
) -> Result<Profile> {
    let api_url = format!("{uri}/me", uri = settings.api_url);

    let body = client
        .get(&api_url)
        .bearer_auth(access_token)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    serde_json::from_str::<Profile>(&body).map_err(|e| Error::malformed("profile", e))
}
