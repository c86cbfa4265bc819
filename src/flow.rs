//! One load of the profile page.
//!
//! A load without an authorization code starts a new sign-in and ends in a
//! redirect. A load with a code runs exchange, fetch and render in strict
//! order; the first failing stage aborts the rest.

use std::sync::Arc;

use reqwest::Client;
use url::Url;

use crate::{
    config::Settings,
    error::{Error, Result},
    info,
    management::{HandoffStore, VERIFIER_KEY},
    render::ProfileView,
    spotify,
    types::Profile,
};

/// Everything a page load needs.
#[derive(Clone)]
pub struct AppContext {
    pub settings: Arc<Settings>,
    pub client: Client,
    pub store: Arc<dyn HandoffStore>,
}

impl AppContext {
    pub fn new(settings: Settings, store: Arc<dyn HandoffStore>) -> Self {
        Self {
            settings: Arc::new(settings),
            client: Client::new(),
            store,
        }
    }
}

/// Query parameters the authorization server may send back.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// Outcome of a page load.
#[derive(Debug, Clone, PartialEq)]
pub enum PageLoad {
    /// No code yet: the browser must be sent to this authorization URL.
    Redirect(Url),
    /// Signed in: the fetched profile and its page regions.
    Profile(Box<Profile>, ProfileView),
}

/// Runs one page load for the given callback parameters.
pub async fn load_page(ctx: &AppContext, params: &CallbackParams) -> Result<PageLoad> {
    if let Some(error) = &params.error {
        ctx.store.remove(VERIFIER_KEY).await?;
        return Err(Error::Authorization {
            error: error.clone(),
        });
    }

    let Some(code) = params.code.as_deref().filter(|c| !c.is_empty()) else {
        let url = spotify::auth::begin_authorization(&ctx.settings, ctx.store.as_ref()).await?;
        return Ok(PageLoad::Redirect(url));
    };

    let token =
        spotify::auth::exchange_code(&ctx.client, &ctx.settings, ctx.store.as_ref(), code).await?;
    info!("Access token granted ({}).", token.summary());
    let profile =
        spotify::profile::fetch_profile(&ctx.client, &ctx.settings, &token.access_token).await?;
    let view = ProfileView::from(&profile);

    Ok(PageLoad::Profile(Box::new(profile), view))
}
