use std::{future::Future, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::{net::TcpListener, sync::Mutex};
use url::Url;

use crate::{api, error::Result, flow::AppContext, types::Profile};

/// How the last completed page load ended: the rendered profile, or the
/// message of the error page.
pub type SignInOutcome = std::result::Result<Profile, String>;

/// Outcome of the most recent completed page load, for callers waiting on a
/// sign-in. Redirects leave it untouched.
pub type SharedProfile = Arc<Mutex<Option<SignInOutcome>>>;

/// Builds the page router.
///
/// The page answers at `/` and at the path of the configured redirect URI.
pub fn router(ctx: AppContext, latest: SharedProfile) -> Result<Router> {
    let callback_path = Url::parse(&ctx.settings.redirect_uri)?.path().to_string();

    let mut app = Router::new()
        .route("/health", get(api::health))
        .route("/", get(api::callback));
    if callback_path != "/" && callback_path != "/health" {
        app = app.route(&callback_path, get(api::callback));
    }

    Ok(app.layer(Extension(ctx)).layer(Extension(latest)))
}

/// Serves the page on the configured address until `shutdown` resolves.
pub async fn start_api_server<F>(ctx: AppContext, latest: SharedProfile, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = ctx.settings.server_addr;
    let app = router(ctx, latest)?;

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
