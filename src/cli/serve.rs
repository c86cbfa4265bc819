use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{error, info, server::start_api_server, success};

use super::{build_context, open_in_browser};

/// Serves the profile page until Ctrl-C.
///
/// Every visit to the page without an authorization code starts a new
/// sign-in, so the page can be reloaded as often as needed.
pub async fn serve(open_browser: bool) {
    let ctx = build_context();
    let app_url = ctx.settings.app_url();

    info!("Serving profile page on {}", app_url);
    info!("Press Ctrl-C to stop.");
    if open_browser {
        open_in_browser(&app_url);
    }

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    if let Err(e) = start_api_server(ctx, Arc::new(Mutex::new(None)), shutdown).await {
        error!("Server failed: {}", e);
    }

    success!("Server stopped.");
}
