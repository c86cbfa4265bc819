use axum::{
    Extension,
    extract::Query,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{
    flow::{self, AppContext, CallbackParams, PageLoad},
    info,
    render::{render_error_page, render_profile_page},
    server::SharedProfile,
    success, warning,
};

/// Serves the profile page.
///
/// Without a `code` parameter the browser is redirected to the authorization
/// server. With one, the code is exchanged, the profile fetched and rendered.
/// A failure aborts the load and is shown as an error page.
pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(ctx): Extension<AppContext>,
    Extension(latest): Extension<SharedProfile>,
) -> Response {
    match flow::load_page(&ctx, &params).await {
        Ok(PageLoad::Redirect(url)) => {
            info!("Redirecting browser to Spotify for authorization.");
            Redirect::to(url.as_str()).into_response()
        }
        Ok(PageLoad::Profile(profile, view)) => {
            success!("Signed in as {}.", profile.id);
            let page = render_profile_page(&view);
            *latest.lock().await = Some(Ok(*profile));
            Html(page).into_response()
        }
        Err(e) => {
            warning!("Sign-in failed: {}", e);
            let message = e.to_string();
            let page = render_error_page(&message);
            *latest.lock().await = Some(Err(message));
            (e.status_code(), Html(page)).into_response()
        }
    }
}
