use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::{Mutex, oneshot};

use crate::{
    error, info,
    render::{ProfileView, profile_table},
    server::{SharedProfile, SignInOutcome, start_api_server},
    success,
};

use super::{build_context, open_in_browser};

/// Runs one sign-in through the local page and prints the resulting profile.
///
/// The page is served in the background; the command returns once the page
/// has rendered a profile or an error page, or after `timeout_secs`.
pub async fn me(timeout_secs: u64, open_browser: bool) {
    let ctx = build_context();
    let app_url = ctx.settings.app_url();
    let max_wait = Duration::from_secs(timeout_secs);
    let latest: SharedProfile = Arc::new(Mutex::new(None));

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server_latest = Arc::clone(&latest);
    let mut server = tokio::spawn(async move {
        start_api_server(ctx, server_latest, async {
            let _ = stop_rx.await;
        })
        .await
    });

    if open_browser {
        open_in_browser(&app_url);
    } else {
        info!("Open {} in your browser to sign in.", app_url);
    }

    // the server only stops on its own when it fails
    let outcome = tokio::select! {
        outcome = wait_for_profile(Arc::clone(&latest), max_wait) => outcome,
        res = &mut server => match res {
            Ok(Ok(())) => error!("Server stopped unexpectedly."),
            Ok(Err(e)) => error!("Server failed: {}", e),
            Err(e) => error!("Server task failed: {}", e),
        },
    };

    let _ = stop_tx.send(());
    if let Ok(Err(e)) = server.await {
        error!("Server failed: {}", e);
    }

    match outcome {
        Some(Ok(p)) => {
            success!("Signed in as {}.", p.id);
            println!("{}", profile_table(&ProfileView::from(&p)));
        }
        Some(Err(message)) => error!("Sign-in failed: {}", message),
        None => error!("Timed out after {}s waiting for sign-in.", timeout_secs),
    }
}

/// Polls `latest` until a page load has completed or `max_wait` has passed.
async fn wait_for_profile(latest: SharedProfile, max_wait: Duration) -> Option<SignInOutcome> {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Waiting for sign-in in the browser...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let start = Instant::now();
    while start.elapsed() < max_wait {
        if let Some(outcome) = latest.lock().await.take() {
            pb.finish_and_clear();
            return Some(outcome);
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    pb.finish_and_clear();
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Profile;

    fn profile() -> Profile {
        serde_json::from_str(
            r#"{
                "external_urls": { "spotify": "https://open.spotify.com/user/x" },
                "href": "https://api.spotify.com/v1/users/x",
                "id": "x",
                "images": [],
                "type": "user",
                "uri": "spotify:user:x"
            }"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn returns_a_stored_failure_at_once() {
        let latest: SharedProfile = Arc::new(Mutex::new(Some(Err("denied".to_string()))));

        let started = Instant::now();
        let outcome = wait_for_profile(Arc::clone(&latest), Duration::from_secs(30)).await;

        assert_eq!(outcome, Some(Err("denied".to_string())));
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(latest.lock().await.is_none());
    }

    #[tokio::test]
    async fn picks_up_a_profile_stored_later() {
        let latest: SharedProfile = Arc::new(Mutex::new(None));
        let writer = Arc::clone(&latest);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            *writer.lock().await = Some(Ok(profile()));
        });

        let outcome = wait_for_profile(latest, Duration::from_secs(30)).await;

        assert_eq!(outcome.map(|o| o.map(|p| p.id)), Some(Ok("x".to_string())));
    }

    #[tokio::test]
    async fn gives_up_after_max_wait() {
        let latest: SharedProfile = Arc::new(Mutex::new(None));
        let outcome = wait_for_profile(latest, Duration::from_millis(50)).await;
        assert_eq!(outcome, None);
    }
}
