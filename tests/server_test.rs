use std::{net::SocketAddr, sync::Arc};

use mockito::Server;
use reqwest::{Client, StatusCode, redirect::Policy};
use serde_json::Value;
use sprofile::{
    config::Settings,
    flow::AppContext,
    management::{HandoffStore, MemoryHandoffStore, VERIFIER_KEY},
    server::{SharedProfile, router},
};
use tokio::{net::TcpListener, sync::Mutex};

const PROFILE_JSON: &str = r#"{
    "display_name": "Avatar Owner",
    "email": "owner@example.com",
    "external_urls": { "spotify": "https://open.spotify.com/user/owner" },
    "href": "https://api.spotify.com/v1/users/owner",
    "id": "owner",
    "images": [{ "url": "https://i.scdn.co/image/owner", "height": 300, "width": 300 }],
    "type": "user",
    "uri": "spotify:user:owner"
}"#;

struct Page {
    addr: SocketAddr,
    store: Arc<MemoryHandoffStore>,
    latest: SharedProfile,
    client: Client,
}

async fn start_page(spotify: &Server) -> Page {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let settings = Settings {
        redirect_uri: format!("http://{}/callback", addr),
        token_url: format!("{}/api/token", spotify.url()),
        api_url: format!("{}/v1", spotify.url()),
        server_addr: addr,
        ..Settings::default()
    };
    let store = Arc::new(MemoryHandoffStore::new());
    let latest: SharedProfile = Arc::new(Mutex::new(None));

    let store_dyn: Arc<dyn HandoffStore> = store.clone();
    let app = router(AppContext::new(settings, store_dyn), Arc::clone(&latest)).unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Page {
        addr,
        store,
        latest,
        client: Client::builder().redirect(Policy::none()).build().unwrap(),
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let spotify = Server::new_async().await;
    let page = start_page(&spotify).await;

    let body: Value = page
        .client
        .get(format!("http://{}/health", page.addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn root_without_code_redirects_to_authorize() {
    let spotify = Server::new_async().await;
    let page = start_page(&spotify).await;

    let res = page
        .client
        .get(format!("http://{}/", page.addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let location = res.headers()["location"].to_str().unwrap();
    assert!(location.starts_with("https://accounts.spotify.com/authorize?client_id="));
    assert!(page.store.get(VERIFIER_KEY).await.unwrap().is_some());
    // a redirect is not a finished sign-in
    assert!(page.latest.lock().await.is_none());
}

#[tokio::test]
async fn callback_with_code_renders_profile_page() {
    let mut spotify = Server::new_async().await;
    spotify
        .mock("POST", "/api/token")
        .with_status(200)
        .with_body(r#"{"access_token":"tok"}"#)
        .create_async()
        .await;
    spotify
        .mock("GET", "/v1/me")
        .match_header("authorization", "Bearer tok")
        .with_status(200)
        .with_body(PROFILE_JSON)
        .create_async()
        .await;

    let page = start_page(&spotify).await;
    page.store.put(VERIFIER_KEY, "abc123").await.unwrap();

    let res = page
        .client
        .get(format!("http://{}/callback?code=the-code", page.addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await.unwrap();
    assert!(html.contains(r#"<span id="displayName">Avatar Owner</span>"#));
    assert!(html.contains(r#"<img src="https://i.scdn.co/image/owner" width="200" height="200">"#));
    assert!(html.contains(r#"<span id="imgUrl">https://i.scdn.co/image/owner</span>"#));

    let latest = page.latest.lock().await;
    let signed_in = latest.as_ref().and_then(|outcome| outcome.as_ref().ok());
    assert_eq!(signed_in.map(|p| p.id.as_str()), Some("owner"));
}

#[tokio::test]
async fn callback_without_verifier_shows_error_page() {
    let spotify = Server::new_async().await;
    let page = start_page(&spotify).await;

    let res = page
        .client
        .get(format!("http://{}/callback?code=the-code", page.addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let html = res.text().await.unwrap();
    assert!(html.contains("no PKCE code verifier stored"));

    let latest = page.latest.lock().await;
    let failure = latest.as_ref().and_then(|outcome| outcome.as_ref().err());
    assert!(failure.unwrap().contains("no PKCE code verifier stored"));
}

#[tokio::test]
async fn callback_with_denied_authorization_shows_error_page() {
    let spotify = Server::new_async().await;
    let page = start_page(&spotify).await;
    page.store.put(VERIFIER_KEY, "abc123").await.unwrap();

    let res = page
        .client
        .get(format!("http://{}/callback?error=access_denied", page.addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.text().await.unwrap().contains("access_denied"));
    assert_eq!(page.store.get(VERIFIER_KEY).await.unwrap(), None);

    let latest = page.latest.lock().await;
    assert!(matches!(latest.as_ref(), Some(Err(message)) if message.contains("access_denied")));
}
