use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Successful response of the token endpoint.
///
/// Only `access_token` is sent on; `expires_in` and `scope` end up in the
/// console through [`TokenResponse::summary`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl TokenResponse {
    /// One-line description of the grant, e.g. `expires in 3600s, scope: user-read-email`.
    pub fn summary(&self) -> String {
        let expiry = match self.expires_in {
            Some(secs) => format!("expires in {}s", secs),
            None => "no expiry given".to_string(),
        };
        match self.scope.as_deref().filter(|s| !s.is_empty()) {
            Some(scope) => format!("{}, scope: {}", expiry, scope),
            None => expiry,
        }
    }
}

/// Error body returned by the accounts service on a rejected exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// The current user's profile as returned by `GET /me`.
///
/// `country`, `email`, `explicit_content` and `product` are only present when
/// the matching scopes were granted, so they are optional here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub country: Option<String>,
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub explicit_content: Option<ExplicitContent>,
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub followers: Option<Followers>,
    pub href: String,
    pub id: String,
    pub images: Vec<Image>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplicitContent {
    pub filter_enabled: bool,
    pub filter_locked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Followers {
    pub href: Option<String>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Tabled)]
pub struct ProfileTableRow {
    pub field: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PROFILE: &str = r#"{
        "country": "SE",
        "display_name": "Test User",
        "email": "test@example.com",
        "explicit_content": { "filter_enabled": false, "filter_locked": false },
        "external_urls": { "spotify": "https://open.spotify.com/user/testuser" },
        "followers": { "href": null, "total": 12 },
        "href": "https://api.spotify.com/v1/users/testuser",
        "id": "testuser",
        "images": [
            { "url": "https://i.scdn.co/image/ab67", "height": 300, "width": 300 },
            { "url": "https://i.scdn.co/image/small", "height": null, "width": null }
        ],
        "product": "premium",
        "type": "user",
        "uri": "spotify:user:testuser"
    }"#;

    #[test]
    fn deserializes_full_profile() {
        let profile: Profile = serde_json::from_str(FULL_PROFILE).unwrap();
        assert_eq!(profile.id, "testuser");
        assert_eq!(profile.kind, "user");
        assert_eq!(profile.followers.as_ref().map(|f| f.total), Some(12));
        assert_eq!(profile.images.len(), 2);
        assert_eq!(profile.images[1].height, None);
        assert_eq!(
            profile.explicit_content,
            Some(ExplicitContent {
                filter_enabled: false,
                filter_locked: false
            })
        );
    }

    #[test]
    fn scope_dependent_fields_are_optional() {
        let json = r#"{
            "display_name": null,
            "external_urls": { "spotify": "https://open.spotify.com/user/x" },
            "href": "https://api.spotify.com/v1/users/x",
            "id": "x",
            "images": [],
            "type": "user",
            "uri": "spotify:user:x"
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.email, None);
        assert_eq!(profile.display_name, None);
        assert!(profile.images.is_empty());
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let json = r#"{ "display_name": "No Id", "images": [] }"#;
        assert!(serde_json::from_str::<Profile>(json).is_err());
    }

    #[test]
    fn token_response_needs_only_access_token() {
        let token: TokenResponse = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.expires_in, None);
        assert_eq!(token.summary(), "no expiry given");
    }

    #[test]
    fn token_summary_names_expiry_and_scope() {
        let token: TokenResponse = serde_json::from_str(
            r#"{"access_token":"abc","expires_in":3600,"scope":"user-read-email"}"#,
        )
        .unwrap();
        assert_eq!(token.summary(), "expires in 3600s, scope: user-read-email");
    }
}
