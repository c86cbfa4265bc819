//! Maps a [`Profile`] onto the regions of the profile page.
//!
//! The same [`ProfileView`] feeds the HTML page served by the local server
//! and the table printed by the `me` command.

use tabled::{Table, settings::Style};

use crate::{
    types::{Profile, ProfileTableRow},
    utils::html_escape,
};

/// Text shown in the image-URL region when the profile has no image.
pub const NO_IMAGE_TEXT: &str = "(no profile image)";

/// Edge length of the avatar image, in pixels.
pub const AVATAR_SIZE: u32 = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct Avatar {
    pub src: String,
    pub width: u32,
    pub height: u32,
}

/// Region values of the profile page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub display_name: String,
    pub avatar: Option<Avatar>,
    pub id: String,
    pub email: String,
    pub uri: String,
    pub uri_href: String,
    pub url: String,
    pub url_href: String,
    pub img_url: String,
}

impl From<&Profile> for ProfileView {
    fn from(profile: &Profile) -> Self {
        let first_image = profile.images.first();

        Self {
            display_name: profile.display_name.clone().unwrap_or_default(),
            avatar: first_image.map(|image| Avatar {
                src: image.url.clone(),
                width: AVATAR_SIZE,
                height: AVATAR_SIZE,
            }),
            id: profile.id.clone(),
            email: profile.email.clone().unwrap_or_default(),
            uri: profile.uri.clone(),
            uri_href: profile.external_urls.spotify.clone(),
            url: profile.href.clone(),
            url_href: profile.href.clone(),
            img_url: first_image
                .map(|image| image.url.clone())
                .unwrap_or_else(|| NO_IMAGE_TEXT.to_string()),
        }
    }
}

/// Renders the profile page.
///
/// Region ids: `displayName`, `avatar`, `id`, `email`, `uri`, `url`, `imgUrl`.
/// The `<img>` inside `avatar` is only present when the profile has an image.
pub fn render_profile_page(view: &ProfileView) -> String {
    let avatar = match &view.avatar {
        Some(a) => format!(
            r#"<img src="{src}" width="{w}" height="{h}">"#,
            src = html_escape(&a.src),
            w = a.width,
            h = a.height
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>My Spotify Profile</title>
<style>body {{ font-family: sans-serif; margin: 2rem; }} li {{ margin: .25rem 0; }}</style>
</head>
<body>
<h1>Display your Spotify profile data</h1>
<section id="profile">
<h2>Logged in as <span id="displayName">{display_name}</span></h2>
<span id="avatar">{avatar}</span>
<ul>
<li>User ID: <span id="id">{id}</span></li>
<li>Email: <span id="email">{email}</span></li>
<li>Spotify URI: <a id="uri" href="{uri_href}">{uri}</a></li>
<li>Link: <a id="url" href="{url_href}">{url}</a></li>
<li>Profile Image: <span id="imgUrl">{img_url}</span></li>
</ul>
</section>
</body>
</html>
"#,
        display_name = html_escape(&view.display_name),
        avatar = avatar,
        id = html_escape(&view.id),
        email = html_escape(&view.email),
        uri_href = html_escape(&view.uri_href),
        uri = html_escape(&view.uri),
        url_href = html_escape(&view.url_href),
        url = html_escape(&view.url),
        img_url = html_escape(&view.img_url),
    )
}

/// Renders a minimal page reporting a failed sign-in.
pub fn render_error_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Sign-in failed</title></head>
<body>
<h2>Sign-in failed</h2>
<p id="error">{}</p>
<p><a href="/">Try again</a></p>
</body>
</html>
"#,
        html_escape(message)
    )
}

/// Renders the profile regions as a terminal table.
pub fn profile_table(view: &ProfileView) -> String {
    let rows = vec![
        ProfileTableRow {
            field: "Display name".to_string(),
            value: view.display_name.clone(),
        },
        ProfileTableRow {
            field: "User ID".to_string(),
            value: view.id.clone(),
        },
        ProfileTableRow {
            field: "Email".to_string(),
            value: view.email.clone(),
        },
        ProfileTableRow {
            field: "Spotify URI".to_string(),
            value: view.uri.clone(),
        },
        ProfileTableRow {
            field: "Profile".to_string(),
            value: view.uri_href.clone(),
        },
        ProfileTableRow {
            field: "Link".to_string(),
            value: view.url.clone(),
        },
        ProfileTableRow {
            field: "Profile image".to_string(),
            value: view.img_url.clone(),
        },
    ];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExternalUrls, Image};

    fn profile(images: Vec<Image>) -> Profile {
        Profile {
            country: Some("SE".to_string()),
            display_name: Some("Ana <3".to_string()),
            email: Some("ana@example.com".to_string()),
            explicit_content: None,
            external_urls: ExternalUrls {
                spotify: "https://open.spotify.com/user/ana".to_string(),
            },
            followers: None,
            href: "https://api.spotify.com/v1/users/ana".to_string(),
            id: "ana".to_string(),
            images,
            product: None,
            kind: "user".to_string(),
            uri: "spotify:user:ana".to_string(),
        }
    }

    #[test]
    fn without_images_uses_fallback_text() {
        let view = ProfileView::from(&profile(vec![]));
        assert_eq!(view.img_url, NO_IMAGE_TEXT);
        assert_eq!(view.avatar, None);

        let page = render_profile_page(&view);
        assert!(page.contains(r#"<span id="imgUrl">(no profile image)</span>"#));
        assert!(!page.contains("<img"));
    }

    #[test]
    fn first_image_becomes_200px_avatar() {
        let view = ProfileView::from(&profile(vec![
            Image {
                url: "https://i.scdn.co/image/first".to_string(),
                height: Some(640),
                width: None,
            },
            Image {
                url: "https://i.scdn.co/image/second".to_string(),
                height: None,
                width: None,
            },
        ]));

        assert_eq!(view.img_url, "https://i.scdn.co/image/first");
        assert_eq!(
            view.avatar,
            Some(Avatar {
                src: "https://i.scdn.co/image/first".to_string(),
                width: 200,
                height: 200,
            })
        );

        let page = render_profile_page(&view);
        let img = r#"<img src="https://i.scdn.co/image/first" width="200" height="200">"#;
        assert!(page.contains(img));
        assert!(!page.contains("second"));
    }

    #[test]
    fn regions_carry_link_targets() {
        let page = render_profile_page(&ProfileView::from(&profile(vec![])));
        let uri = r#"<a id="uri" href="https://open.spotify.com/user/ana">spotify:user:ana</a>"#;
        assert!(page.contains(uri));

        let href = "https://api.spotify.com/v1/users/ana";
        assert!(page.contains(&format!(r#"<a id="url" href="{href}">{href}</a>"#)));
        assert!(page.contains(r#"<span id="id">ana</span>"#));
        assert!(page.contains(r#"<span id="email">ana@example.com</span>"#));
    }

    #[test]
    fn values_are_escaped() {
        let page = render_profile_page(&ProfileView::from(&profile(vec![])));
        assert!(page.contains(r#"<span id="displayName">Ana &lt;3</span>"#));
    }

    #[test]
    fn table_lists_regions() {
        let table = profile_table(&ProfileView::from(&profile(vec![])));
        assert!(table.contains("spotify:user:ana"));
        assert!(table.contains(NO_IMAGE_TEXT));
    }

    #[test]
    fn error_page_escapes_message() {
        let page = render_error_page("<bad>");
        assert!(page.contains("&lt;bad&gt;"));
    }
}
