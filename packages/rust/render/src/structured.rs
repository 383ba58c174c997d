//! schema.org structured data (JSON-LD) for posts.
//!
//! Posts of kind [`PostKind::App`] become a
//! [MobileApplication](https://schema.org/MobileApplication); everything else
//! becomes an [Article](https://schema.org/Article). Fields without a source
//! value are left out of the JSON entirely.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use awesauce_shared::{
    Author, Post, PostKind, PostLinks, USE_SCREEN, find_asset_url_for_use, thumb_url_for_post,
};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// <https://schema.org/Person>
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonRecord<'a> {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
}

impl<'a> PersonRecord<'a> {
    pub fn from_author(author: &'a Author) -> Self {
        Self {
            kind: "Person",
            name: &author.name,
            email: author.email.as_deref().filter(|e| !e.is_empty()),
        }
    }
}

/// <https://schema.org/Article>
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord<'a> {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<PersonRecord<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_published: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<&'a str>,
}

impl<'a> ArticleRecord<'a> {
    pub fn from_post(post: &'a Post) -> Self {
        Self {
            context: "http://schema.org",
            kind: "Article",
            headline: post.title.as_deref(),
            author: post.author.as_ref().map(PersonRecord::from_author),
            description: post.excerpt.as_deref(),
            date_published: post.created.as_ref(),
            date_modified: post.edited.as_ref(),
            image: thumb_url_for_post(post).filter(|u| !u.is_empty()),
        }
    }
}

/// <https://developers.google.com/search/docs/appearance/structured-data/software-app>
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRecord<'a> {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub types: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub operating_system: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_category: Option<Vec<Cow<'a, str>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<&'a str>,
    pub download_url: Vec<&'a str>,
}

impl<'a> AppRecord<'a> {
    pub fn from_post(post: &'a Post) -> Self {
        let image = thumb_url_for_post(post).filter(|u| !u.is_empty());
        let screenshot = post
            .images
            .as_deref()
            .and_then(|images| find_asset_url_for_use(USE_SCREEN, images))
            .filter(|u| !u.is_empty());

        let mut operating_system = Vec::new();
        let mut download_url = Vec::new();
        if let Some(links) = &post.links {
            for (os, link) in app_stores(links) {
                if let Some(link) = link {
                    operating_system.push(os);
                    download_url.push(link);
                }
            }
        }

        let categories = post.categories.as_deref();
        Self {
            context: "https://schema.org",
            types: app_types(categories),
            name: post.title.as_deref(),
            description: post.excerpt.as_deref(),
            operating_system,
            application_category: categories
                .map(|cs| cs.iter().map(|c| application_category(c)).collect()),
            image,
            thumbnail_url: image,
            screenshot,
            download_url,
        }
    }
}

// ---------------------------------------------------------------------------
// StructuredData
// ---------------------------------------------------------------------------

/// The JSON-LD record chosen for a post.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StructuredData<'a> {
    Article(ArticleRecord<'a>),
    App(AppRecord<'a>),
}

impl<'a> StructuredData<'a> {
    pub fn for_post(post: &'a Post) -> Self {
        let kind = post.kind();
        debug!(?kind, slug = %post.slug, "building structured data");
        match kind {
            PostKind::App => Self::App(AppRecord::from_post(post)),
            PostKind::Article => Self::Article(ArticleRecord::from_post(post)),
        }
    }
}

/// Renders the `<script type="application/ld+json">` tag.
impl fmt::Display for StructuredData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, r#"<script type="application/ld+json">{json}</script>"#)
    }
}

/// Script tag containing the post's JSON-LD.
pub fn structured_data_for_post(post: &Post) -> String {
    StructuredData::for_post(post).to_string()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Store links in fixed order, paired with the operating system each implies.
fn app_stores(links: &PostLinks) -> [(&'static str, Option<&str>); 4] {
    [
        ("iOS", links.ios_app_store.as_deref()),
        ("OS X", links.mac_app_store.as_deref()),
        ("ANDROID", links.google_play.as_deref()),
        ("AMAZON", links.amazon_app_store.as_deref()),
    ]
}

fn app_types(categories: Option<&[String]>) -> Vec<&'static str> {
    let mut types = vec!["MobileApplication", "SoftwareApplication"];
    let is_game = categories
        .unwrap_or_default()
        .iter()
        .any(|c| c.eq_ignore_ascii_case("game"));
    if is_game {
        types.push("VideoGame");
    }
    types
}

/// schema.org application category for a CMS category; unknown ones pass through.
fn application_category(category: &str) -> Cow<'_, str> {
    let mapped = match category.to_lowercase().as_str() {
        "game" => "GameApplication",
        "trivia" => "Trivia",
        "utilities" => "UtilitiesApplication",
        "photo" => "PhotoApplication",
        "toy" => "Toy",
        "health" => "HealthApplication",
        "entertainment" => "EntertainmentApplication",
        "reference" => "ReferenceApplication",
        "sports" => "SportsApplication",
        "shopping" => "ShoppingApplication",
        _ => return Cow::Borrowed(category),
    };
    Cow::Borrowed(mapped)
}
