//! CMS domain types, as served by the content API.
//!
//! Field names follow the wire format (camelCase). Optional fields are
//! omitted on serialization rather than written as `null`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Asset `use` tag marking the brand's logomark.
pub const USE_LOGOMARK: &str = "logomark";

/// Asset `use` tag marking the brand's logotype.
pub const USE_LOGOTYPE: &str = "logotype";

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

/// A media asset. `use` is a free-form role tag (`"thumb"`, `"screen"`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub use_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Inline payload (e.g. SVG text) when the asset is not hosted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Asset {
    /// An asset with a tag and hosted URL.
    pub fn tagged(use_tag: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            use_tag: Some(use_tag.into()),
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Whether this asset carries the given `use` tag.
    pub fn is_for(&self, use_tag: &str) -> bool {
        self.use_tag.as_deref() == Some(use_tag)
    }
}

// ---------------------------------------------------------------------------
// Brand / Site
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub hex: String,
    #[serde(rename = "use", default)]
    pub use_tag: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sizes: String,
    #[serde(default)]
    pub source: String,
    /// CSS `font-family` stack.
    #[serde(default)]
    pub stack: String,
    #[serde(rename = "use", default)]
    pub use_tag: String,
}

/// Site-wide content settings (home page, copyright line).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// A post grouping published by a brand (e.g. `apps`, `blog`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostType {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

/// Visual and content identity returned by the site endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub colors: Vec<Color>,
    #[serde(default)]
    pub fonts: Vec<Font>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_types: Option<Vec<PostType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    /// Deployment scope within the brand; sticky for the client session once seen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,

    /// Derived from the site's assets, never trusted from the server.
    #[serde(default)]
    pub has_logomark: bool,
    /// Derived from the site's assets, never trusted from the server.
    #[serde(default)]
    pub has_logotype: bool,
}

impl Brand {
    /// The tenant, if present and non-empty.
    pub fn tenant(&self) -> Option<&str> {
        self.tenant.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub brand: Brand,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_variables: Option<String>,
}

impl Site {
    /// Placeholder returned when the site endpoint answers 2xx with no body.
    pub fn not_found() -> Self {
        Self {
            brand: Brand {
                name: "Not Found".into(),
                slug: "notfound".into(),
                ..Brand::default()
            },
            assets: Vec::new(),
            css_variables: None,
        }
    }
}

/// Recompute `brand.has_logomark` / `brand.has_logotype` from `site.assets`.
pub fn brand_has_assets(site: &mut Site) {
    site.brand.has_logomark = site.assets.iter().any(|a| a.is_for(USE_LOGOMARK));
    site.brand.has_logotype = site.assets.iter().any(|a| a.is_for(USE_LOGOTYPE));
}

// ---------------------------------------------------------------------------
// Post
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Store and marketplace links for a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios_app_store: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_app_store: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_play: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amazon_app_store: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_crafter: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub l: f64,
    pub w: f64,
    pub h: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostSale {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
}

/// oEmbed response (<https://oembed.com/>).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OEmbed {
    /// The original URL that was embedded.
    #[serde(default)]
    pub embed: String,

    /// One of `"rich"`, `"video"`, `"link"`, `"photo"`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_age: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_height: Option<f64>,

    /// `<img>` source for `"photo"` embeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Embed markup for `"video"` and `"rich"` embeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

/// Rendering discriminator derived from `Post::post_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind {
    /// Anything that is not a known special kind, including no type at all.
    Article,
    App,
}

impl PostKind {
    /// Map a raw `type` value; unknown values fall back to `Article`.
    pub fn from_type(post_type: Option<&str>) -> Self {
        match post_type {
            Some("app") => Self::App,
            _ => Self::Article,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    /// Creation timestamp, passed through in whatever form the CMS stores it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale: Option<PostSale>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Asset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Asset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Asset>>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub post_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<PostLinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<OEmbed>>,
}

impl Post {
    pub fn kind(&self) -> PostKind {
        PostKind::from_type(self.post_type.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

/// User feedback submitted to the CMS. Outbound only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub email: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub hostname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_title: Option<String>,
    pub user_agent: String,
}
