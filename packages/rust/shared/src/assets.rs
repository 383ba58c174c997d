//! Picking representative asset URLs by `use` tag.

use crate::types::{Asset, Post};

/// Tag used for a post's thumbnail among its images.
pub const USE_THUMB: &str = "thumb";

/// Tag used for app screenshots among a post's images.
pub const USE_SCREEN: &str = "screen";

/// URL of the first asset tagged `use_tag`, falling back to the first asset.
///
/// Returns `None` only for an empty list (or when the chosen asset has no URL).
pub fn find_asset_url_for_use<'a>(use_tag: &str, assets: &'a [Asset]) -> Option<&'a str> {
    let first = assets.first()?;
    assets
        .iter()
        .find(|asset| asset.is_for(use_tag))
        .unwrap_or(first)
        .url
        .as_deref()
}

/// Thumbnail URL for a post: `image` if set, else the `"thumb"` entry of `images`.
///
/// There is no fallback from an absent `image` *and* absent `images` to any
/// other field (such as `thumbnail`).
pub fn thumb_url_for_post(post: &Post) -> Option<&str> {
    if let Some(image) = &post.image {
        return image.url.as_deref();
    }
    post.images
        .as_deref()
        .and_then(|images| find_asset_url_for_use(USE_THUMB, images))
}
