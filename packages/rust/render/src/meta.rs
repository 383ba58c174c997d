//! HTML `<meta>` tags for page headers.
//!
//! Values are interpolated as-is: no HTML escaping is applied, so callers
//! must only pass trusted content.

use awesauce_shared::{Post, thumb_url_for_post};

/// Rendered in place of a missing description in the plain `description` tag.
const UNDEFINED: &str = "undefined";

/// Build common meta tags.
///
/// `application-name`, `description`, `og:url`, `og:site_name` and
/// `og:title` are always present. `og:description` and `og:image` are only
/// emitted when a value is given. A missing description still produces the
/// plain `description` tag, with the literal content `undefined`.
pub fn meta(
    site: &str,
    url: &str,
    title: &str,
    description: Option<&str>,
    image: Option<&str>,
) -> String {
    let mut tags = format!(
        r#"
  <meta name="application-name" content="{site}" />
  <meta name="description" content="{}" />
  <meta property="og:url" content="{url}" />
  <meta property="og:site_name" content="{site}" />
  <meta property="og:title" content="{title}" />
  "#,
        description.unwrap_or(UNDEFINED),
    );

    if let Some(description) = description {
        tags.push_str(&format!(
            "<meta property=\"og:description\" content=\"{description}\" />\n  "
        ));
    }
    if let Some(image) = image {
        tags.push_str(&format!(
            "<meta property=\"og:image\" content=\"{image}\" />\n  "
        ));
    }
    tags
}

/// Meta tags for a post: its title, excerpt, and thumbnail.
///
/// A post without an excerpt gets no `og:description`. A missing title is
/// rendered as `undefined`, like a missing description.
pub fn meta_from_post(post: &Post, site: &str, url: &str) -> String {
    meta(
        site,
        url,
        post.title.as_deref().unwrap_or(UNDEFINED),
        post.excerpt.as_deref(),
        thumb_url_for_post(post),
    )
}
