//! Per-endpoint query parameters and their encoding.
//!
//! Each endpoint has its own parameter struct with a fixed key order. Values
//! that the CMS treats as unset (`None`, empty strings, zero counts) are
//! dropped; everything else is form-urlencoded.

use url::form_urlencoded;

use crate::store::ClientConfig;

/// Shared secret the feedback endpoint expects.
pub const FEEDBACK_SECRET: &str = "afterthought";

/// Implemented by every endpoint's parameter struct.
pub trait QueryParams {
    /// Key/value pairs in wire order. `None` values are skipped.
    fn pairs(&self) -> Vec<(&'static str, Option<&str>)>;
}

/// Encode params as `k=v&k=v`, escaping values.
pub fn encode(params: &impl QueryParams) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params.pairs() {
        if let Some(value) = value {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}

/// Build `{api}/{path}?{query}`.
pub fn endpoint(api: &str, path: &str, params: &impl QueryParams) -> String {
    let api = api.trim_end_matches('/');
    let query = encode(params);
    if query.is_empty() {
        format!("{api}/{path}")
    } else {
        format!("{api}/{path}?{query}")
    }
}

fn present(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(String::from)
}

fn positive(value: Option<u32>) -> Option<String> {
    value.filter(|v| *v > 0).map(|v| v.to_string())
}

// ---------------------------------------------------------------------------
// /site
// ---------------------------------------------------------------------------

/// Site selector. Both variants carry the configured *host* value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteParams {
    /// Chosen when a brand is configured: `?brand={host}`.
    Brand(Option<String>),
    /// Chosen otherwise: `?host={host}`.
    Host(Option<String>),
}

impl SiteParams {
    pub fn for_config(config: &ClientConfig) -> Self {
        let host = present(config.host.as_deref());
        if config.brand.is_some() {
            Self::Brand(host)
        } else {
            Self::Host(host)
        }
    }
}

impl QueryParams for SiteParams {
    fn pairs(&self) -> Vec<(&'static str, Option<&str>)> {
        match self {
            Self::Brand(value) => vec![("brand", value.as_deref())],
            Self::Host(value) => vec![("host", value.as_deref())],
        }
    }
}

// ---------------------------------------------------------------------------
// /posts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostsParams {
    pub host: Option<String>,
    pub brand: Option<String>,
    pub tenant: Option<String>,
    pub post_type: Option<String>,
    pub category: Option<String>,
    pub limit: Option<String>,
    pub skip: Option<String>,
}

impl PostsParams {
    pub fn new(
        config: &ClientConfig,
        post_type: Option<&str>,
        category: Option<&str>,
        limit: Option<u32>,
        skip: Option<u32>,
    ) -> Self {
        Self {
            host: present(config.host.as_deref()),
            brand: present(config.brand.as_deref()),
            tenant: present(config.tenant.as_deref()),
            post_type: present(post_type),
            category: present(category),
            limit: positive(limit),
            skip: positive(skip),
        }
    }
}

impl QueryParams for PostsParams {
    fn pairs(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("host", self.host.as_deref()),
            ("brand", self.brand.as_deref()),
            ("tenant", self.tenant.as_deref()),
            ("type", self.post_type.as_deref()),
            ("category", self.category.as_deref()),
            ("limit", self.limit.as_deref()),
            ("skip", self.skip.as_deref()),
        ]
    }
}

// ---------------------------------------------------------------------------
// /post
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostParams {
    /// Always sent, even when empty.
    pub slug: String,
    pub post_type: Option<String>,
    pub host: Option<String>,
    pub brand: Option<String>,
    pub tenant: Option<String>,
}

impl PostParams {
    pub fn new(config: &ClientConfig, slug: &str, post_type: Option<&str>) -> Self {
        Self {
            slug: slug.to_string(),
            post_type: present(post_type),
            host: present(config.host.as_deref()),
            brand: present(config.brand.as_deref()),
            tenant: present(config.tenant.as_deref()),
        }
    }
}

impl QueryParams for PostParams {
    fn pairs(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("slug", Some(self.slug.as_str())),
            ("type", self.post_type.as_deref()),
            ("host", self.host.as_deref()),
            ("brand", self.brand.as_deref()),
            ("tenant", self.tenant.as_deref()),
        ]
    }
}

// ---------------------------------------------------------------------------
// /feedback
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackParams {
    pub tenant: Option<String>,
}

impl FeedbackParams {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            tenant: present(config.tenant.as_deref()),
        }
    }
}

impl QueryParams for FeedbackParams {
    fn pairs(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("secret", Some(FEEDBACK_SECRET)),
            ("tenant", self.tenant.as_deref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::default()
    }

    #[test]
    fn site_selector_uses_host_value_for_both_keys() {
        let mut config = config();
        config.host = Some("example.org".into());
        assert_eq!(encode(&SiteParams::for_config(&config)), "host=example.org");

        config.brand = Some("apellean".into());
        assert_eq!(encode(&SiteParams::for_config(&config)), "brand=example.org");
    }

    #[test]
    fn posts_params_keep_wire_order_and_skip_unset() {
        let mut config = config();
        config.host = Some("example.org".into());
        config.tenant = Some("acme".into());

        let params = PostsParams::new(&config, Some("apps"), None, Some(20), None);
        assert_eq!(encode(&params), "host=example.org&tenant=acme&type=apps&limit=20");
    }

    #[test]
    fn falsy_values_are_dropped() {
        let mut config = config();
        config.host = Some(String::new());
        config.brand = Some(String::new());

        let params = PostsParams::new(&config, Some(""), Some(""), Some(0), Some(0));
        assert_eq!(encode(&params), "");
    }

    #[test]
    fn values_are_escaped() {
        let params = PostsParams::new(&config(), None, Some("board games & toys"), None, Some(40));
        let query = encode(&params);
        assert!(query.contains("category=board+games+%26+toys"), "{query}");
        assert!(query.ends_with("skip=40"));
    }

    #[test]
    fn post_params_always_send_slug_first() {
        let mut config = config();
        config.host = None;
        let params = PostParams::new(&config, "word-hunt", Some("app"));
        assert_eq!(encode(&params), "slug=word-hunt&type=app");
    }

    #[test]
    fn feedback_params_carry_secret() {
        let mut config = config();
        assert_eq!(encode(&FeedbackParams::new(&config)), "secret=afterthought");

        config.tenant = Some("acme".into());
        assert_eq!(
            encode(&FeedbackParams::new(&config)),
            "secret=afterthought&tenant=acme"
        );
    }

    #[test]
    fn endpoint_joins_api_path_and_query() {
        let params = FeedbackParams { tenant: None };
        assert_eq!(
            endpoint("https://cms.example/api/", "feedback", &params),
            "https://cms.example/api/feedback?secret=afterthought"
        );
        assert_eq!(
            endpoint("https://cms.example", "posts", &PostsParams::default()),
            "https://cms.example/posts"
        );
    }
}
