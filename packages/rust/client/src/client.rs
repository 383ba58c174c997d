//! The content client: site, posts, post, and feedback operations.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use awesauce_shared::{AwesauceError, Feedback, Post, Result, Site, brand_has_assets};

use crate::query::{FeedbackParams, PostParams, PostsParams, SiteParams, endpoint};
use crate::store::{ClientConfig, ConfigStore, ConfigUpdate};
use crate::transport::{ReqwestTransport, TransportRequest, TransportResponse};

/// Page size used when neither a category nor a limit is given.
pub const DEFAULT_POSTS_LIMIT: u32 = 20;

// ---------------------------------------------------------------------------
// PostsQuery
// ---------------------------------------------------------------------------

/// Arguments for [`CmsClient::fetch_posts`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostsQuery {
    pub post_type: Option<String>,
    pub category: Option<String>,
    /// Max posts returned. Defaults to 20 only when `category` is also unset.
    pub limit: Option<u32>,
    pub skip: Option<u32>,
}

impl PostsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post_type(mut self, post_type: impl Into<String>) -> Self {
        self.post_type = Some(post_type.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    /// The limit actually sent. A category without a limit is unbounded.
    pub fn effective_limit(&self) -> Option<u32> {
        match (&self.category, self.limit) {
            (None, None) => Some(DEFAULT_POSTS_LIMIT),
            (_, limit) => limit,
        }
    }
}

// ---------------------------------------------------------------------------
// CmsClient
// ---------------------------------------------------------------------------

/// Client for the CMS content API.
///
/// Owns its session configuration. Every operation first merges an optional
/// [`ConfigUpdate`] and then runs against a snapshot of the result, using
/// whichever transport is configured at that moment. Only
/// [`fetch_site`](Self::fetch_site) writes back to the configuration (the
/// tenant it learns).
#[derive(Debug, Default)]
pub struct CmsClient {
    store: ConfigStore,
}

impl CmsClient {
    /// Default config with the `reqwest` transport installed.
    pub fn new() -> Result<Self> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_config(
            ConfigUpdate::new().transport(Arc::new(transport)),
        ))
    }

    /// Default config merged with `update`. No transport unless `update` has one.
    pub fn with_config(update: ConfigUpdate) -> Self {
        let mut config = ClientConfig::default();
        config.merge(update);
        Self {
            store: ConfigStore::new(config),
        }
    }

    /// Merge `update` into the session config.
    pub fn set_config(&self, update: ConfigUpdate) {
        self.store.merge(update);
    }

    /// A copy of the current session config.
    pub fn config(&self) -> ClientConfig {
        self.store.snapshot()
    }

    /// Fetch the site (brand, logo assets) for the configured host.
    ///
    /// Returns `None` on a non-2xx response and [`Site::not_found`] on a
    /// 2xx response with an empty body. A tenant on the returned brand is
    /// stored for all later calls.
    #[instrument(skip_all, fields(endpoint = "site"))]
    pub async fn fetch_site(&self, overrides: ConfigUpdate) -> Result<Option<Site>> {
        let config = self.store.merge_and_snapshot(overrides);
        let url = endpoint(&config.api, "site", &SiteParams::for_config(&config));

        let response = send(&config, TransportRequest::get(url)).await?;
        if !response.ok() {
            warn!(status = response.status, "site request failed");
            return Ok(None);
        }

        let value = response.json_value()?;
        if is_empty_json(&value) {
            debug!("empty site response, using not-found placeholder");
            return Ok(Some(Site::not_found()));
        }

        let mut site: Site = serde_json::from_value(value)
            .map_err(|e| AwesauceError::decode(format!("site response: {e}")))?;
        brand_has_assets(&mut site);

        if let Some(tenant) = site.brand.tenant() {
            info!(tenant, brand = %site.brand.slug, "tenant learned from site");
            self.store.set_tenant(tenant);
        }

        Ok(Some(site))
    }

    /// Fetch a page of posts. Non-2xx yields an empty list.
    pub async fn fetch_posts(&self, query: &PostsQuery) -> Result<Vec<Post>> {
        self.fetch_posts_with(ConfigUpdate::default(), query).await
    }

    #[instrument(skip_all, fields(endpoint = "posts", post_type = ?query.post_type, category = ?query.category))]
    pub async fn fetch_posts_with(
        &self,
        overrides: ConfigUpdate,
        query: &PostsQuery,
    ) -> Result<Vec<Post>> {
        let config = self.store.merge_and_snapshot(overrides);
        let params = PostsParams::new(
            &config,
            query.post_type.as_deref(),
            query.category.as_deref(),
            query.effective_limit(),
            query.skip,
        );
        let url = endpoint(&config.api, "posts", &params);

        let response = send(&config, TransportRequest::get(url)).await?;
        if !response.ok() {
            warn!(status = response.status, "posts request failed");
            return Ok(Vec::new());
        }

        let posts: Option<Vec<Post>> = response.json()?;
        let posts = posts.unwrap_or_default();
        debug!(count = posts.len(), "posts fetched");
        Ok(posts)
    }

    /// Fetch one post by slug. Non-2xx (typically 404) yields `None`.
    pub async fn fetch_post(&self, slug: &str, post_type: Option<&str>) -> Result<Option<Post>> {
        self.fetch_post_with(ConfigUpdate::default(), slug, post_type)
            .await
    }

    #[instrument(skip_all, fields(endpoint = "post", slug = %slug))]
    pub async fn fetch_post_with(
        &self,
        overrides: ConfigUpdate,
        slug: &str,
        post_type: Option<&str>,
    ) -> Result<Option<Post>> {
        let config = self.store.merge_and_snapshot(overrides);
        let url = endpoint(&config.api, "post", &PostParams::new(&config, slug, post_type));

        let response = send(&config, TransportRequest::get(url)).await?;
        if !response.ok() {
            warn!(status = response.status, "post request failed");
            return Ok(None);
        }

        response.json()
    }

    /// Submit feedback, scoped to the tenant if one is set.
    ///
    /// The raw response is returned whatever its status; checking it is up
    /// to the caller.
    pub async fn post_feedback(&self, payload: &Feedback) -> Result<TransportResponse> {
        self.post_feedback_with(ConfigUpdate::default(), payload)
            .await
    }

    #[instrument(skip_all, fields(endpoint = "feedback"))]
    pub async fn post_feedback_with(
        &self,
        overrides: ConfigUpdate,
        payload: &Feedback,
    ) -> Result<TransportResponse> {
        let config = self.store.merge_and_snapshot(overrides);
        let url = endpoint(&config.api, "feedback", &FeedbackParams::new(&config));
        let body = serde_json::to_string(payload)
            .map_err(|e| AwesauceError::validation(format!("feedback payload: {e}")))?;

        send(&config, TransportRequest::post(url, body)).await
    }
}

async fn send(config: &ClientConfig, request: TransportRequest) -> Result<TransportResponse> {
    let transport = config
        .transport
        .as_ref()
        .ok_or(AwesauceError::MissingTransport)?;
    debug!(method = ?request.method, url = %request.url, "issuing request");
    transport.send(request).await
}

/// `null` or `{}`: the CMS's way of saying "no such site".
fn is_empty_json(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use crate::transport::Method;

    fn client_with(transport: &Arc<MockTransport>) -> CmsClient {
        CmsClient::with_config(
            ConfigUpdate::new()
                .api("https://cms.test")
                .transport(transport.clone()),
        )
    }

    const SITE_JSON: &str = r#"{
        "brand": {"name": "Acme", "slug": "acme", "colors": [], "fonts": [], "tenant": "acme"},
        "assets": [{"use": "logomark", "url": "https://cdn/m.svg"}]
    }"#;

    // -----------------------------------------------------------------------
    // PostsQuery
    // -----------------------------------------------------------------------

    #[test]
    fn default_limit_only_without_category() {
        assert_eq!(PostsQuery::new().effective_limit(), Some(20));
        assert_eq!(PostsQuery::new().category("games").effective_limit(), None);
        assert_eq!(
            PostsQuery::new().category("games").limit(5).effective_limit(),
            Some(5)
        );
        assert_eq!(PostsQuery::new().limit(3).effective_limit(), Some(3));
    }

    // -----------------------------------------------------------------------
    // fetch_site
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn fetch_site_selects_by_host() {
        let transport = MockTransport::new([TransportResponse::new(200, SITE_JSON)]);
        let client = client_with(&transport);

        let site = client
            .fetch_site(ConfigUpdate::new().host("acme.test"))
            .await
            .unwrap()
            .expect("site");

        assert_eq!(site.brand.name, "Acme");
        assert_eq!(transport.urls(), ["https://cms.test/site?host=acme.test"]);
    }

    #[tokio::test]
    async fn fetch_site_with_brand_keys_host_value_as_brand() {
        let transport = MockTransport::new([TransportResponse::new(200, SITE_JSON)]);
        let client = client_with(&transport);

        client
            .fetch_site(ConfigUpdate::new().host("acme.test").brand("acme"))
            .await
            .unwrap();

        assert_eq!(transport.urls(), ["https://cms.test/site?brand=acme.test"]);
    }

    #[tokio::test]
    async fn fetch_site_after_clearing_brand_selects_by_host() {
        let transport = MockTransport::new([
            TransportResponse::new(200, SITE_JSON),
            TransportResponse::new(200, SITE_JSON),
        ]);
        let client = client_with(&transport);

        client
            .fetch_site(ConfigUpdate::new().host("acme.test").brand("acme"))
            .await
            .unwrap();
        client
            .fetch_site(ConfigUpdate::new().clear_brand())
            .await
            .unwrap();

        assert!(client.config().brand.is_none());
        assert_eq!(
            transport.urls(),
            [
                "https://cms.test/site?brand=acme.test",
                "https://cms.test/site?host=acme.test",
            ]
        );
    }

    #[tokio::test]
    async fn fetch_site_accepts_sparse_brand_colors_and_fonts() {
        let body = r##"{
            "brand": {
                "colors": [{"hex": "#fff", "use": "bg"}],
                "fonts": [{"sizes": "16px"}],
                "tenant": "acme"
            },
            "assets": []
        }"##;
        let transport = MockTransport::new([TransportResponse::new(200, body)]);
        let client = client_with(&transport);

        let site = client.fetch_site(ConfigUpdate::new()).await.unwrap().unwrap();
        assert_eq!(site.brand.colors[0].hex, "#fff");
        assert_eq!(site.brand.colors[0].name, "");
        assert_eq!(site.brand.fonts[0].stack, "");
        assert_eq!(client.config().tenant.as_deref(), Some("acme"));
    }

    #[tokio::test]
    async fn fetch_site_derives_logo_flags() {
        let transport = MockTransport::new([TransportResponse::new(200, SITE_JSON)]);
        let client = client_with(&transport);

        let site = client.fetch_site(ConfigUpdate::new()).await.unwrap().unwrap();
        assert!(site.brand.has_logomark);
        assert!(!site.brand.has_logotype);
    }

    #[tokio::test]
    async fn fetch_site_null_body_yields_placeholder() {
        for body in ["null", "", "{}"] {
            let transport = MockTransport::new([TransportResponse::new(200, body)]);
            let client = client_with(&transport);

            let site = client.fetch_site(ConfigUpdate::new()).await.unwrap();
            assert_eq!(site, Some(Site::not_found()), "body {body:?}");
            assert_eq!(site.unwrap().brand.slug, "notfound");
            assert!(client.config().tenant.is_none());
        }
    }

    #[tokio::test]
    async fn fetch_site_non_2xx_is_none() {
        let transport = MockTransport::new([TransportResponse::new(500, "oops")]);
        let client = client_with(&transport);

        assert_eq!(client.fetch_site(ConfigUpdate::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn tenant_from_site_scopes_later_calls() {
        let transport = MockTransport::new([
            TransportResponse::new(200, SITE_JSON),
            TransportResponse::new(200, "[]"),
            TransportResponse::new(404, ""),
            TransportResponse::new(200, ""),
        ]);
        let client = client_with(&transport);

        client.fetch_site(ConfigUpdate::new()).await.unwrap();
        assert_eq!(client.config().tenant.as_deref(), Some("acme"));

        client.fetch_posts(&PostsQuery::new()).await.unwrap();
        client.fetch_post("intro", None).await.unwrap();
        client.post_feedback(&Feedback::default()).await.unwrap();

        let urls = transport.urls();
        assert!(urls[1].contains("tenant=acme"), "{}", urls[1]);
        assert!(urls[2].contains("tenant=acme"), "{}", urls[2]);
        assert!(urls[3].ends_with("feedback?secret=afterthought&tenant=acme"));
    }

    #[tokio::test]
    async fn site_without_tenant_keeps_configured_tenant() {
        let body = r#"{"brand": {"name": "B", "slug": "b"}, "assets": []}"#;
        let transport = MockTransport::new([TransportResponse::new(200, body)]);
        let client = client_with(&transport);

        client
            .fetch_site(ConfigUpdate::new().tenant("manual"))
            .await
            .unwrap();
        assert_eq!(client.config().tenant.as_deref(), Some("manual"));
    }

    #[tokio::test]
    async fn malformed_site_is_decode_error() {
        let transport = MockTransport::new([TransportResponse::new(200, "[1, 2]")]);
        let client = client_with(&transport);

        let err = client.fetch_site(ConfigUpdate::new()).await.unwrap_err();
        assert!(matches!(err, AwesauceError::Decode { .. }));
    }

    // -----------------------------------------------------------------------
    // fetch_posts / fetch_post
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn fetch_posts_defaults_limit() {
        let transport = MockTransport::new([TransportResponse::new(
            200,
            r#"[{"title": "A", "slug": "a", "excerpt": "x"}]"#,
        )]);
        let client = client_with(&transport);

        let posts = client.fetch_posts(&PostsQuery::new()).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(
            transport.urls(),
            ["https://cms.test/posts?host=apellean.com&limit=20"]
        );
    }

    #[tokio::test]
    async fn fetch_posts_with_category_is_unbounded() {
        let transport = MockTransport::new([TransportResponse::new(200, "[]")]);
        let client = client_with(&transport);

        client
            .fetch_posts(&PostsQuery::new().category("games"))
            .await
            .unwrap();

        let url = &transport.urls()[0];
        assert!(url.contains("category=games"));
        assert!(!url.contains("limit="));
    }

    #[tokio::test]
    async fn fetch_posts_sends_all_defined_params_in_order() {
        let transport = MockTransport::new([TransportResponse::new(200, "[]")]);
        let client = client_with(&transport);

        client
            .fetch_posts_with(
                ConfigUpdate::new().brand("acme").tenant("t1"),
                &PostsQuery::new().post_type("apps").category("game").limit(10).skip(30),
            )
            .await
            .unwrap();

        assert_eq!(
            transport.urls(),
            ["https://cms.test/posts?host=apellean.com&brand=acme&tenant=t1&type=apps&category=game&limit=10&skip=30"]
        );
    }

    #[tokio::test]
    async fn fetch_posts_keeps_posts_with_fractional_embed_sizes() {
        let body = r#"[
            {"title": "A", "slug": "a"},
            {"slug": "b", "embeds": [{"type": "video", "thumbnail_width": 480.5, "cache_age": 3600}]},
            {"title": "C", "slug": "c", "sale": {"quantity": 2.5}}
        ]"#;
        let transport = MockTransport::new([TransportResponse::new(200, body)]);
        let client = client_with(&transport);

        let posts = client.fetch_posts(&PostsQuery::new()).await.unwrap();
        assert_eq!(posts.len(), 3);
        let embed = &posts[1].embeds.as_ref().unwrap()[0];
        assert_eq!(embed.thumbnail_width, Some(480.5));
        assert_eq!(embed.embed, "");
        assert!(posts[1].title.is_none());
    }

    #[tokio::test]
    async fn fetch_posts_non_2xx_is_empty() {
        let transport = MockTransport::new([TransportResponse::new(503, "unavailable")]);
        let client = client_with(&transport);

        let posts = client.fetch_posts(&PostsQuery::new()).await.unwrap();
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn fetch_posts_null_body_is_empty() {
        let transport = MockTransport::new([TransportResponse::new(200, "null")]);
        let client = client_with(&transport);

        assert!(client.fetch_posts(&PostsQuery::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_post_found() {
        let transport = MockTransport::new([TransportResponse::new(
            200,
            r#"{"title": "Intro", "slug": "intro", "excerpt": "Hello", "type": "app"}"#,
        )]);
        let client = client_with(&transport);

        let post = client.fetch_post("intro", Some("app")).await.unwrap().unwrap();
        assert_eq!(post.title.as_deref(), Some("Intro"));
        assert_eq!(
            transport.urls(),
            ["https://cms.test/post?slug=intro&type=app&host=apellean.com"]
        );
    }

    #[tokio::test]
    async fn fetch_post_not_found() {
        let transport = MockTransport::new([TransportResponse::new(404, "")]);
        let client = client_with(&transport);

        assert_eq!(client.fetch_post("missing", None).await.unwrap(), None);
    }

    #[tokio::test]
    async fn reads_do_not_write_config() {
        let transport = MockTransport::new([
            TransportResponse::new(200, "[]"),
            TransportResponse::new(404, ""),
        ]);
        let client = client_with(&transport);

        client.fetch_posts(&PostsQuery::new()).await.unwrap();
        client.fetch_post("x", None).await.unwrap();
        assert!(client.config().tenant.is_none());
    }

    // -----------------------------------------------------------------------
    // post_feedback
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn post_feedback_returns_raw_response() {
        let transport = MockTransport::new([TransportResponse::new(422, "bad email")]);
        let client = client_with(&transport);

        let feedback = Feedback {
            email: "a@b.c".into(),
            message: "Love it".into(),
            hostname: "acme.test".into(),
            user_agent: "tests".into(),
            ..Feedback::default()
        };
        let response = client.post_feedback(&feedback).await.unwrap();
        assert_eq!(response.status, 422);
        assert_eq!(response.text(), "bad email");

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "https://cms.test/feedback?secret=afterthought");
        let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["message"], "Love it");
        assert_eq!(body["userAgent"], "tests");
    }

    // -----------------------------------------------------------------------
    // Transport wiring
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn missing_transport_is_an_error() {
        let client = CmsClient::with_config(ConfigUpdate::new());
        let err = client.fetch_posts(&PostsQuery::new()).await.unwrap_err();
        assert!(matches!(err, AwesauceError::MissingTransport));
    }

    #[tokio::test]
    async fn override_can_supply_transport_per_call() {
        let transport = MockTransport::new([TransportResponse::new(200, "[]")]);
        let client = CmsClient::with_config(ConfigUpdate::new());

        client
            .fetch_posts_with(
                ConfigUpdate::new().transport(transport.clone()),
                &PostsQuery::new(),
            )
            .await
            .unwrap();

        assert_eq!(transport.requests().len(), 1);
        assert!(client.config().transport.is_some());
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let transport = MockTransport::new([]);
        let client = client_with(&transport);

        let err = client.fetch_site(ConfigUpdate::new()).await.unwrap_err();
        assert!(matches!(err, AwesauceError::Transport(_)));
    }

    #[tokio::test]
    async fn end_to_end_over_http() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/site"))
            .and(wiremock::matchers::query_param("host", "acme.test"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(SITE_JSON))
            .mount(&server)
            .await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/posts"))
            .and(wiremock::matchers::query_param("tenant", "acme"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_string(r#"[{"title": "A", "slug": "a", "excerpt": "x"}]"#),
            )
            .mount(&server)
            .await;

        let client = CmsClient::new().unwrap();
        client.set_config(ConfigUpdate::new().api(server.uri()).host("acme.test"));

        let site = client.fetch_site(ConfigUpdate::new()).await.unwrap();
        assert!(site.is_some());

        let posts = client.fetch_posts(&PostsQuery::new()).await.unwrap();
        assert_eq!(posts[0].slug, "a");
    }
}
