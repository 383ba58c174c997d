//! CLI command definitions, routing, and tracing setup.

use awesauce_client::{CmsClient, ConfigUpdate, PostsQuery};
use awesauce_render::{css_variables_from, meta_from_post, structured_data_for_post};
use awesauce_shared::{AppConfig, Feedback, Post, Site, init_config, load_config};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use tracing::info;

/// User agent reported in feedback when none is given.
const DEFAULT_USER_AGENT: &str = concat!("awesauce-cli/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Awesauce — fetch CMS content and render page metadata.
#[derive(Parser)]
#[command(
    name = "awesauce",
    version,
    about = "Query the Awesauce content API and render meta tags and JSON-LD.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Content API base URL (overrides config file).
    #[arg(long, env = "AWESAUCE_API", global = true)]
    pub api: Option<String>,

    /// Site hostname (overrides config file).
    #[arg(long, env = "AWESAUCE_HOST", global = true)]
    pub host: Option<String>,

    /// Brand slug (overrides config file).
    #[arg(long, env = "AWESAUCE_BRAND", global = true)]
    pub brand: Option<String>,

    /// Tenant (overrides config file; normally learned from the site).
    #[arg(long, env = "AWESAUCE_TENANT", global = true)]
    pub tenant: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fetch the site (brand and logo assets) for the configured host.
    Site {
        /// Also print the brand's CSS variables.
        #[arg(long)]
        css: bool,
    },

    /// List posts.
    Posts {
        /// Post type (e.g. apps, blog).
        #[arg(short = 't', long = "type")]
        post_type: Option<String>,

        /// Category filter. Without --limit, a category fetch is unbounded.
        #[arg(short, long)]
        category: Option<String>,

        /// Max posts returned (defaults to 20 when no category is given).
        #[arg(short, long)]
        limit: Option<u32>,

        /// Posts to skip, for paging.
        #[arg(short, long)]
        skip: Option<u32>,
    },

    /// Fetch a single post by slug.
    Post {
        /// Post slug.
        slug: String,

        /// Post type, when slugs may collide across types.
        #[arg(short = 't', long = "type")]
        post_type: Option<String>,
    },

    /// Submit feedback.
    Feedback {
        #[arg(long)]
        email: String,

        #[arg(long)]
        message: String,

        /// Hostname the feedback was sent from.
        #[arg(long)]
        hostname: String,

        #[arg(long, default_value = DEFAULT_USER_AGENT)]
        user_agent: String,

        /// Post slug the feedback is about.
        #[arg(long)]
        post: Option<String>,

        #[arg(long)]
        post_title: Option<String>,

        #[arg(long)]
        post_type: Option<String>,
    },

    /// Print the meta tags for a post's page.
    Meta {
        /// Post slug.
        slug: String,

        /// Canonical URL of the page.
        #[arg(long)]
        url: String,

        #[arg(short = 't', long = "type")]
        post_type: Option<String>,
    },

    /// Print the JSON-LD script tag for a post.
    Structured {
        /// Post slug.
        slug: String,

        #[arg(short = 't', long = "type")]
        post_type: Option<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

impl Cli {
    /// Overrides given on the command line or via `AWESAUCE_*` env vars.
    fn overrides(&self) -> ConfigUpdate {
        ConfigUpdate {
            api: self.api.clone(),
            host: self.host.clone(),
            brand: self.brand.clone().map(Some),
            tenant: self.tenant.clone().map(Some),
            transport: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "awesauce=info",
        1 => "awesauce=debug",
        _ => "awesauce=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let overrides = cli.overrides();
    match cli.command {
        Command::Site { css } => cmd_site(overrides, css).await,
        Command::Posts {
            post_type,
            category,
            limit,
            skip,
        } => {
            let query = PostsQuery {
                post_type,
                category,
                limit,
                skip,
            };
            cmd_posts(overrides, &query).await
        }
        Command::Post { slug, post_type } => {
            cmd_post(overrides, &slug, post_type.as_deref()).await
        }
        Command::Feedback {
            email,
            message,
            hostname,
            user_agent,
            post,
            post_title,
            post_type,
        } => {
            let feedback = Feedback {
                email,
                message,
                brand: overrides.brand.clone().flatten(),
                hostname,
                post_type,
                post,
                post_title,
                user_agent,
            };
            cmd_feedback(overrides, &feedback).await
        }
        Command::Meta {
            slug,
            url,
            post_type,
        } => cmd_meta(overrides, &slug, &url, post_type.as_deref()).await,
        Command::Structured { slug, post_type } => {
            cmd_structured(overrides, &slug, post_type.as_deref()).await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show(overrides).await,
        },
    }
}

/// Build a client from the config file, then apply command-line overrides.
fn build_client(overrides: ConfigUpdate) -> Result<CmsClient> {
    let config: AppConfig = load_config()?;
    let client = CmsClient::new()?;
    client.set_config(ConfigUpdate::from(&config.cms));
    client.set_config(overrides);
    Ok(client)
}

/// Fetch the site so the tenant is known, then the post.
async fn site_and_post(
    overrides: ConfigUpdate,
    slug: &str,
    post_type: Option<&str>,
) -> Result<(Site, Post)> {
    let client = build_client(overrides)?;

    let site = client
        .fetch_site(ConfigUpdate::default())
        .await?
        .ok_or_else(|| eyre!("site request failed"))?;

    let post = client
        .fetch_post(slug, post_type)
        .await?
        .ok_or_else(|| eyre!("post '{slug}' not found"))?;

    Ok((site, post))
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_site(overrides: ConfigUpdate, css: bool) -> Result<()> {
    let client = build_client(overrides)?;

    let Some(site) = client.fetch_site(ConfigUpdate::default()).await? else {
        return Err(eyre!("site request failed"));
    };

    info!(
        brand = %site.brand.slug,
        assets = site.assets.len(),
        "site fetched"
    );
    println!("{}", serde_json::to_string_pretty(&site)?);
    if css {
        println!("{}", css_variables_from(&site.brand));
    }
    Ok(())
}

async fn cmd_posts(overrides: ConfigUpdate, query: &PostsQuery) -> Result<()> {
    let client = build_client(overrides)?;
    let posts = client.fetch_posts(query).await?;

    info!(count = posts.len(), "posts fetched");
    println!("{}", serde_json::to_string_pretty(&posts)?);
    Ok(())
}

async fn cmd_post(overrides: ConfigUpdate, slug: &str, post_type: Option<&str>) -> Result<()> {
    let client = build_client(overrides)?;

    match client.fetch_post(slug, post_type).await? {
        Some(post) => {
            println!("{}", serde_json::to_string_pretty(&post)?);
            Ok(())
        }
        None => Err(eyre!("post '{slug}' not found")),
    }
}

async fn cmd_feedback(overrides: ConfigUpdate, feedback: &Feedback) -> Result<()> {
    let client = build_client(overrides)?;
    let response = client.post_feedback(feedback).await?;

    if !response.ok() {
        return Err(eyre!(
            "feedback rejected: HTTP {} {}",
            response.status,
            response.text()
        ));
    }

    println!("Feedback sent (HTTP {}).", response.status);
    Ok(())
}

async fn cmd_meta(
    overrides: ConfigUpdate,
    slug: &str,
    url: &str,
    post_type: Option<&str>,
) -> Result<()> {
    let (site, post) = site_and_post(overrides, slug, post_type).await?;
    println!("{}", meta_from_post(&post, &site.brand.name, url));
    Ok(())
}

async fn cmd_structured(overrides: ConfigUpdate, slug: &str, post_type: Option<&str>) -> Result<()> {
    let (_, post) = site_and_post(overrides, slug, post_type).await?;
    println!("{}", structured_data_for_post(&post));
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(overrides: ConfigUpdate) -> Result<()> {
    let mut config: AppConfig = load_config()?;
    if let Some(api) = overrides.api {
        config.cms.api = api;
    }
    if let Some(host) = overrides.host {
        config.cms.host = host;
    }
    if let Some(brand) = overrides.brand {
        config.cms.brand = brand;
    }
    if let Some(tenant) = overrides.tenant {
        config.cms.tenant = tenant;
    }

    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
