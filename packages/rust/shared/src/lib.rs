//! Shared types, error model, and configuration for Awesauce.
//!
//! This crate is the foundation depended on by all other Awesauce crates.
//! It provides:
//! - [`AwesauceError`] — the unified error type
//! - CMS domain types ([`Site`], [`Brand`], [`Post`], [`Asset`], [`Feedback`], ...)
//! - Asset selection ([`find_asset_url_for_use`], [`thumb_url_for_post`])
//! - Configuration ([`AppConfig`], [`CmsConfig`], config loading)

pub mod assets;
pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use assets::{USE_SCREEN, USE_THUMB, find_asset_url_for_use, thumb_url_for_post};
pub use config::{
    AppConfig, CmsConfig, DEFAULT_API, DEFAULT_HOST, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{AwesauceError, Result};
pub use types::{
    Asset, Author, Brand, Color, Content, Dimensions, Feedback, Font, OEmbed, Post, PostKind,
    PostLinks, PostSale, PostType, Site, USE_LOGOMARK, USE_LOGOTYPE, brand_has_assets,
};
