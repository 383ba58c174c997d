//! Page metadata rendering for fetched CMS content.
//!
//! Produces strings for the page-rendering layer to embed:
//! - [`meta`] — `<meta>` tags (application name, description, Open Graph)
//! - [`structured`] — schema.org JSON-LD `<script>` tags
//! - [`css`] — brand CSS custom properties

pub mod css;
pub mod meta;
pub mod structured;

pub use css::css_variables_from;
pub use meta::{meta, meta_from_post};
pub use structured::{
    AppRecord, ArticleRecord, PersonRecord, StructuredData, structured_data_for_post,
};
