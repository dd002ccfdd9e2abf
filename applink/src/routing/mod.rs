//! Everything that runs synchronously before the first navigation:
//! classification, URL composition and path whitelisting.

pub mod builder;
pub mod classifier;
pub mod query;
pub mod whitelist;

pub use builder::ResolvedUrls;
pub use classifier::{classify, derive_os_version, match_definition, OsVersion, Platform, PlatformFamily};
pub use query::{apply_referrer, compose_url, parse_query_params, UrlParts};
pub use whitelist::is_path_whitelisted;
