//! URL handling module for Content-Agent
//!
//! This module provides start-URL validation, link resolution and the
//! same-site check that bounds the crawl to a single network location.

mod origin;
mod resolve;

pub use origin::{is_same_site, network_location};
pub use resolve::{parse_http_url, resolve_link};
