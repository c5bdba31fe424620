//! Gateway trait definitions for the domain layer.
//!
//! These traits abstract the crate's outbound network interactions so the
//! decryption and orchestration logic stays independent of `reqwest`.
//! Concrete implementations live in [`crate::infrastructure::http`]; mock
//! implementations are auto-generated via `mockall` for testing.

pub mod key_client;
pub mod link_resolver;
pub mod page_fetcher;

pub use key_client::KeyClient;
pub use link_resolver::LinkResolver;
pub use page_fetcher::{FetchedPage, PageFetcher};

#[cfg(test)]
pub use key_client::MockKeyClient;
#[cfg(test)]
pub use link_resolver::MockLinkResolver;
#[cfg(test)]
pub use page_fetcher::MockPageFetcher;
