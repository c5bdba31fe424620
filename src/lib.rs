//! # filedecrypt
//!
//! Client library for recovering download links from FileCrypt link
//! containers.
//!
//! A container page protects its links with one of three obfuscation
//! schemes; the build selects the right path from what the page advertises:
//!
//! - **Inline payload (CNL)** - an AES-CBC blob embedded in the page, keyed
//!   by a hex value that doubles as the IV
//! - **Package payload (DLC)** - an externally fetched package requiring a
//!   key-service round trip and a two-stage AES decryption before yielding an
//!   embedded document of base64-encoded URLs
//! - **Row resolution** - no payload at all; each table row's link is
//!   de-obfuscated through a two-hop redirect chase, rows resolved
//!   concurrently and joined back into row order
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles with clear layer
//! separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, gateway traits, session value
//! - **Application Layer** ([`application`]) - Decryptors and orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - `reqwest` gateways
//! - **Extraction** ([`extract`]) - Regex scraping of the container page
//!
//! ## Quick Start
//!
//! ```bash
//! # All configuration is optional; see the config module for variables
//! cargo run -- https://filecrypt.co/Container/XYZ123
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod extract;
pub mod infrastructure;
pub mod utils;

pub use error::AppError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        CnlDecryptor, ContainerService, DlcDecryptor, ResolutionPolicy, ServiceOptions,
    };
    pub use crate::domain::entities::{
        CnlPayload, Container, ContainerStatus, DlcPayload, FileSize, LinkEntry, LinkMetadata,
        LinkStatus, PayloadSource, SizeUnit,
    };
    pub use crate::domain::gateways::{FetchedPage, KeyClient, LinkResolver, PageFetcher};
    pub use crate::domain::session::SessionHeader;
    pub use crate::error::AppError;
}
