//! Core domain entities representing the container data model.
//!
//! # Entity Types
//!
//! - [`Container`] - The assembled link container with size accounting
//! - [`LinkEntry`] / [`LinkMetadata`] - A recovered link and its row data
//! - [`FileSize`] - Size value object (negative values rejected)
//! - [`CnlPayload`] / [`DlcPayload`] - Encrypted payload value objects
//! - [`PayloadSource`] - The payload class present on a page
//!
//! Value objects validate their invariants at construction and are immutable
//! afterwards; no shared mutable state crosses component boundaries.

pub mod container;
pub mod file_size;
pub mod link_entry;
pub mod payload;

pub use container::{Container, ContainerStatus};
pub use file_size::{FileSize, SizeUnit};
pub use link_entry::{LinkEntry, LinkMetadata, LinkStatus};
pub use payload::{CnlPayload, DlcPayload, PayloadSource, DLC_KEY_FRAGMENT_LEN};
