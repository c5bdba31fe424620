//! Regex-based extraction of container facts from the fetched HTML.
//!
//! The container page is the interface to the surrounding site; these
//! functions pull out exactly what the build needs and nothing else:
//!
//! - [`container_metadata`] - title, status, last-checked, payload ids
//! - [`cnl_payload`] - the inline payload embedded in the CNL form
//! - [`link_rows`] - per-row filename/size/status plus the obfuscated link

pub mod cnl_payload;
pub mod container_metadata;
pub mod link_rows;

pub use cnl_payload::cnl_payload;
pub use container_metadata::{container_metadata, ContainerMetadata};
pub use link_rows::{link_rows, RowMetadata};
