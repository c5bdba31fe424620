//! Infrastructure layer implementing the domain's gateway traits.
//!
//! # Modules
//!
//! - [`http`] - `reqwest`-backed gateway implementations and client settings

pub mod http;
