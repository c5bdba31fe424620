//! Business logic services for the application layer.

pub mod cnl_decryptor;
pub mod container_service;
pub mod dlc_decryptor;

pub use cnl_decryptor::CnlDecryptor;
pub use container_service::{ContainerService, ResolutionPolicy, ServiceOptions};
pub use dlc_decryptor::DlcDecryptor;
