//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Centralizes signup, login and token issuance under the service crate.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
