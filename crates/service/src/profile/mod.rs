//! Profile aggregation: joins the user row with its role-specific profile
//! into a single view/update contract and owns the merge/validation policy
//! (specialization matching, capped lists, empty-default backfill).

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::ProfileService;
