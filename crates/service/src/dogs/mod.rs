//! Dog sub-document mutations: append/update/delete against the embedded
//! list on the owner profile, addressed by stable per-entry ids.

pub mod service;

pub use service::{DogPatch, DogService};
