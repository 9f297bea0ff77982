//! The map SDK as a trait seam.
//!
//! Everything the bindings need from the SDK — constructors, handles,
//! clustering, visibility observation — is expressed here as traits, so the
//! reconciliation logic runs unchanged against a live SDK adapter or the
//! in-memory doubles in [`crate::testing`].

pub mod api;
pub mod cluster;
pub mod handle;
pub mod observer;
