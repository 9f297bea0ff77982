//! Marker binding components.
//!
//! [`classic::ClassicMarkerBinding`] wraps the legacy, in-place-updatable
//! marker through the shared [`setup::MapComponentSetup`] helper;
//! [`advanced::AdvancedMarkerBinding`] owns the full recreate-on-change
//! lifecycle of the newer marker flavor, with the decision half factored
//! into [`reconcile::plan`].

pub mod advanced;
pub mod classic;
pub mod reconcile;
pub mod setup;
