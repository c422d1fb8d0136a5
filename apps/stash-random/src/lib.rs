//! # stash-random
//!
//! The Random button for a Stash server: a GraphQL client implementing the
//! engine's collection seam, a CLI and an HTTP trigger endpoint around the
//! pure selection logic in `stash-random-core`.

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
