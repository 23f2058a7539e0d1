#![doc = "readme-sync-core: extraction, rewriting and page assembly for readme-sync."]

//! This crate contains the data model and pipeline that turn an upstream README
//! into documentation pages. The CLI crate only loads configuration and wires a
//! [`download::GithubSource`] into [`synchronise::synchronise`].
//!
//! # Pipeline
//! raw README → [`extract`] → [`rewrite`] (images, then links) → [`metadata`] →
//! [`assemble`] → written by [`synchronise`].

pub mod assemble;
pub mod config;
pub mod contract;
pub mod download;
pub mod error;
pub mod extract;
pub mod metadata;
pub mod rewrite;
pub mod synchronise;

pub use error::SyncError;
