//! folio: content server for a single-artist portfolio.
//!
//! The crate keeps one [`content::SiteContent`] aggregate (projects, biography,
//! showreel URL) in memory, persists every mutation through a
//! [`storage::ContentBackend`], and optionally follows a remote document so
//! that edits made by one admin session reach every open viewer.
//!
//! - [`content`] - Data model and the [`content::ContentStore`]
//! - [`storage`] - Local slots (memory/redb) and the remote document adapter
//! - [`sync`] - Remote sync listener
//! - [`auth`] - Passphrase gate and admin sessions
//! - [`router`] - Public/admin view selection
//! - [`bio`] - Biography generation with fixed fallbacks
//! - [`http`] - axum API exposing all of the above

pub mod app;
pub mod auth;
pub mod bio;
pub mod commands;
pub mod config;
pub mod constants;
pub mod content;
pub mod error;
pub mod http;
pub mod logging;
pub mod paths;
pub mod router;
pub mod storage;
pub mod sync;

pub use error::{Error, Result};
