//! linkbot - Telegram slash-command front end for a remote URL shortener
//!
//! Allow-listed users manage short links with `/create`, `/delete` and
//! `/check`; the same process serves `GET /{slug}` redirects. Links live in a
//! remote storage API, never locally.
//!
//! # Architecture
//! - `auth`: sender allow-list gate
//! - `command`: parse → dispatch → render pipeline
//! - `store`: `LinkStore` trait, HTTP client for the remote API, in-memory store
//! - `telegram`: webhook intake and webhook management API
//! - `api`: redirect HTTP surface
//! - `config`: TOML + environment configuration, validated at startup
//! - `runtime`: server and CLI modes
//! - `system`: logging

pub mod api;
pub mod auth;
pub mod cli;
pub mod command;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod store;
pub mod system;
pub mod telegram;
pub mod utils;
