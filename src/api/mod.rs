//! HTTP surfaces served next to the webhook.

pub mod services;
