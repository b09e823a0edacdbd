//! Sender authorization
//!
//! Every slash command is checked against the configured allow-list before it
//! is parsed. A denied sender gets no reply at all; the only trace is a log
//! line carrying the rejected id.

use std::collections::HashSet;

use tracing::{trace, warn};

/// Gate decision for one sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Denied,
}

/// Split a comma-separated id list, trimming whitespace and dropping empties.
pub fn parse_allow_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    allowed: HashSet<String>,
}

impl AuthorizationGate {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_allow_list(raw: &str) -> Self {
        Self::new(parse_allow_list(raw))
    }

    pub fn check(&self, sender_id: &str) -> Access {
        if self.allowed.contains(sender_id) {
            trace!("Sender {} authorized", sender_id);
            Access::Allowed
        } else {
            warn!("Rejected command from unauthorized sender {}", sender_id);
            Access::Denied
        }
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}
