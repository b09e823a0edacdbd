//! Inbound command pipeline
//!
//! `gate → validator → dispatcher`, each stage a plain value. The pipeline
//! returns `None` only for a denied sender; everything else yields exactly one
//! [`Outcome`].

use tracing::debug;

use super::dispatcher::{Dispatcher, Outcome};
use super::parser::{CommandValidator, is_command};
use crate::auth::{Access, AuthorizationGate};

/// A text message as the pipeline sees it, transport details stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundCommand {
    pub sender_id: String,
    pub text: String,
}

impl InboundCommand {
    pub fn new(sender_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            text: text.into(),
        }
    }
}

pub struct CommandPipeline {
    gate: AuthorizationGate,
    validator: CommandValidator,
    dispatcher: Dispatcher,
}

impl CommandPipeline {
    pub fn new(gate: AuthorizationGate, validator: CommandValidator, dispatcher: Dispatcher) -> Self {
        Self {
            gate,
            validator,
            dispatcher,
        }
    }

    pub async fn handle(&self, inbound: &InboundCommand) -> Option<Outcome> {
        // 非命令文本不经过鉴权，直接提示用法
        if !is_command(&inbound.text) {
            debug!("Non-command text from {}", inbound.sender_id);
            return Some(Outcome::UnknownCommand);
        }

        if self.gate.check(&inbound.sender_id) == Access::Denied {
            return None;
        }

        match self.validator.validate(&inbound.text) {
            Ok(command) => Some(self.dispatcher.dispatch(command).await),
            Err(e) => {
                debug!("Rejected command from {}: {}", inbound.sender_id, e);
                Some(Outcome::ValidationFailed(e))
            }
        }
    }
}
