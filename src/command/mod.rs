//! Slash-command handling: parse, dispatch, render.

mod dispatcher;
mod parser;
mod pipeline;
mod reply;

pub use dispatcher::{Dispatcher, Outcome};
pub use parser::{Command, CommandKind, CommandValidator, ValidationError, is_command};
pub use pipeline::{CommandPipeline, InboundCommand};
pub use reply::{HELP_TEXT, ReplyRenderer, UNKNOWN_COMMAND_TEXT};
