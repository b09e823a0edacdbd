//! Mode routing
//!
//! - Server mode (webhook + redirect HTTP server)
//! - CLI mode (webhook registration, config helpers)

pub mod cli;
pub mod server;

pub use cli::run_cli;
pub use server::run_server;
