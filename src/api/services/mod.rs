pub mod redirect;

pub use redirect::{LIVENESS_TEXT, RedirectService, redirect_routes};
