//! HTML template rendering handlers for the demo UI.

mod home;
mod short;

pub use home::home_handler;
pub use short::short_handler;
