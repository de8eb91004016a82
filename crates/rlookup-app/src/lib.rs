pub mod error;
pub mod handlers;
pub mod logging;
pub mod server;
pub mod state;

#[cfg(test)]
mod tests;

pub use server::{router, serve, shutdown_signal};
pub use state::AppState;
