pub mod cli;
pub mod config;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use router::create_router;
pub use state::ServerState;

#[cfg(test)]
mod api_tests;
