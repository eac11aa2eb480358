//! Line-oriented console frontend for the battle.
//!
//! # Architecture
//!
//! CliFrontend is a pure UI layer that:
//! - Receives a RuntimeHandle for communication
//! - Does NOT own the Runtime
//! - Subscribes to events and submits casts via the handle

mod app;
mod command;
mod config;
pub mod logging;
pub mod render;

pub use app::CliFrontend;
pub use command::{CliCommand, ParseError};
pub use config::CliConfig;

// Re-export for convenience (used in main.rs)
pub use client_frontend_core::FrontendConfig;
