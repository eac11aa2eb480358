//! Shared bootstrap utilities for client front-ends.
//!
//! Provides configuration loading, content resolution, and runtime setup that
//! can be reused by the CLI or any other front-end crate.
pub mod builder;
pub mod config;
pub mod content;

pub use builder::{RuntimeBuilder, RuntimeSetup};
pub use config::{ChannelConfig, ClientConfig, ContentPaths};
pub use content::{BattleContent, load_content};
