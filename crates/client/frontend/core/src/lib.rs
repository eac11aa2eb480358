//! Cross-frontend primitives for presenting a battle.
//!
//! Houses message logging, event formatting, and view-model types that the
//! CLI and any future graphical client can reuse.
pub mod config;
pub mod event;
pub mod format;
pub mod frontend;
pub mod message;
pub mod view_model;

pub use config::{ChannelConfig, EventVisibility, FrontendConfig, MessageConfig};
pub use event::{EventConsumer, EventImpact, MessageConsumer};
pub use format::{describe_event, describe_rejection, format_event};
pub use frontend::Frontend;
pub use message::{MessageEntry, MessageLevel, MessageLog};
pub use view_model::{ActorPanel, BattleViewModel};
