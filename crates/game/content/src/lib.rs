//! Data-driven battle content and loaders.
//!
//! This crate houses the stock battle content and provides loaders for
//! RON/TOML data files:
//! - Skill catalog (data-driven via RON)
//! - Battle rules (data-driven via TOML)
//!
//! All loaders use battle-core types directly with serde for deserialization
//! and run the same validation the engine does.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, SkillFile, SkillLoader};
