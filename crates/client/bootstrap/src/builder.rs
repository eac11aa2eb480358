//! Builds the runtime from client configuration and battle content.
use anyhow::Result;
use runtime::{ClockSource, Runtime};

use battle_core::BattleConfig;

use crate::config::ClientConfig;
use crate::content::load_content;

/// Builder that assembles battle content and configuration into a runtime.
pub struct RuntimeBuilder {
    config: ClientConfig,
    clock: Option<ClockSource>,
}

impl RuntimeBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            clock: None,
        }
    }

    /// Provide a custom clock (e.g., a manual clock for scripted sessions).
    pub fn clock(mut self, clock: impl Into<ClockSource>) -> Self {
        self.clock = Some(clock.into());
        self
    }

    pub async fn build(self) -> Result<RuntimeSetup> {
        let content = load_content(&self.config.content, self.config.lock_preset)?;
        tracing::info!(
            skills = content.catalog.len(),
            lock_ms = content.config.lock.duration.as_millis(),
            "battle content loaded"
        );

        let mut builder = Runtime::builder()
            .config(self.config.runtime_config(content.config.clone()))
            .catalog(content.catalog);

        if let Some(clock) = self.clock {
            builder = builder.clock(clock);
        }

        // Build the runtime
        let runtime = builder.build().await?;

        Ok(RuntimeSetup {
            config: self.config,
            battle: content.config,
            runtime,
        })
    }
}

pub struct RuntimeSetup {
    pub config: ClientConfig,
    pub battle: BattleConfig,
    pub runtime: Runtime,
}
