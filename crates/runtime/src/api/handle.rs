//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! casting skills, reading snapshots or streaming events from specific topics.
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};

use battle_core::{ActorId, AppliedEffect, BattleStateView, SkillCatalog, Tick};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    catalog: Arc<SkillCatalog>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        catalog: Arc<SkillCatalog>,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            catalog,
        }
    }

    /// Cast `skill` (a catalog key such as `"fireball"`) for `actor` now.
    ///
    /// Rejections come back as [`RuntimeError::CastRejected`] and are also
    /// published as [`Event::CastRejected`].
    pub async fn cast_skill(
        &self,
        actor: ActorId,
        skill: impl Into<String>,
    ) -> Result<AppliedEffect> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.send(Command::Cast {
            actor,
            skill: skill.into(),
            reply: reply_tx,
        })
        .await?;

        let applied = reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)??;
        Ok(applied)
    }

    /// Start a fresh match.
    pub async fn reset(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Reset { reply: reply_tx }).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Up-to-date view of the match; due effects fire first.
    pub async fn snapshot(&self) -> Result<BattleStateView> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Snapshot { reply: reply_tx }).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Fire every effect due by the current clock reading.
    ///
    /// Returns how many scheduled effects fired.
    pub async fn tick(&self) -> Result<usize> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Tick {
            reply: Some(reply_tx),
        })
        .await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Move the runtime's manual clock to `now` and fire what became due.
    ///
    /// Fails with [`RuntimeError::ManualClockRequired`] on a monotonic clock.
    pub async fn advance(&self, now: Tick) -> Result<usize> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Advance {
            now,
            reply: reply_tx,
        })
        .await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Skill catalog the match was built with.
    pub fn catalog(&self) -> &Arc<SkillCatalog> {
        &self.catalog
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Battle` - casts, landed effects, buffs, rejections, match lifecycle
    /// - `Topic::Lock` - lock rebates and releases
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get direct access to the event bus
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }
}
