//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use battle_core::BattleEvent;

use super::types::CastRejected;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Casts, landed effects, buffs and match lifecycle
    Battle,
    /// Shared action lock rebates and releases
    Lock,
}

impl Topic {
    pub const ALL: [Topic; 2] = [Topic::Battle, Topic::Lock];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Battle(BattleEvent),
    Lock(BattleEvent),
    CastRejected(CastRejected),
}

impl Event {
    /// Wraps an engine event, routing lock events to [`Topic::Lock`].
    pub fn from_battle(event: BattleEvent) -> Self {
        if event.is_lock_event() {
            Event::Lock(event)
        } else {
            Event::Battle(event)
        }
    }

    pub fn topic(&self) -> Topic {
        match self {
            Event::Battle(_) | Event::CastRejected(_) => Topic::Battle,
            Event::Lock(_) => Topic::Lock,
        }
    }

    /// The engine event carried by this wrapper, if any.
    pub fn battle_event(&self) -> Option<&BattleEvent> {
        match self {
            Event::Battle(event) | Event::Lock(event) => Some(event),
            Event::CastRejected(_) => None,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Every topic channel is created up front, so the
/// map is never mutated after construction.
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity.max(1)).0))
            .collect();

        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if let Some(tx) = self.channels.get(&topic)
            && tx.send(event).is_err()
        {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        match self.channels.get(&topic) {
            Some(tx) => tx.subscribe(),
            // Unreachable while `with_capacity` covers `Topic::ALL`; a
            // dangling receiver keeps the signature infallible.
            None => broadcast::channel(1).1,
        }
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    /// Number of live receivers on `topic`.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.channels
            .get(&topic)
            .map_or(0, broadcast::Sender::receiver_count)
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
