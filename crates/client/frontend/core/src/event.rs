//! Utilities for reacting to runtime events inside UI layers.
use battle_core::BattleEvent;
use runtime::Event;

use crate::config::EventVisibility;
use crate::format::{describe_rejection, format_event};
use crate::message::{MessageEntry, MessageLevel, MessageLog};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventImpact {
    pub requires_redraw: bool,
}

impl EventImpact {
    pub const fn none() -> Self {
        Self {
            requires_redraw: false,
        }
    }

    pub const fn redraw() -> Self {
        Self {
            requires_redraw: true,
        }
    }

    pub fn combine(self, other: Self) -> Self {
        Self {
            requires_redraw: self.requires_redraw || other.requires_redraw,
        }
    }
}

pub trait EventConsumer {
    fn on_event(&mut self, event: &Event) -> EventImpact;
    fn message_log(&self) -> &MessageLog;
    fn message_log_mut(&mut self) -> &mut MessageLog;
    fn take_message_log(self) -> MessageLog
    where
        Self: Sized;
}

/// Turns runtime events into log messages, honoring visibility settings.
#[derive(Clone, Debug)]
pub struct MessageConsumer {
    log: MessageLog,
    visibility: EventVisibility,
}

impl MessageConsumer {
    pub fn new(capacity: usize, visibility: EventVisibility) -> Self {
        Self {
            log: MessageLog::new(capacity),
            visibility,
        }
    }
}

impl EventConsumer for MessageConsumer {
    fn on_event(&mut self, event: &Event) -> EventImpact {
        match event {
            Event::Battle(battle) | Event::Lock(battle) => {
                let shown = format_event(battle, &self.visibility);
                let lifecycle = matches!(
                    battle,
                    BattleEvent::GameOver { .. } | BattleEvent::MatchReset { .. }
                );
                let level = if matches!(battle, BattleEvent::GameOver { .. }) {
                    MessageLevel::Warning
                } else {
                    MessageLevel::Info
                };

                let logged = shown.is_some();
                if let Some(text) = shown {
                    self.log
                        .push(MessageEntry::new(text, Some(battle.at()), level));
                }

                if logged || lifecycle || battle.changes_health() {
                    EventImpact::redraw()
                } else {
                    EventImpact::none()
                }
            }
            Event::CastRejected(rejected) => {
                self.log.push(MessageEntry::new(
                    describe_rejection(rejected),
                    Some(rejected.at),
                    MessageLevel::Warning,
                ));
                EventImpact::redraw()
            }
        }
    }

    fn message_log(&self) -> &MessageLog {
        &self.log
    }

    fn message_log_mut(&mut self) -> &mut MessageLog {
        &mut self.log
    }

    fn take_message_log(self) -> MessageLog {
        self.log
    }
}
