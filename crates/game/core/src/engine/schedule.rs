//! Deterministic timer queue.
//!
//! Entries are keyed by `(due, sequence)` so that firings come out in
//! non-decreasing time order and entries due at the same tick keep their
//! scheduling order. Every entry belongs to a [`TimerId`]; cancelling the
//! timer drops all of its outstanding firings, including future repeats.

use std::collections::BTreeMap;

use crate::state::Tick;

/// Identity of a one-shot or repeating timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Repeat {
    interval: Tick,
    /// `None` repeats until cancelled.
    total: Option<u32>,
}

#[derive(Clone, Debug)]
struct Entry<A> {
    timer: TimerId,
    action: A,
    repeat: Option<Repeat>,
    firing: u32,
}

/// A timer firing handed back by [`Scheduler::pop_due`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<A> {
    pub due: Tick,
    pub timer: TimerId,
    pub action: A,
    /// 1-based index of this firing within its timer.
    pub firing: u32,
    /// Total firings for bounded repeating timers.
    pub total: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct Scheduler<A> {
    queue: BTreeMap<(Tick, u64), Entry<A>>,
    next_seq: u64,
    next_timer: u64,
}

impl<A: Clone> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            queue: BTreeMap::new(),
            next_seq: 0,
            next_timer: 0,
        }
    }

    /// Schedules `action` to fire once at `due`.
    pub fn schedule_once(&mut self, due: Tick, action: A) -> TimerId {
        let timer = self.allocate_timer();
        self.insert(
            due,
            Entry {
                timer,
                action,
                repeat: None,
                firing: 1,
            },
        );
        timer
    }

    /// Schedules `action` at `first`, then every `interval`.
    ///
    /// With `count = Some(n)` the timer fires `n` times in total; with `None`
    /// it repeats until cancelled. A zero count schedules nothing.
    pub fn schedule_repeating(
        &mut self,
        first: Tick,
        interval: Tick,
        count: Option<u32>,
        action: A,
    ) -> TimerId {
        let timer = self.allocate_timer();
        if count == Some(0) {
            return timer;
        }

        self.insert(
            first,
            Entry {
                timer,
                action,
                repeat: Some(Repeat {
                    interval,
                    total: count,
                }),
                firing: 1,
            },
        );
        timer
    }

    /// Drops every outstanding firing of `timer`. Returns how many were removed.
    pub fn cancel(&mut self, timer: TimerId) -> usize {
        let before = self.queue.len();
        self.queue.retain(|_, entry| entry.timer != timer);
        before - self.queue.len()
    }

    pub fn cancel_all(&mut self) -> usize {
        let removed = self.queue.len();
        self.queue.clear();
        removed
    }

    /// Removes and returns the earliest entry due at or before `now`.
    ///
    /// Repeating timers are re-armed one interval after the firing's due
    /// time before this returns, so a caller draining in a loop sees the
    /// repeats that fall inside the same window.
    pub fn pop_due(&mut self, now: Tick) -> Option<Fired<A>> {
        let (&(due, _), _) = self.queue.first_key_value()?;
        if due > now {
            return None;
        }

        let (_, entry) = self.queue.pop_first()?;

        if let Some(repeat) = entry.repeat {
            let exhausted = repeat.total.is_some_and(|total| entry.firing >= total);
            if !exhausted
                && repeat.interval > Tick::ZERO
                && let Some(next) = due.checked_add(repeat.interval)
            {
                self.insert(
                    next,
                    Entry {
                        timer: entry.timer,
                        action: entry.action.clone(),
                        repeat: Some(repeat),
                        firing: entry.firing + 1,
                    },
                );
            }
        }

        Some(Fired {
            due,
            timer: entry.timer,
            action: entry.action,
            firing: entry.firing,
            total: entry.repeat.and_then(|repeat| repeat.total),
        })
    }

    pub fn next_due(&self) -> Option<Tick> {
        self.queue.first_key_value().map(|(&(due, _), _)| due)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn allocate_timer(&mut self) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        id
    }

    fn insert(&mut self, due: Tick, entry: Entry<A>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.insert((due, seq), entry);
    }
}

impl<A: Clone> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}
