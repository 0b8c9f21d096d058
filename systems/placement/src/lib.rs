#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Placement index tracking the live countdown of every registered spawner.
//!
//! The index is owned by the tick context. Other threads never touch it
//! directly; they submit [`PlacementRequest`]s through a [`PlacementSender`]
//! and the owner drains the [`PlacementInbox`] before each pass.

use std::collections::BTreeMap;

use crossbeam_channel::{Receiver, Sender};
use custom_spawners_core::{BlockCoord, Event, DEFAULT_DELAY_TICKS};

/// Countdown table keyed by block coordinate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementIndex {
    countdowns: BTreeMap<BlockCoord, i32>,
    default_delay: i32,
}

impl Default for PlacementIndex {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY_TICKS)
    }
}

impl PlacementIndex {
    /// Creates an empty index that substitutes `default_delay` for non-positive countdowns.
    #[must_use]
    pub fn new(default_delay: i32) -> Self {
        Self {
            countdowns: BTreeMap::new(),
            default_delay: if default_delay > 0 {
                default_delay
            } else {
                DEFAULT_DELAY_TICKS
            },
        }
    }

    /// Delay used when a registration carries a non-positive countdown.
    #[must_use]
    pub const fn default_delay(&self) -> i32 {
        self.default_delay
    }

    /// Registers or re-arms a placement. Returns the countdown that was stored.
    pub fn register(&mut self, coord: BlockCoord, countdown: i32) -> i32 {
        let countdown = if countdown > 0 {
            countdown
        } else {
            self.default_delay
        };
        let _ = self.countdowns.insert(coord, countdown);
        countdown
    }

    /// Removes a placement. Returns `false` when it was not registered.
    pub fn unregister(&mut self, coord: &BlockCoord) -> bool {
        self.countdowns.remove(coord).is_some()
    }

    /// Reports whether a placement exists at the coordinate.
    #[must_use]
    pub fn is_registered(&self, coord: &BlockCoord) -> bool {
        self.countdowns.contains_key(coord)
    }

    /// Remaining ticks of the placement, if registered.
    #[must_use]
    pub fn countdown(&self, coord: &BlockCoord) -> Option<i32> {
        self.countdowns.get(coord).copied()
    }

    /// Overwrites the countdown of an existing placement without the positivity fallback.
    ///
    /// Returns `false` when the coordinate is not registered.
    pub fn store_countdown(&mut self, coord: &BlockCoord, countdown: i32) -> bool {
        match self.countdowns.get_mut(coord) {
            Some(slot) => {
                *slot = countdown;
                true
            }
            None => false,
        }
    }

    /// Iterates over every placement in coordinate order.
    pub fn all(&self) -> impl Iterator<Item = (&BlockCoord, i32)> {
        self.countdowns.iter().map(|(coord, countdown)| (coord, *countdown))
    }

    /// Snapshot of the registered coordinates in coordinate order.
    #[must_use]
    pub fn coords(&self) -> Vec<BlockCoord> {
        self.countdowns.keys().cloned().collect()
    }

    /// Number of registered placements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.countdowns.len()
    }

    /// Reports whether no placement is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.countdowns.is_empty()
    }

    /// Drops every placement.
    pub fn clear(&mut self) {
        self.countdowns.clear();
    }

    /// Executes a queued request and reports the resulting event.
    pub fn apply(&mut self, request: PlacementRequest, out_events: &mut Vec<Event>) {
        match request {
            PlacementRequest::Register { coord, countdown } => {
                let countdown = self.register(coord.clone(), countdown);
                out_events.push(Event::PlacementArmed { coord, countdown });
            }
            PlacementRequest::Unregister { coord } => {
                if self.unregister(&coord) {
                    out_events.push(Event::PlacementDisarmed { coord });
                }
            }
        }
    }
}

/// Mutation submitted from outside the tick context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlacementRequest {
    /// Registers or re-arms a placement.
    Register {
        /// Coordinate of the spawner block.
        coord: BlockCoord,
        /// Initial countdown in ticks.
        countdown: i32,
    },
    /// Removes a placement.
    Unregister {
        /// Coordinate of the spawner block.
        coord: BlockCoord,
    },
}

/// Cloneable handle used by event threads to queue placement requests.
#[derive(Clone, Debug)]
pub struct PlacementSender {
    tx: Sender<PlacementRequest>,
}

impl PlacementSender {
    /// Queues a registration. Returns `false` if the inbox no longer exists.
    pub fn register(&self, coord: BlockCoord, countdown: i32) -> bool {
        self.send(PlacementRequest::Register { coord, countdown })
    }

    /// Queues a removal. Returns `false` if the inbox no longer exists.
    pub fn unregister(&self, coord: BlockCoord) -> bool {
        self.send(PlacementRequest::Unregister { coord })
    }

    fn send(&self, request: PlacementRequest) -> bool {
        match self.tx.send(request) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(request = ?error.into_inner(), "placement inbox is closed");
                false
            }
        }
    }
}

/// Receiving end of the placement queue, owned by the tick context.
#[derive(Debug)]
pub struct PlacementInbox {
    tx: Sender<PlacementRequest>,
    rx: Receiver<PlacementRequest>,
}

impl Default for PlacementInbox {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementInbox {
    /// Creates an empty unbounded inbox.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    /// Returns a new sender feeding this inbox.
    #[must_use]
    pub fn sender(&self) -> PlacementSender {
        PlacementSender {
            tx: self.tx.clone(),
        }
    }

    /// Applies every queued request to `index` in submission order.
    ///
    /// Returns the number of requests processed.
    pub fn drain_into(&self, index: &mut PlacementIndex, out_events: &mut Vec<Event>) -> usize {
        let mut processed = 0;
        for request in self.rx.try_iter() {
            index.apply(request, out_events);
            processed += 1;
        }
        processed
    }

    /// Discards every queued request without applying it.
    pub fn discard(&self) -> usize {
        self.rx.try_iter().count()
    }

    /// Number of requests waiting to be drained.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}
