use std::time::{Duration, Instant};

use crate::error::LoadError;
use crate::report::Direction;

/// Request lifecycle of one direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Requesting,
    /// The last page came back empty; stay quiet until `until`.
    Cooldown { until: Instant },
}

/// How a request ended, as seen by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Merged { has_more: bool },
    /// Nothing new arrived (empty page or only known actions).
    Empty { has_more: bool },
    Failed,
}

#[derive(Clone, Copy, Debug)]
struct Lane {
    state: RequestState,
    exhausted: bool,
}

impl Lane {
    fn new(has_more: bool) -> Self {
        Self {
            state: RequestState::Idle,
            exhausted: !has_more,
        }
    }
}

/// Decides when a page may be requested in each direction and tracks the
/// outstanding request. At most one request per direction is ever in flight.
#[derive(Clone, Debug)]
pub struct PaginationController {
    older: Lane,
    newer: Lane,
    cooldown: Duration,
    generation: u64,
    alive: bool,
}

impl PaginationController {
    pub fn new(cooldown: Duration, has_more_older: bool, has_more_newer: bool) -> Self {
        Self {
            older: Lane::new(has_more_older),
            newer: Lane::new(has_more_newer),
            cooldown,
            generation: 0,
            alive: true,
        }
    }

    fn lane(&self, direction: Direction) -> &Lane {
        match direction {
            Direction::Older => &self.older,
            Direction::Newer => &self.newer,
        }
    }

    fn lane_mut(&mut self, direction: Direction) -> &mut Lane {
        match direction {
            Direction::Older => &mut self.older,
            Direction::Newer => &mut self.newer,
        }
    }

    pub fn state(&self, direction: Direction) -> RequestState {
        self.lane(direction).state
    }

    pub fn is_requesting(&self, direction: Direction) -> bool {
        self.state(direction) == RequestState::Requesting
    }

    /// The source said there is nothing more on this side.
    pub fn is_exhausted(&self, direction: Direction) -> bool {
        self.lane(direction).exhausted
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Move `direction` from `Idle` to `Requesting` if allowed. Returns the
    /// generation the request must carry back with its result.
    pub fn try_begin(&mut self, direction: Direction, now: Instant) -> Option<u64> {
        if !self.alive {
            return None;
        }
        let generation = self.generation;
        let lane = self.lane_mut(direction);
        if lane.exhausted {
            return None;
        }
        match lane.state {
            RequestState::Requesting => {
                tracing::trace!("{} request already outstanding", direction.label());
                None
            }
            RequestState::Cooldown { until } if now < until => None,
            RequestState::Idle | RequestState::Cooldown { .. } => {
                lane.state = RequestState::Requesting;
                Some(generation)
            }
        }
    }

    /// Check that a resolution still belongs to a live request.
    pub fn accept(&self, direction: Direction, generation: u64) -> Result<(), LoadError> {
        if !self.alive || generation != self.generation || !self.is_requesting(direction) {
            return Err(LoadError::StaleTeardown);
        }
        Ok(())
    }

    pub fn finish(&mut self, direction: Direction, resolution: Resolution, now: Instant) {
        let cooldown = self.cooldown;
        let lane = self.lane_mut(direction);
        match resolution {
            Resolution::Merged { has_more } => {
                lane.state = RequestState::Idle;
                lane.exhausted = !has_more;
            }
            Resolution::Empty { has_more } => {
                lane.state = RequestState::Cooldown {
                    until: now + cooldown,
                };
                lane.exhausted = !has_more;
            }
            Resolution::Failed => {
                lane.state = RequestState::Idle;
            }
        }
    }

    /// Start over, e.g. when the list switches to another report. Anything
    /// still in flight becomes stale.
    pub fn reset(&mut self, has_more_older: bool, has_more_newer: bool) {
        self.generation += 1;
        self.older = Lane::new(has_more_older);
        self.newer = Lane::new(has_more_newer);
    }

    /// The list is gone. Every later resolution is discarded.
    pub fn teardown(&mut self) {
        self.alive = false;
    }
}
