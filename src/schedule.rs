use itertools::Itertools;
use tracing::{debug, trace};

use crate::flow::Path;
use crate::room::RoomId;
use crate::solver::SolveError;

/// A path together with the number of ants which will set out along it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathInfo {
    pub(crate) rooms: Path,
    pub(crate) length: usize,
    pub(crate) capacity: usize,
}

impl PathInfo {
    pub(crate) fn new(rooms: Path) -> Self {
        Self {
            length: rooms.len().saturating_sub(1),
            rooms,
            capacity: 0,
        }
    }

    /// Rooms from start to end.
    pub fn rooms(&self) -> &[RoomId] {
        &self.rooms
    }

    /// Number of tunnels traveled, i.e. the turns a lone ant needs to cross.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of ants assigned to this path.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Ants that can finish along this path within `turns` turns, departing one per turn.
    ///
    /// The `k`th ant to depart arrives on turn `k - 1 + length`.
    pub(crate) fn throughput(&self, turns: usize) -> usize {
        turns.checked_sub(self.length).map_or(0, |spare| spare.saturating_add(1))
    }
}

/// The minimum number of turns to move every ant, and how many ants take each path to do so.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Schedule {
    pub(crate) turns: usize,
    // shortest first
    pub(crate) paths: Vec<PathInfo>,
}

/// Give each path, shortest first, as many of the `ants` as it can finish within `turns`.
///
/// Returns the allocation if every ant found a place, `None` otherwise. `paths` is left untouched.
pub(crate) fn allocate(paths: &[PathInfo], ants: usize, turns: usize) -> Option<Vec<PathInfo>> {
    let mut remaining = ants;
    let allocation = paths.iter()
        .map(|path| {
            let capacity = remaining.min(path.throughput(turns));
            remaining -= capacity;
            PathInfo { capacity, ..path.clone() }
        })
        .collect_vec();

    (remaining == 0).then_some(allocation)
}

impl Schedule {
    /// Binary search the fewest turns in which `paths` can carry `ants` ants.
    ///
    /// Whether a turn count is enough only ever goes from no to yes as the count grows,
    /// and sending every ant down the shortest path bounds the search from above.
    pub(crate) fn plan(paths: Vec<Path>, ants: usize) -> Result<Self, SolveError> {
        let paths = paths.into_iter()
            .map(PathInfo::new)
            .sorted_by_key(PathInfo::length)
            .collect_vec();
        let shortest = paths.first().ok_or(SolveError::NoAugmentingPath)?.length;

        let upper_bound = ants.checked_add(shortest.saturating_sub(1))
            .ok_or(SolveError::TurnCountOverflow { ants })?;
        let (mut low, mut high) = (1, upper_bound);
        let mut best = None;

        while low <= high {
            let turns = low + (high - low) / 2;
            match allocate(&paths, ants, turns) {
                Some(allocation) => {
                    trace!(turns, "feasible");
                    best = Some(Self { turns, paths: allocation });
                    high = turns - 1;
                }
                None => {
                    trace!(turns, "infeasible");
                    low = turns + 1;
                }
            }
        }

        let schedule = best.ok_or(SolveError::NoFeasibleTurnCount { ants, upper_bound })?;
        debug!(
            turns = schedule.turns,
            allocation = ?schedule.paths.iter().map(PathInfo::capacity).collect_vec(),
            "planned schedule"
        );

        Ok(schedule)
    }

    /// Number of turns the plan needs.
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Paths in ascending length order, each with its allocated ant count.
    pub fn paths(&self) -> &[PathInfo] {
        &self.paths
    }
}
