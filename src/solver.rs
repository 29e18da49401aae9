use crate::farm::Farm;
use crate::flow::edge_disjoint_paths;
use crate::schedule::{PathInfo, Schedule};
use crate::simulate::{simulate, Turn};

/// Reasons a [`FarmSolver`] may fail.
///
/// None of these can happen for a farm built by [`FarmBuilder`](crate::FarmBuilder) whose tunnels can carry flow from start to end.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SolveError {
    /// No augmenting path leads from start to end, so there is nothing to schedule.
    #[error("no augmenting path from start to end")]
    NoAugmentingPath,
    /// No turn count within the search range can move every ant.
    /// This should probably never happen.
    #[error("no turn count up to {upper_bound} moves {ants} ants")]
    NoFeasibleTurnCount {
        /// Ants to move.
        ants: usize,
        /// Largest turn count tried.
        upper_bound: usize,
    },
    /// The turn count search range does not fit in a `usize`.
    #[error("too many ants ({ants}) to plan turns for")]
    TurnCountOverflow {
        /// Ants to move.
        ants: usize,
    },
    /// Ants were left waiting on each other's rooms with none able to move.
    /// This should probably never happen.
    #[error("ants deadlocked on turn {turn}")]
    SimulationStalled {
        /// Turn on which no ant could move.
        turn: usize,
    },
}

/// A solved farm: the paths used, how many ants take each, and the moves made every turn.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Solution {
    pub(crate) schedule: Schedule,
    pub(crate) turns: Vec<Turn>,
}

impl Solution {
    /// Paths shortest first, each with the number of ants sent along it.
    pub fn paths(&self) -> &[PathInfo] {
        self.schedule.paths()
    }

    /// The fewest turns in which the ants can be moved, as planned before simulating.
    pub fn scheduled_turns(&self) -> usize {
        self.schedule.turns()
    }

    /// Every turn in which some ant moved, in order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The move log: one line per turn, each `L<ant>-<room>` separated by spaces.
    pub fn lines(&self) -> Vec<String> {
        self.turns.iter().map(ToString::to_string).collect()
    }
}

/// Solves a [`Farm`] in three passes.
///
/// 1. Edmonds-Karp finds the maximum flow from start to end, which is then split into edge-disjoint paths.
///    A tunnel declared as `a-b` initially carries flow only from `a` to `b`; the reverse opens once flow has been pushed forward.
/// 2. A binary search over turn counts finds the fewest turns those paths need to carry every ant, and how many ants each path takes.
/// 3. A turn by turn simulation sends the ants along their paths and records every move.
///
/// Every pass iterates rooms and tunnels in declaration order, so the same farm always yields the same move log.
pub struct FarmSolver<'a> {
    farm: &'a Farm,
}

impl<'a> From<&'a Farm> for FarmSolver<'a> {
    fn from(farm: &'a Farm) -> Self {
        Self { farm }
    }
}

impl FarmSolver<'_> {
    /// Run all three passes, returning [`Ok`] with the [`Solution`] or [`Err`] with a [`SolveError`] reason.
    pub fn solve(&self) -> Result<Solution, SolveError> {
        let paths = edge_disjoint_paths(self.farm);
        if paths.is_empty() {
            return Err(SolveError::NoAugmentingPath);
        }

        let schedule = Schedule::plan(paths, self.farm.ants())?;
        let turns = simulate(self.farm, &schedule)?;

        Ok(Solution { schedule, turns })
    }
}
