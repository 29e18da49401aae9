use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use petgraph::graphmap::UnGraphMap;

use crate::room::{Room, RoomId};
use crate::schedule::PathInfo;
use crate::solver::{FarmSolver, Solution, SolveError};

/// A tunnel between two rooms.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) struct Tunnel {
    // endpoints in the order the link was written, `from-to`
    pub(crate) from: RoomId,
    pub(crate) to: RoomId,
}

/// A validated ant farm: rooms, tunnels, a start room, an end room and the number of ants to move.
///
/// [`Farm`]s should be built with a [`FarmBuilder`](crate::builder::FarmBuilder) or read from text with [`parse_farm`](crate::parse_farm).
/// Once built, a farm never changes.
///
/// Neighbor and tunnel iteration follows declaration order, which is what makes [`Self::solve`] reproducible.
#[derive(Clone, Debug)]
pub struct Farm {
    pub(crate) rooms: Vec<Room>,
    pub(crate) room_ids: HashMap<String, RoomId>,
    pub(crate) graph: UnGraphMap<RoomId, Tunnel>,
    pub(crate) start: RoomId,
    pub(crate) end: RoomId,
    pub(crate) ants: usize,
}

impl Farm {
    /// Number of ants waiting in the start room.
    pub fn ants(&self) -> usize {
        self.ants
    }

    /// The start room.
    pub fn start(&self) -> RoomId {
        self.start
    }

    /// The end room.
    pub fn end(&self) -> RoomId {
        self.end
    }

    /// All rooms, indexed by [`RoomId`].
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Look up a room by id.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// Look up a room id by name.
    pub fn room_id(&self, name: &str) -> Option<RoomId> {
        self.room_ids.get(name).copied()
    }

    /// Name of the room `id`. Every id handed out by this farm is valid, so this panics only on a foreign id.
    pub(crate) fn name_of(&self, id: RoomId) -> &str {
        self.rooms[id].name()
    }

    /// Rooms joined to `id` by a tunnel, in the order those tunnels were declared.
    pub fn neighbors(&self, id: RoomId) -> impl Iterator<Item = RoomId> + '_ {
        self.graph.neighbors(id)
    }

    /// Whether a tunnel joins `a` and `b`, in either direction.
    pub fn is_adjacent(&self, a: RoomId, b: RoomId) -> bool {
        self.graph.contains_edge(a, b)
    }

    /// Every tunnel as `(from, to)` in declaration order.
    pub fn tunnels(&self) -> impl Iterator<Item = (RoomId, RoomId)> + '_ {
        self.graph.all_edges().map(|(_, _, tunnel)| (tunnel.from, tunnel.to))
    }

    /// Render the rooms of `path` as `a -> b -> c`.
    pub fn describe_path(&self, path: &PathInfo) -> String {
        path.rooms().iter().map(|id| self.name_of(*id)).join(" -> ")
    }

    /// Find the fewest turns needed to move every ant from start to end, and the moves that achieve it.
    ///
    /// Defers to [`FarmSolver`]; see [`FarmSolver::solve`] for the failure cases.
    pub fn solve(&self) -> Result<Solution, SolveError> {
        FarmSolver::from(self).solve()
    }
}

impl Display for Farm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.ants)?;
        for room in &self.rooms {
            if let Some(directive) = room.role().directive() {
                writeln!(f, "{}", directive)?;
            }
            writeln!(f, "{} {}", room.name(), room.location())?;
        }
        for (from, to) in self.tunnels() {
            writeln!(f, "{}-{}", self.name_of(from), self.name_of(to))?;
        }

        Ok(())
    }
}
