use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use tracing::{debug, warn};

use crate::farm::Farm;
use crate::room::{AntId, RoomId};
use crate::schedule::Schedule;
use crate::solver::SolveError;

const ANT_TAG: char = 'L';

/// One ant entering one room.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    pub(crate) ant: AntId,
    pub(crate) room: String,
}

impl Move {
    /// The ant that moved.
    pub fn ant(&self) -> AntId {
        self.ant
    }

    /// The room it entered.
    pub fn room(&self) -> &str {
        &self.room
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}-{}", ANT_TAG, self.ant, self.room)
    }
}

/// Every move made during one turn, ordered by their rendered text.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Turn(pub(crate) Vec<Move>);

impl Turn {
    /// The moves of this turn.
    pub fn moves(&self) -> &[Move] {
        &self.0
    }
}

impl Display for Turn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

#[derive(Clone, Copy, Debug)]
struct Ant {
    path: usize,
    // index into the path's rooms
    position: usize,
}

/// Walk every ant from start to end along the paths of `schedule`, one turn at a time.
///
/// A room other than the end holds at most one ant at a time, and no two ants enter it in the same turn.
/// Each turn, ants already underway step forward in ant order; an ant whose next room is held waits,
/// unless the ant holding it moves on later in the same turn. Then each path with ants left to send admits one, if its first room is free.
///
/// Returns [`SolveError::SimulationStalled`] if ants remain but none of them can move.
pub(crate) fn simulate(farm: &Farm, schedule: &Schedule) -> Result<Vec<Turn>, SolveError> {
    let paths = schedule.paths();
    let end = farm.end();
    let mut to_send = paths.iter().map(|path| path.capacity()).collect_vec();
    // ant n is at index n - 1
    let mut ants: Vec<Ant> = Vec::new();
    let mut turns = Vec::new();

    let room_of = |ant: &Ant| paths.get(ant.path).and_then(|path| path.rooms().get(ant.position)).copied();
    let next_of = |ant: &Ant| paths.get(ant.path).and_then(|path| path.rooms().get(ant.position + 1)).copied();

    let mut turn = 0;
    while to_send.iter().any(|left| *left > 0) || ants.iter().any(|ant| next_of(ant).is_some()) {
        turn += 1;

        // rooms held by ants underway, updated as they move
        let mut occupied: HashSet<RoomId> = ants.iter()
            .filter(|ant| next_of(*ant).is_some())
            .filter_map(room_of)
            .collect();
        let mut moved = vec![false; ants.len()];
        let mut moves = Vec::new();

        loop {
            let mut progressed = false;
            for (index, ant) in ants.iter_mut().enumerate() {
                let (Some(here), Some(next)) = (room_of(&*ant), next_of(&*ant)) else {
                    continue;
                };
                if moved[index] || (next != end && occupied.contains(&next)) {
                    continue;
                }

                occupied.remove(&here);
                if next != end {
                    occupied.insert(next);
                }
                ant.position += 1;
                moved[index] = true;
                progressed = true;
                moves.push(Move { ant: index + 1, room: farm.name_of(next).to_owned() });
            }
            if !progressed {
                break;
            }
        }

        for (path_index, (path, left)) in paths.iter().zip(to_send.iter_mut()).enumerate() {
            let Some(&first) = path.rooms().get(1) else {
                continue;
            };
            if *left == 0 || (first != end && occupied.contains(&first)) {
                continue;
            }

            if first != end {
                occupied.insert(first);
            }
            *left -= 1;
            ants.push(Ant { path: path_index, position: 1 });
            moves.push(Move { ant: ants.len(), room: farm.name_of(first).to_owned() });
        }

        if moves.is_empty() {
            return Err(SolveError::SimulationStalled { turn });
        }
        moves.sort_by_cached_key(ToString::to_string);
        turns.push(Turn(moves));
    }

    if turn > schedule.turns() {
        warn!(scheduled = schedule.turns(), actual = turn, "ants were held up past the planned turn count");
    }
    debug!(turns = turns.len(), ants = ants.len(), "simulation finished");

    Ok(turns)
}
