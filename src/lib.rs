#![warn(missing_docs)]

//! # `lemin`
//!
//! Moves a colony of ants across an ant farm in as few turns as possible.
//! Begin by reading a farm with [`parse_farm`] or assembling one with a [`FarmBuilder`](builder::FarmBuilder),
//! then call [`solve()`](crate::Farm::solve) and print [`Solution::lines`].
//!
//! A farm is a set of rooms joined by tunnels, with one start room and one end room.
//! Every turn, each ant may walk through one tunnel.
//! Only one ant may enter a given room per turn, except the end room, which takes any number.
//!
//! # Internals
//! Solving happens in three passes, each deterministic given the order rooms and tunnels were declared in.
//!
//! 1. Treat every tunnel as an arc of capacity 1 and run Edmonds-Karp from start to end.
//!    The resulting flow is split into edge-disjoint routes for the ants, one per unit of flow.
//! 2. A route of length `L` can finish `T - L + 1` ants within `T` turns, sending one per turn.
//!    Binary search the smallest `T` for which the routes, filled shortest first, hold every ant.
//! 3. Simulate the turns: ants underway step forward, then each route with ants left to send admits one.
//!    The moves of each turn, sorted, form one line of the move log.
//!
//! ```
//! let farm = lemin::parse_farm("3\n##start\ns 0 0\nm 1 0\n##end\ne 2 0\ns-m\nm-e\n").unwrap();
//! let solution = farm.solve().unwrap();
//! assert_eq!(solution.lines(), ["L1-m", "L1-e L2-m", "L2-e L3-m", "L3-e"]);
//! ```

pub use builder::{BuilderInvalidReason, FarmBuilder, MAX_ANTS};
pub use farm::Farm;
pub use flow::Path;
pub use location::Location;
pub use parser::{parse_farm, ParseError};
pub use room::{AntId, Role, Room, RoomId};
pub use schedule::{PathInfo, Schedule};
pub use simulate::{Move, Turn};
pub use solver::{FarmSolver, Solution, SolveError};

pub(crate) mod farm;
pub(crate) mod flow;
pub(crate) mod location;
pub(crate) mod room;
pub(crate) mod schedule;
pub(crate) mod simulate;
pub mod builder;
pub mod parser;
pub(crate) mod solver;
#[cfg(feature = "wasm")]
pub(crate) mod wasm;
