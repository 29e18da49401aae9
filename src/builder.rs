use std::collections::{HashMap, HashSet};

use petgraph::algo::has_path_connecting;
use petgraph::graphmap::UnGraphMap;
use unordered_pair::UnorderedPair;

use crate::farm::{Farm, Tunnel};
use crate::location::Location;
use crate::room::{Role, Room, RoomId};

/// The most ants a farm may hold.
pub const MAX_ANTS: usize = 1_000_000;

/// Reasons a builder may become invalid while building.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum BuilderInvalidReason {
    /// The farm was given no ants to move.
    #[error("invalid number of ants")]
    NoAnts,
    /// The farm was given more than [`MAX_ANTS`] ants.
    #[error("invalid number of ants, at most {} allowed", MAX_ANTS)]
    TooManyAnts(usize),
    /// Room names must be non-empty, must not begin with `L` or `#`, and must not contain `-` or whitespace.
    #[error("invalid room name {0:?}")]
    InvalidRoomName(String),
    /// A room with this name was already added.
    #[error("duplicate room {0}")]
    DuplicateRoom(String),
    /// This room was placed at the coordinates of a room added earlier.
    #[error("room {0} reuses the coordinates of another room")]
    DuplicateCoordinates(String),
    /// A second room was marked as the start.
    #[error("multiple start rooms")]
    MultipleStart,
    /// A second room was marked as the end.
    #[error("multiple end rooms")]
    MultipleEnd,
    /// No room was marked as the start.
    #[error("no start room found")]
    MissingStart,
    /// No room was marked as the end.
    #[error("no end room found")]
    MissingEnd,
    /// A tunnel was declared from a room to itself.
    #[error("room {0} cannot link to itself")]
    SelfLink(String),
    /// A tunnel names a room which was never added.
    #[error("link to unknown room {0}")]
    UnknownRoom(String),
    /// A tunnel between these two rooms already exists, in either direction.
    #[error("duplicate link {0}-{1}")]
    DuplicateTunnel(String, String),
    /// The start and end rooms are not connected by any sequence of tunnels.
    #[error("no path exists between start and end rooms")]
    NoPath,
}

/// A builder for [`Farm`]s.
///
/// Rooms are numbered in the order they are added, and tunnels remember the order and orientation in which they were declared.
/// Both orders carry through to the built farm, so two builders fed the same calls produce farms that solve identically.
///
/// The first problem encountered is recorded and every later call does nothing; check [`Self::is_valid`] or the result of [`Self::build`].
/// Builders can be [`Clone`]d to save their state at some point.
#[derive(Clone, Default)]
pub struct FarmBuilder {
    ants: usize,
    rooms: Vec<Room>,
    room_ids: HashMap<String, RoomId>,
    locations: HashSet<Location>,
    tunnels: Vec<Tunnel>,
    // both orientations of a link map to the same pair
    tunnel_pairs: HashSet<UnorderedPair<RoomId>>,
    start: Option<RoomId>,
    end: Option<RoomId>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

fn is_valid_room_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('L')
        && !name.starts_with('#')
        && !name.contains('-')
        && !name.contains(char::is_whitespace)
}

impl FarmBuilder {
    /// Construct a new builder for a farm moving `ants` ants.
    ///
    /// Enters a [`NoAnts`](BuilderInvalidReason::NoAnts) invalid state immediately if `ants` is zero,
    /// or [`TooManyAnts`](BuilderInvalidReason::TooManyAnts) if it exceeds [`MAX_ANTS`].
    pub fn with_ants(ants: usize) -> Self {
        let mut builder = Self {
            ants,
            ..Default::default()
        };
        if ants == 0 {
            builder.invalid_reasons.push(BuilderInvalidReason::NoAnts);
        } else if ants > MAX_ANTS {
            builder.invalid_reasons.push(BuilderInvalidReason::TooManyAnts(ants));
        }

        builder
    }

    /// Add a room named `name` at `location`.
    ///
    /// May cause the builder to enter an invalid state if the name is malformed or taken, the location is taken,
    /// or `role` asks for a second start or end room.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_room(&mut self, name: &str, location: Location, role: Role) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let reason = if !is_valid_room_name(name) {
            Some(BuilderInvalidReason::InvalidRoomName(name.to_owned()))
        } else if self.room_ids.contains_key(name) {
            Some(BuilderInvalidReason::DuplicateRoom(name.to_owned()))
        } else if self.locations.contains(&location) {
            Some(BuilderInvalidReason::DuplicateCoordinates(name.to_owned()))
        } else {
            match role {
                Role::Start if self.start.is_some() => Some(BuilderInvalidReason::MultipleStart),
                Role::End if self.end.is_some() => Some(BuilderInvalidReason::MultipleEnd),
                _ => None,
            }
        };
        if let Some(reason) = reason {
            self.invalid_reasons.push(reason);
            return self;
        }

        let id = self.rooms.len();
        match role {
            Role::Start => self.start = Some(id),
            Role::End => self.end = Some(id),
            Role::Interior => {}
        }
        self.room_ids.insert(name.to_owned(), id);
        self.locations.insert(location);
        self.rooms.push(Room {
            name: name.to_owned(),
            location,
            role,
        });

        self
    }

    /// Join the rooms named `from` and `to` with a tunnel.
    ///
    /// The orientation decides which way flow may first be pushed through the tunnel; see [`FarmSolver`](crate::solver::FarmSolver).
    /// May cause the builder to enter an invalid state if either room is unknown, the rooms are the same,
    /// or the two rooms are already joined.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_tunnel(&mut self, from: &str, to: &str) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if from == to {
            self.invalid_reasons.push(BuilderInvalidReason::SelfLink(from.to_owned()));
            return self;
        }

        let ids = [from, to].map(|name| self.room_ids.get(name).copied().ok_or(name));
        let (from_id, to_id) = match ids {
            [Ok(from_id), Ok(to_id)] => (from_id, to_id),
            [Err(unknown), _] | [_, Err(unknown)] => {
                self.invalid_reasons.push(BuilderInvalidReason::UnknownRoom(unknown.to_owned()));
                return self;
            }
        };

        if !self.tunnel_pairs.insert(UnorderedPair(from_id, to_id)) {
            self.invalid_reasons.push(BuilderInvalidReason::DuplicateTunnel(from.to_owned(), to.to_owned()));
            return self;
        }

        self.tunnels.push(Tunnel { from: from_id, to: to_id });
        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen so far.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    /// Conditions only detectable once everything is added (a missing start or end, no connection between them) are reported by [`Self::build`].
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Farm`].
    /// If the builder is invalid for any reason, a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Farm, Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(self.invalid_reasons.clone());
        }

        let (start, end) = match (self.start, self.end) {
            (Some(start), Some(end)) => (start, end),
            (None, _) => return Err(vec![BuilderInvalidReason::MissingStart]),
            (_, None) => return Err(vec![BuilderInvalidReason::MissingEnd]),
        };

        let mut graph = UnGraphMap::with_capacity(self.rooms.len(), self.tunnels.len());
        for id in 0..self.rooms.len() {
            graph.add_node(id);
        }
        for tunnel in &self.tunnels {
            graph.add_edge(tunnel.from, tunnel.to, *tunnel);
        }

        if !has_path_connecting(&graph, start, end, None) {
            return Err(vec![BuilderInvalidReason::NoPath]);
        }

        Ok(Farm {
            rooms: self.rooms.clone(),
            room_ids: self.room_ids.clone(),
            graph,
            start,
            end,
            ants: self.ants,
        })
    }
}
