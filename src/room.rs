use strum::{Display, EnumString};

use crate::location::Location;

/// Index of a room in declaration order. Dense, starting at 0.
pub type RoomId = usize;
/// Ant number as printed in the move log. Dense, starting at 1.
pub type AntId = usize;

/// The part a room plays in the farm.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Role {
    /// Every ant begins here.
    Start,
    /// Every ant must finish here. Holds any number of ants at once.
    End,
    #[default]
    /// Any other room; holds a single ant entering per turn.
    Interior,
}

/// Farm file commands which mark the role of the room declared on the following line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Display, EnumString)]
pub enum Directive {
    /// `##start`
    #[strum(to_string = "##start")]
    Start,
    /// `##end`
    #[strum(to_string = "##end")]
    End,
}

impl From<Directive> for Role {
    fn from(value: Directive) -> Self {
        match value {
            Directive::Start => Role::Start,
            Directive::End => Role::End,
        }
    }
}

impl Role {
    pub(crate) fn directive(&self) -> Option<Directive> {
        match self {
            Role::Start => Some(Directive::Start),
            Role::End => Some(Directive::End),
            Role::Interior => None,
        }
    }
}

/// A room (node) of the farm.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Room {
    pub(crate) name: String,
    pub(crate) location: Location,
    pub(crate) role: Role,
}

impl Room {
    /// The room name, as it appears in the move log.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position metadata from the farm description.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Whether this is the start room, the end room, or neither.
    pub fn role(&self) -> Role {
        self.role
    }
}
