use std::fmt::{Display, Formatter};

type Coord = i64;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug, Default)]
/// The `(x, y)` position a room was given in the farm description.
///
/// Only carried through for display and duplicate detection; no path or scheduling logic looks at it.
pub struct Location(pub Coord, pub Coord);

impl From<(Coord, Coord)> for Location {
    fn from(value: (Coord, Coord)) -> Self {
        Self(value.0, value.1)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.1)
    }
}
