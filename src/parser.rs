use std::str::FromStr;

use tracing::debug;

use crate::builder::{BuilderInvalidReason, FarmBuilder, MAX_ANTS};
use crate::farm::Farm;
use crate::location::Location;
use crate::room::{Directive, Role};

/// Reasons a farm description may be rejected by [`parse_farm`].
///
/// Line numbers are 1-based.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The description contained nothing but blank lines and comments.
    #[error("ERROR: invalid data format, empty file")]
    Empty,
    /// The first line was not an integer between 1 and [`MAX_ANTS`].
    #[error("ERROR: invalid data format, invalid number of ants")]
    InvalidAntCount {
        /// Where the ant count was expected.
        line: usize,
    },
    /// A room line did not read `name x y` with integer coordinates.
    #[error("ERROR: invalid data format, {reason} on line {line}")]
    InvalidRoom {
        /// The offending line.
        line: usize,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// A link line did not read `a-b`.
    #[error("ERROR: invalid data format, invalid link format on line {line}")]
    InvalidLink {
        /// The offending line.
        line: usize,
    },
    /// Rooms must all be declared before the first link.
    #[error("ERROR: invalid data format, room declared after links on line {line}")]
    RoomAfterLinks {
        /// The offending line.
        line: usize,
    },
    /// A `##start` or `##end` command was not followed by a room.
    #[error("ERROR: invalid data format, {directive} on line {line} is not followed by a room")]
    DanglingDirective {
        /// The command left without a room.
        directive: String,
        /// Where the command appeared.
        line: usize,
    },
    /// The rooms and links parsed, but do not describe a valid farm.
    #[error("ERROR: invalid data format, {reason}")]
    Invalid {
        /// The line that triggered the problem, if it can be pinned to one.
        line: Option<usize>,
        /// The problem.
        reason: BuilderInvalidReason,
    },
}

enum Line<'a> {
    Blank,
    Comment,
    Directive(Directive),
    Room { name: &'a str, x: &'a str, y: &'a str },
    Link(&'a str),
}

fn classify(text: &str) -> Line<'_> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }
    if trimmed.starts_with('#') {
        // unknown ## commands are ignored like comments
        return Directive::from_str(trimmed).map_or(Line::Comment, Line::Directive);
    }

    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    match fields.as_slice() {
        &[name, x, y] => Line::Room { name, x, y },
        _ => Line::Link(trimmed),
    }
}

fn parse_link(text: &str) -> Option<(&str, &str)> {
    let (from, to) = text.split_once('-')?;
    if from.is_empty() || to.is_empty() || to.contains('-') || text.contains(char::is_whitespace) {
        return None;
    }

    Some((from, to))
}

/// Read a farm in the lem-in text format.
///
/// ```text
/// 3            <- number of ants
/// ##start      <- the next room is the start room
/// start 0 0    <- a room: name, x, y
/// middle 1 0
/// ##end
/// end 2 0
/// start-middle <- a tunnel
/// middle-end
/// ```
///
/// Lines beginning with `#` are comments, except the `##start` and `##end` commands.
/// All rooms must be declared before the first tunnel.
/// The parsed farm is checked by a [`FarmBuilder`], so every [`BuilderInvalidReason`] may surface as [`ParseError::Invalid`].
pub fn parse_farm(input: &str) -> Result<Farm, ParseError> {
    let mut lines = input.lines()
        .enumerate()
        .map(|(index, text)| (index + 1, classify(text)));

    let (ant_line, ants) = loop {
        match lines.next() {
            None => return Err(ParseError::Empty),
            Some((_, Line::Blank | Line::Comment)) => continue,
            Some((line, Line::Link(text))) => break (line, text.parse::<usize>().ok()),
            Some((line, _)) => break (line, None),
        }
    };
    let ants = match ants {
        Some(ants) if (1..=MAX_ANTS).contains(&ants) => ants,
        _ => return Err(ParseError::InvalidAntCount { line: ant_line }),
    };

    let mut builder = FarmBuilder::with_ants(ants);
    let mut pending: Option<(Directive, usize)> = None;
    let mut in_links = false;

    for (line, parsed) in lines {
        match parsed {
            Line::Blank | Line::Comment => {}
            Line::Directive(directive) => {
                if let Some((previous, previous_line)) = pending {
                    return Err(ParseError::DanglingDirective { directive: previous.to_string(), line: previous_line });
                }
                pending = Some((directive, line));
            }
            Line::Room { name, x, y } => {
                if in_links {
                    return Err(ParseError::RoomAfterLinks { line });
                }
                let x = x.parse().map_err(|_| ParseError::InvalidRoom { line, reason: "invalid x coordinate" })?;
                let y = y.parse().map_err(|_| ParseError::InvalidRoom { line, reason: "invalid y coordinate" })?;
                let role = pending.take().map_or(Role::Interior, |(directive, _)| Role::from(directive));

                builder.add_room(name, Location(x, y), role);
            }
            Line::Link(text) => {
                let Some((from, to)) = parse_link(text) else {
                    return Err(if in_links {
                        ParseError::InvalidLink { line }
                    } else {
                        ParseError::InvalidRoom { line, reason: "invalid room definition" }
                    });
                };
                if let Some((directive, directive_line)) = pending {
                    return Err(ParseError::DanglingDirective { directive: directive.to_string(), line: directive_line });
                }
                in_links = true;

                builder.add_tunnel(from, to);
            }
        }

        if let Some(reason) = builder.is_valid().and_then(|reasons| reasons.first()) {
            return Err(ParseError::Invalid { line: Some(line), reason: reason.clone() });
        }
    }

    if let Some((directive, line)) = pending {
        return Err(ParseError::DanglingDirective { directive: directive.to_string(), line });
    }

    let farm = builder.build()
        .map_err(|reasons| ParseError::Invalid {
            line: None,
            reason: reasons.into_iter().next().unwrap_or(BuilderInvalidReason::NoPath),
        })?;
    debug!(rooms = farm.rooms().len(), ants = farm.ants(), "parsed farm");

    Ok(farm)
}
