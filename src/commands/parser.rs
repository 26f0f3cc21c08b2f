/*!
 * Command Parser
 * One line of input to one operation
 *
 * Grammar (whitespace separated):
 * - `<name> allocate <size>`
 * - `<name> = <other>`
 * - `<name> free`
 * - `compact` (any case)
 */

use crate::core::types::{Name, Size};
use std::fmt;

/// Parsed operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Allocate { name: Name, size: Size },
    Assign { alias: Name, target: Name },
    Free { name: Name },
    Compact,
}

impl Operation {
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Allocate { .. } => "allocate",
            Operation::Assign { .. } => "assign",
            Operation::Free { .. } => "free",
            Operation::Compact => "compact",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Allocate { name, size } => write!(f, "{name} allocate {size}"),
            Operation::Assign { alias, target } => write!(f, "{alias} = {target}"),
            Operation::Free { name } => write!(f, "{name} free"),
            Operation::Compact => write!(f, "compact"),
        }
    }
}

/// Parse one input line
///
/// Returns `None` for blank lines, `#` comments, unknown commands and
/// malformed arguments; callers skip those lines.
pub fn parse_line(line: &str) -> Option<Operation> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut tokens = line.split_whitespace();
    let variable = tokens.next()?;
    let command = tokens.next();

    match command {
        Some("allocate") => {
            let size = tokens.next()?.parse::<Size>().ok()?;
            Some(Operation::Allocate {
                name: variable.into(),
                size,
            })
        }
        Some("=") => {
            let target = tokens.next()?;
            Some(Operation::Assign {
                alias: variable.into(),
                target: target.into(),
            })
        }
        Some("free") => Some(Operation::Free {
            name: variable.into(),
        }),
        _ if variable.eq_ignore_ascii_case("compact") => Some(Operation::Compact),
        _ => None,
    }
}
