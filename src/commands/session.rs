/*!
 * Command Session
 * Dispatches operations to the arena engine
 *
 * Every operation is followed by a compaction pass, whether it succeeded or
 * not, so each reported snapshot shows a freshly compacted arena.
 */

use super::parser::Operation;
use crate::core::types::{Address, Name, Size};
use crate::memory::{Arena, ArenaEngine, ArenaError, CompactionStats, Release};
use tracing::debug;

/// Result of one dispatched operation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Allocated {
        name: Name,
        start: Address,
        size: Size,
    },
    Assigned {
        alias: Name,
        target: Name,
        start: Address,
    },
    Released(Release),
    Compacted,
    Failed(ArenaError),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// One executed operation together with the compaction that followed it
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub operation: Operation,
    pub outcome: Outcome,
    pub compaction: CompactionStats,
}

/// Owns an arena engine for the duration of a command stream
#[derive(Debug)]
pub struct Session<E: ArenaEngine = Arena> {
    engine: E,
    steps: usize,
    failures: usize,
}

impl Session<Arena> {
    /// Session over a fresh arena of `capacity` units
    pub fn with_capacity(capacity: Size) -> Self {
        Self::new(Arena::with_capacity(capacity))
    }
}

impl<E: ArenaEngine> Session<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            steps: 0,
            failures: 0,
        }
    }

    /// Dispatch `operation`, then compact
    pub fn execute(&mut self, operation: Operation) -> Step {
        let outcome = match &operation {
            Operation::Allocate { name, size } => match self.engine.allocate(*size, name) {
                Ok(block) => Outcome::Allocated {
                    name: name.clone(),
                    start: block.start,
                    size: block.size,
                },
                Err(err) => Outcome::Failed(err),
            },
            Operation::Assign { alias, target } => match self.engine.assign(alias, target) {
                Ok(block) => Outcome::Assigned {
                    alias: alias.clone(),
                    target: target.clone(),
                    start: block.start,
                },
                Err(err) => Outcome::Failed(err),
            },
            Operation::Free { name } => match self.engine.release(name) {
                Ok(release) => Outcome::Released(release),
                Err(err) => Outcome::Failed(err),
            },
            Operation::Compact => Outcome::Compacted,
        };

        let compaction = self.engine.compact();

        self.steps += 1;
        if outcome.is_failure() {
            self.failures += 1;
        }
        debug!(
            step = self.steps,
            operation = operation.kind(),
            failed = outcome.is_failure(),
            "Operation executed"
        );

        Step {
            operation,
            outcome,
            compaction,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Operations executed so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Operations that reported an error
    pub fn failures(&self) -> usize {
        self.failures
    }
}
