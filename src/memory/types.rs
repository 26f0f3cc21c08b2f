/*!
 * Arena Types
 * Blocks, errors, statistics and snapshots shared by the arena engine
 */

use crate::core::limits::{
    CRITICAL_PRESSURE_THRESHOLD, MEDIUM_PRESSURE_THRESHOLD, WARNING_PRESSURE_THRESHOLD,
};
use crate::core::types::{Address, BlockId, Name, RefCount, Size};
use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

/// Arena operation result
pub type ArenaResult<T> = Result<T, ArenaError>;

/// Arena errors
///
/// Every variant is non-fatal: the session reports it and moves on to the
/// next operation.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ArenaError {
    #[error("Insufficient memory for allocation: requested {requested} units, largest free extent {largest_free} ({total_free} free in total)")]
    #[diagnostic(
        code(arena::allocation_failure),
        help("No free extent is large enough even after compaction. Free some variables first.")
    )]
    AllocationFailure {
        requested: Size,
        largest_free: Size,
        total_free: Size,
    },

    #[error("Refusing zero-size allocation for variable {0}")]
    #[diagnostic(
        code(arena::zero_size),
        help("Size 0 is reserved for alias bindings. Use `<name> = <other>` to alias.")
    )]
    ZeroSizeAllocation(Name),

    #[error("Variable {0} is already declared")]
    #[diagnostic(code(arena::duplicate_name))]
    DuplicateName(Name),

    #[error("Variable {0} not found for assignment")]
    #[diagnostic(code(arena::target_not_found))]
    TargetNotFound(Name),

    #[error("Block {0} is not found for deallocation")]
    #[diagnostic(code(arena::not_found))]
    NotFound(Name),

    #[error("Attempted to deallocate {0} with reference count already at 0")]
    #[diagnostic(code(arena::double_release))]
    DoubleRelease(Name),

    #[error("Arena corruption detected: {0}")]
    #[diagnostic(code(arena::corruption))]
    CorruptionDetected(String),
}

/// What a used-list entry is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockKind {
    /// A real allocation with its live binding count
    Owned { id: BlockId, ref_count: RefCount },
    /// A zero-size binding counted against `target`
    Alias { target: BlockId },
}

/// Used-list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub name: Name,
    pub start: Address,
    pub size: Size,
    #[serde(flatten)]
    pub kind: BlockKind,
}

impl Block {
    pub fn owned(id: BlockId, name: impl Into<Name>, start: Address, size: Size) -> Self {
        Self {
            name: name.into(),
            start,
            size,
            kind: BlockKind::Owned { id, ref_count: 1 },
        }
    }

    pub fn alias(name: impl Into<Name>, target: BlockId, start: Address) -> Self {
        Self {
            name: name.into(),
            start,
            size: 0,
            kind: BlockKind::Alias { target },
        }
    }

    pub fn is_alias(&self) -> bool {
        matches!(self.kind, BlockKind::Alias { .. })
    }

    /// Id of the owned block this entry stands for (itself, or its alias target)
    pub fn block_id(&self) -> BlockId {
        match self.kind {
            BlockKind::Owned { id, .. } => id,
            BlockKind::Alias { target } => target,
        }
    }

    /// Reference count, `None` for aliases
    pub fn ref_count(&self) -> Option<RefCount> {
        match self.kind {
            BlockKind::Owned { ref_count, .. } => Some(ref_count),
            BlockKind::Alias { .. } => None,
        }
    }

    pub fn end(&self) -> Address {
        self.start + self.size
    }
}

/// Free extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FreeBlock {
    pub start: Address,
    pub size: Size,
}

impl FreeBlock {
    pub fn new(start: Address, size: Size) -> Self {
        Self { start, size }
    }

    pub fn end(&self) -> Address {
        self.start + self.size
    }
}

/// Effect of a release on the owned block behind the binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum ReleaseEffect {
    /// Other bindings still reference the block
    Decremented { remaining: RefCount },
    /// Last binding gone, the extent went back to the free list
    Reclaimed { start: Address, size: Size },
    /// Alias whose target had already been reclaimed
    Detached,
}

/// Outcome of a successful release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release {
    pub name: Name,
    pub via_alias: bool,
    #[serde(flatten)]
    pub effect: ReleaseEffect,
}

/// Result of one compaction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompactionStats {
    /// Owned blocks whose start changed
    pub moved_blocks: usize,
    /// Free extents before the pass
    pub extents_before: usize,
    /// Free extents after the pass
    pub extents_after: usize,
}

/// Arena pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ArenaPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl ArenaPressure {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= CRITICAL_PRESSURE_THRESHOLD {
            ArenaPressure::Critical
        } else if ratio >= WARNING_PRESSURE_THRESHOLD {
            ArenaPressure::High
        } else if ratio >= MEDIUM_PRESSURE_THRESHOLD {
            ArenaPressure::Medium
        } else {
            ArenaPressure::Low
        }
    }
}

impl std::fmt::Display for ArenaPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ArenaPressure::Low => write!(f, "LOW"),
            ArenaPressure::Medium => write!(f, "MEDIUM"),
            ArenaPressure::High => write!(f, "HIGH"),
            ArenaPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Arena statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArenaStats {
    pub capacity: Size,
    pub used: Size,
    pub free: Size,
    pub largest_free: Size,
    pub owned_blocks: usize,
    pub alias_bindings: usize,
    pub free_extents: usize,
    pub usage_percentage: f64,
}

impl ArenaStats {
    pub fn pressure(&self) -> ArenaPressure {
        ArenaPressure::from_ratio(self.usage_percentage / 100.0)
    }

    /// Free space that a single allocation cannot reach without compaction
    pub fn fragmented(&self) -> Size {
        self.free - self.largest_free
    }
}

/// Read-only view handed to the status reporter
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ArenaSnapshot<'a> {
    pub capacity: Size,
    pub used: &'a [Block],
    pub free: &'a [FreeBlock],
}

impl<'a> ArenaSnapshot<'a> {
    /// Owned block an alias currently points at
    ///
    /// `None` for owned blocks and for aliases whose target was reclaimed.
    pub fn alias_target(&self, alias: &Block) -> Option<&'a Block> {
        if !alias.is_alias() {
            return None;
        }
        let target = alias.block_id();
        self.used
            .iter()
            .find(|block| !block.is_alias() && block.block_id() == target)
    }
}
