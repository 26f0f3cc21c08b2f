/*!
 * Reference Engine
 * Alias creation and reference-counted release
 */

use super::Arena;
use crate::memory::types::{
    ArenaError, ArenaResult, Block, BlockKind, FreeBlock, Release, ReleaseEffect,
};
use tracing::{debug, info, warn};

impl Arena {
    /// Bind `alias` to the block currently named `target`
    ///
    /// Aliasing an alias binds to the same underlying owned block. The new
    /// entry is zero-size and starts at the target's address.
    pub fn assign(&mut self, alias: &str, target: &str) -> ArenaResult<&Block> {
        if self.position_of(alias).is_some() {
            warn!(alias, "Variable is already declared");
            return Err(ArenaError::DuplicateName(alias.into()));
        }

        let owner = self
            .position_of(target)
            .map(|index| self.used[index].block_id())
            .and_then(|id| self.owner_index(id))
            .ok_or_else(|| {
                warn!(alias, target, "Variable not found for assignment");
                ArenaError::TargetNotFound(target.into())
            })?;

        let owned = &mut self.used[owner];
        let (id, start) = match &mut owned.kind {
            BlockKind::Owned { id, ref_count } => {
                *ref_count += 1;
                (*id, owned.start)
            }
            // owner_index only matches owned entries
            BlockKind::Alias { .. } => return Err(ArenaError::TargetNotFound(target.into())),
        };

        let index = self.used.len();
        self.used.push(Block::alias(alias, id, start));

        info!(alias, target, address = start, block = %id, "Pointer declared");
        Ok(&self.used[index])
    }

    /// Drop the first binding named `name`
    ///
    /// Releasing an alias decrements its target exactly like releasing the
    /// target directly, including reclaiming it when the count reaches zero.
    pub fn release(&mut self, name: &str) -> ArenaResult<Release> {
        let index = self.position_of(name).ok_or_else(|| {
            warn!(name, "Block is not found for deallocation");
            ArenaError::NotFound(name.into())
        })?;

        let kind = self.used[index].kind;
        let effect = match kind {
            BlockKind::Owned { .. } => self.decrement(index)?,
            BlockKind::Alias { target } => match self.owner_index(target) {
                Some(owner) => {
                    self.ensure_live(owner)?;
                    self.used.remove(index);
                    // Removing the alias shifts a later owner down by one
                    let owner = if owner > index { owner - 1 } else { owner };
                    self.decrement(owner)?
                }
                None => {
                    debug!(name, block = %target, "Alias target already reclaimed");
                    self.used.remove(index);
                    ReleaseEffect::Detached
                }
            },
        };

        Ok(Release {
            name: name.into(),
            via_alias: matches!(kind, BlockKind::Alias { .. }),
            effect,
        })
    }

    /// Fail with `DoubleRelease` if the owned block at `index` has no bindings left
    fn ensure_live(&self, index: usize) -> ArenaResult<()> {
        match self.used[index].ref_count() {
            Some(0) => {
                let name = &self.used[index].name;
                warn!(name = %name, "Attempted to deallocate memory with reference count already at 0");
                Err(ArenaError::DoubleRelease(name.clone()))
            }
            _ => Ok(()),
        }
    }

    /// Decrement the owned block at `index`, reclaiming it at zero
    fn decrement(&mut self, index: usize) -> ArenaResult<ReleaseEffect> {
        self.ensure_live(index)?;

        let block = &mut self.used[index];
        let remaining = match &mut block.kind {
            BlockKind::Owned { ref_count, .. } => {
                *ref_count -= 1;
                *ref_count
            }
            BlockKind::Alias { .. } => return Ok(ReleaseEffect::Detached),
        };

        if remaining > 0 {
            debug!(name = %block.name, remaining, "Reference count decremented");
            return Ok(ReleaseEffect::Decremented { remaining });
        }

        let block = self.used.remove(index);
        self.free.push(FreeBlock::new(block.start, block.size));
        info!(
            name = %block.name,
            address = block.start,
            size = block.size,
            "Deallocated memory"
        );
        Ok(ReleaseEffect::Reclaimed {
            start: block.start,
            size: block.size,
        })
    }
}
