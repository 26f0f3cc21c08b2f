/*!
 * Arena Invariant Tests
 * Tiling, conservation and first-fit placement over random command streams
 */

use proptest::prelude::*;
use refcount_arena::commands::{Operation, Outcome, Session};
use refcount_arena::memory::Arena;

const CAPACITY: usize = 250;
const NAMES: &[&str] = &["a", "b", "c", "d", "e", "f"];

fn name() -> impl Strategy<Value = String> {
    prop::sample::select(NAMES).prop_map(str::to_string)
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => (name(), 1usize..120).prop_map(|(name, size)| Operation::Allocate {
            name: name.as_str().into(),
            size,
        }),
        2 => (name(), name()).prop_map(|(alias, target)| Operation::Assign {
            alias: alias.as_str().into(),
            target: target.as_str().into(),
        }),
        3 => name().prop_map(|name| Operation::Free {
            name: name.as_str().into(),
        }),
        1 => Just(Operation::Compact),
    ]
}

proptest! {
    #[test]
    fn test_tiling_and_conservation_hold_after_every_step(
        operations in prop::collection::vec(operation(), 1..60)
    ) {
        let mut session = Session::with_capacity(CAPACITY);

        for operation in operations {
            session.execute(operation);

            let arena = session.engine();
            prop_assert!(arena.verify().is_ok(), "{:?}", arena.verify());

            let stats = arena.stats();
            prop_assert_eq!(stats.used + stats.free, CAPACITY);
            // Compaction leaves at most one free extent, always at the tail
            prop_assert!(stats.free_extents <= 1);
            if let Some(tail) = arena.free().first() {
                prop_assert_eq!(tail.start + tail.size, CAPACITY);
            }
            prop_assert!(arena.free().iter().all(|block| block.size > 0));
        }
    }

    #[test]
    fn test_aliases_never_reach_free_list(
        operations in prop::collection::vec(operation(), 1..60)
    ) {
        let mut session = Session::with_capacity(CAPACITY);

        for operation in operations {
            let freed_alias = match &session.execute(operation).outcome {
                Outcome::Released(release) => release.via_alias,
                _ => false,
            };
            let arena = session.engine();
            let alias_size: usize = arena
                .used()
                .iter()
                .filter(|block| block.is_alias())
                .map(|block| block.size)
                .sum();
            prop_assert_eq!(alias_size, 0);
            if freed_alias {
                prop_assert!(arena.verify().is_ok());
            }
        }
    }

    #[test]
    fn test_allocation_takes_first_fitting_extent(
        sizes in prop::collection::vec(1usize..60, 1..12),
        request in 1usize..120,
    ) {
        let mut arena = Arena::with_capacity(CAPACITY);
        for (index, size) in sizes.iter().enumerate() {
            let _ = arena.allocate(*size, &format!("v{index}"));
        }
        for index in (0..sizes.len()).step_by(2) {
            let _ = arena.release(&format!("v{index}"));
        }

        let first_fit = |arena: &Arena| {
            arena
                .free()
                .iter()
                .find(|extent| extent.size >= request)
                .map(|extent| extent.start)
        };
        let direct = first_fit(&arena);
        let after_compaction = {
            let mut compacted = arena.clone();
            compacted.compact();
            first_fit(&compacted)
        };

        match arena.allocate(request, "fresh").map(|block| block.start) {
            Ok(start) => prop_assert_eq!(Some(start), direct.or(after_compaction)),
            Err(err) => {
                prop_assert!(direct.is_none() && after_compaction.is_none(), "{}", err);
            }
        }
        prop_assert!(arena.verify().is_ok(), "{:?}", arena.verify());
    }
}
