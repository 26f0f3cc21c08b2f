/*!
 * Reference Counting Tests
 * Aliases, relocation and release semantics
 */

use pretty_assertions::assert_eq;
use refcount_arena::memory::{Arena, ArenaError, ReleaseEffect};

#[test]
fn test_alias_follows_relocated_target() {
    let mut arena = Arena::with_capacity(100);
    arena.allocate(20, "front").unwrap();
    arena.allocate(10, "a").unwrap();
    arena.assign("p", "a").unwrap();
    arena.release("front").unwrap();

    let stats = arena.compact();
    assert_eq!(stats.moved_blocks, 1);
    assert_eq!(arena.lookup("a").unwrap().start, 0);
    assert_eq!(arena.lookup("p").unwrap().start, 0);

    // The alias still counts against its relocated target
    assert_eq!(
        arena.release("a").unwrap().effect,
        ReleaseEffect::Decremented { remaining: 1 }
    );
    assert_eq!(
        arena.release("p").unwrap().effect,
        ReleaseEffect::Reclaimed { start: 0, size: 10 }
    );
    arena.compact();
    assert!(arena.verify().is_ok());
    assert_eq!(arena.stats().free, 100);
}

#[test]
fn test_alias_does_not_match_neighbour_at_old_address() {
    let mut arena = Arena::with_capacity(100);
    arena.allocate(10, "a").unwrap();
    arena.allocate(10, "b").unwrap();
    arena.assign("p", "b").unwrap();
    arena.release("a").unwrap();
    arena.compact();
    arena.allocate(10, "c").unwrap();

    // c now sits where b used to be; releasing p must touch b only
    assert_eq!(arena.lookup("c").unwrap().start, 10);
    arena.release("p").unwrap();
    assert_eq!(arena.lookup("b").unwrap().ref_count(), Some(1));
    assert_eq!(arena.lookup("c").unwrap().ref_count(), Some(1));
}

#[test]
fn test_many_aliases_release_in_any_order() {
    let mut arena = Arena::with_capacity(64);
    arena.allocate(16, "root").unwrap();
    for alias in ["p1", "p2", "p3"] {
        arena.assign(alias, "root").unwrap();
    }
    assert_eq!(arena.lookup("root").unwrap().ref_count(), Some(4));

    for name in ["p2", "root", "p3"] {
        assert!(matches!(
            arena.release(name).unwrap().effect,
            ReleaseEffect::Decremented { .. }
        ));
    }
    assert_eq!(
        arena.release("p1").unwrap().effect,
        ReleaseEffect::Reclaimed { start: 0, size: 16 }
    );
    assert!(arena.used().is_empty());
}

#[test]
fn test_alias_name_cannot_shadow() {
    let mut arena = Arena::with_capacity(64);
    arena.allocate(16, "a").unwrap();
    arena.assign("p", "a").unwrap();

    assert_eq!(
        arena.assign("p", "a").unwrap_err(),
        ArenaError::DuplicateName("p".into())
    );
    assert_eq!(arena.lookup("a").unwrap().ref_count(), Some(2));
}

#[test]
fn test_release_missing_binding() {
    let mut arena = Arena::with_capacity(64);
    arena.allocate(16, "a").unwrap();
    arena.release("a").unwrap();

    assert_eq!(
        arena.release("a").unwrap_err(),
        ArenaError::NotFound("a".into())
    );
}
