//! Property tests for the engine.
//!
//! Random seeds and command streams must never break the ownership
//! bookkeeping:
//! - every occupied cell belongs to a registered identifier
//! - registry counts equal the cells each identifier holds on the board
//! - identifiers are handed out in increasing order and never reused
//! - every seven spawns use each shape exactly once
use std::collections::BTreeMap;

use proptest::prelude::*;
use stackfall::core::Engine;
use stackfall::types::{Command, Phase, EMPTY, SHAPE_COUNT};

fn command() -> impl Strategy<Value = Option<Command>> {
    prop_oneof![
        3 => Just(None),
        2 => Just(Some(Command::MoveLeft)),
        2 => Just(Some(Command::MoveRight)),
        2 => Just(Some(Command::Rotate)),
        3 => Just(Some(Command::SoftDrop)),
    ]
}

fn assert_ownership_consistent(engine: &Engine) {
    let mut counts: BTreeMap<u32, u8> = BTreeMap::new();
    for &id in engine.board().cells() {
        if id != EMPTY {
            *counts.entry(id).or_default() += 1;
        }
    }

    let registry = engine.registry();
    assert_eq!(registry.len(), counts.len(), "registry has stale ids");
    for (&id, &n) in &counts {
        assert_eq!(registry.remaining(id), Some(n), "count mismatch for {}", id);
        assert!(id < engine.next_id(), "id {} not yet issued", id);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn random_play_keeps_ownership_consistent(
        seed in any::<u32>(),
        commands in prop::collection::vec(command(), 1..1500),
    ) {
        let mut engine = Engine::new(seed);
        let mut spawned: Vec<usize> = Vec::new();
        let mut last_id = 0;

        for cmd in commands {
            if let Some(cmd) = cmd {
                engine.enqueue_command(cmd);
            }
            engine.step();
            assert_ownership_consistent(&engine);

            if let Some(cur) = engine.active() {
                if cur.id != last_id {
                    prop_assert!(cur.id > last_id);
                    last_id = cur.id;
                    spawned.push(cur.shape);
                }
            }
            if engine.phase() == Phase::Falling {
                prop_assert!(engine.active().is_some());
            }
        }

        for bag in spawned.chunks_exact(SHAPE_COUNT) {
            let mut shapes = bag.to_vec();
            shapes.sort_unstable();
            prop_assert_eq!(shapes, (0..SHAPE_COUNT).collect::<Vec<_>>());
        }
    }

    #[test]
    fn game_over_freezes_the_snapshot(seed in any::<u32>()) {
        let mut engine = Engine::new(seed);
        while !engine.is_game_over() {
            engine.enqueue_command(Command::SoftDrop);
            engine.step();
        }
        let frozen = engine.snapshot();
        engine.enqueue_command(Command::Rotate);
        engine.step();
        prop_assert_eq!(engine.snapshot(), frozen);
    }
}
