use dungeon_grid::config::LevelCatalog;
use dungeon_grid::model::combat::try_regenerate;
use dungeon_grid::model::{Direction, GameSession, GridPosition, Player};
use proptest::prelude::*;

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

proptest! {
    #[test]
    fn player_never_stands_on_a_blocking_tile(
        level in 0usize..8,
        seed in any::<u64>(),
        steps in prop::collection::vec(direction(), 1..60),
    ) {
        let mut session = GameSession::new(LevelCatalog::bundled().unwrap(), seed).unwrap();
        if level > 0 {
            // Jump straight to the level under test.
            let total = session.level_count();
            for l in 0..total {
                session.progress.record_completion(l, total);
            }
            session.select_level(level).unwrap();
        }
        for (i, dir) in steps.into_iter().enumerate() {
            let _ = session.move_player(dir, i as f64 * 50.0);
            let pos = session.player.position;
            prop_assert!(!session.board.is_blocking(pos.x(), pos.y()));
        }
    }

    #[test]
    fn regeneration_is_capped_and_waits_for_quiet(
        max_health in 1u32..6,
        missing in 0u32..6,
        last_damage in prop::option::of(0.0f64..20_000.0),
        last_regen in prop::option::of(0.0f64..20_000.0),
        now in 0.0f64..30_000.0,
    ) {
        let mut player = Player::new(GridPosition::new(40).unwrap(), max_health);
        player.health = max_health.saturating_sub(missing);
        player.last_damage_at = last_damage;
        player.last_regen_at = last_regen;
        let before = player.health;

        let healed = try_regenerate(&mut player, now, 5000.0);

        prop_assert!(player.health <= player.max_health);
        if healed {
            prop_assert_eq!(player.health, before + 1);
            prop_assert!(last_damage.is_none_or(|t| now - t > 5000.0));
            prop_assert!(last_regen.is_none_or(|t| now - t > 5000.0));
        } else {
            prop_assert_eq!(player.health, before);
        }
    }
}
