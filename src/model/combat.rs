//! Damage, invulnerability, regeneration and attacks.

use super::entity::{Enemy, Player};
use super::error::Rejection;
use super::grid::GridPosition;
use super::movement::last_enemy_at;

/// Hit size on level `level` (0-based): one extra point every second level.
pub fn damage_for_level(base: u32, level: usize) -> u32 {
    base.saturating_add((level / 2) as u32)
}

/// Applies a hit unless the player is still invulnerable. Returns the damage
/// dealt, or `None` when the hit was ignored.
pub fn apply_damage(player: &mut Player, amount: u32, now_ms: f64, invulnerability_ms: f64) -> Option<u32> {
    if player.is_invulnerable(now_ms) {
        return None;
    }
    let dealt = amount.min(player.health);
    player.health -= dealt;
    let until = now_ms + invulnerability_ms;
    player.invulnerable_until = Some(until);
    player.last_damage_at = Some(now_ms);
    player.last_regen_at = Some(until);
    Some(dealt)
}

/// Restores one heart once both the last hit and the last regen tick are more
/// than `delay_ms` in the past.
pub fn try_regenerate(player: &mut Player, now_ms: f64, delay_ms: f64) -> bool {
    if player.health >= player.max_health {
        return false;
    }
    let quiet = |at: Option<f64>| at.is_none_or(|t| now_ms - t > delay_ms);
    if !quiet(player.last_damage_at) || !quiet(player.last_regen_at) {
        return false;
    }
    player.health += 1;
    player.last_regen_at = Some(now_ms);
    true
}

/// Cell in front of the player.
pub fn attack_target(player: &Player) -> Result<GridPosition, Rejection> {
    player.position.step(player.facing).ok_or(Rejection::OutOfBounds)
}

/// Removes at most one enemy standing on `cell` and returns it.
pub fn strike(enemies: &mut Vec<Enemy>, cell: GridPosition) -> Option<Enemy> {
    last_enemy_at(enemies, cell).map(|i| enemies.remove(i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entity::{Direction, EnemyId};
    use rstest::rstest;

    fn player() -> Player {
        Player::new(GridPosition::new(40).unwrap(), 3)
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(3, 2)]
    #[case(7, 4)]
    fn damage_scales_every_second_level(#[case] level: usize, #[case] expected: u32) {
        assert_eq!(damage_for_level(1, level), expected);
    }

    #[test]
    fn invulnerability_timeline() {
        let mut p = player();
        assert_eq!(apply_damage(&mut p, 1, 0.0, 1000.0), Some(1));
        assert_eq!(p.health, 2);
        assert_eq!(p.invulnerable_until, Some(1000.0));
        assert_eq!(apply_damage(&mut p, 1, 500.0, 1000.0), None);
        assert_eq!(p.health, 2);
        assert_eq!(apply_damage(&mut p, 1, 1500.0, 1000.0), Some(1));
        assert_eq!(p.health, 1);
    }

    #[test]
    fn damage_saturates_at_zero() {
        let mut p = player();
        p.health = 1;
        assert_eq!(apply_damage(&mut p, 4, 0.0, 1000.0), Some(1));
        assert_eq!(p.health, 0);
    }

    #[test]
    fn hit_pushes_regen_clock_to_end_of_invulnerability() {
        let mut p = player();
        apply_damage(&mut p, 1, 2000.0, 1000.0);
        assert_eq!(p.last_damage_at, Some(2000.0));
        assert_eq!(p.last_regen_at, Some(3000.0));
        // 5000 ms after the hit is still within 5000 ms of the regen clock
        assert!(!try_regenerate(&mut p, 7500.0, 5000.0));
        assert!(try_regenerate(&mut p, 8000.5, 5000.0));
        assert_eq!(p.health, 3);
    }

    #[test]
    fn regen_needs_strictly_more_than_delay() {
        let mut p = player();
        p.health = 1;
        p.last_damage_at = Some(0.0);
        p.last_regen_at = Some(0.0);
        assert!(!try_regenerate(&mut p, 5000.0, 5000.0));
        assert!(try_regenerate(&mut p, 5001.0, 5000.0));
        assert_eq!(p.health, 2);
        assert!(!try_regenerate(&mut p, 10_001.0, 5000.0));
        assert!(try_regenerate(&mut p, 10_002.0, 5000.0));
        assert_eq!(p.health, 3);
        assert!(!try_regenerate(&mut p, 99_999.0, 5000.0));
        assert_eq!(p.health, 3);
    }

    #[test]
    fn attack_target_respects_grid_edges() {
        let mut p = player();
        p.facing = Direction::Right;
        assert_eq!(attack_target(&p).map(GridPosition::index), Ok(41));
        p.facing = Direction::Left;
        assert_eq!(attack_target(&p), Err(Rejection::OutOfBounds));
    }

    #[test]
    fn strike_removes_only_one_enemy() {
        let cell = GridPosition::new(41).unwrap();
        let mut enemies = vec![
            Enemy::slicer(EnemyId(0), 1, 4),
            Enemy::slicer(EnemyId(1), 5, 5),
            Enemy::skeletor(EnemyId(2), 1, 4, 2.0),
        ];
        let hit = strike(&mut enemies, cell).map(|e| e.id());
        assert_eq!(hit, Some(EnemyId(2)));
        assert_eq!(enemies.len(), 2);
        assert_eq!(strike(&mut enemies, GridPosition::new(11).unwrap()), None);
        assert_eq!(enemies.len(), 2);
    }
}
