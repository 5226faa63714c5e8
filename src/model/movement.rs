//! Player stepping, enemy motion and overlap checks.

use rand::Rng;

use super::entity::{Direction, Enemy};
use super::error::Rejection;
use super::grid::{Board, GRID_HEIGHT, GRID_WIDTH, GridPosition, Tile, draw_turn_timer, round_cell};

/// Where a legal player step lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepTarget {
    Floor(GridPosition),
    /// An unopened left door; walking onto it opens it.
    Door(GridPosition),
    /// Top door or stairs; the caller decides whether the level is clear.
    Exit(GridPosition),
}

/// Resolves a one-cell step from `from` without changing anything.
pub fn plan_step(board: &Board, from: GridPosition, dir: Direction) -> Result<StepTarget, Rejection> {
    let to = from.step(dir).ok_or(Rejection::OutOfBounds)?;
    let tile = board.tile(to);
    if tile.is_blocking() {
        return Err(Rejection::Blocked);
    }
    Ok(match tile {
        Tile::LeftDoor => StepTarget::Door(to),
        t if t.is_exit() => StepTarget::Exit(to),
        _ => StepTarget::Floor(to),
    })
}

/// Base speeds in tiles per second, before the session multiplier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySpeeds {
    pub slicer: f64,
    pub skeletor: f64,
    pub multiplier: f64,
    pub turn_timer_max: f64,
}

/// Advances every enemy by `dt` seconds along its axis, bouncing off walls,
/// decorations and the grid edge.
pub fn move_enemies<R: Rng + ?Sized>(
    enemies: &mut [Enemy],
    board: &Board,
    dt: f64,
    speeds: EnemySpeeds,
    rng: &mut R,
) {
    for enemy in enemies.iter_mut() {
        match enemy {
            Enemy::Slicer { x, y, direction, .. } => {
                let travel = speeds.slicer * dt * speeds.multiplier;
                let next = *x + f64::from(*direction) * travel;
                if next < 0.0 || next >= GRID_WIDTH as f64 || board.is_blocking(round_cell(next), *y) {
                    *direction = -*direction;
                } else {
                    *x = next;
                }
            }
            Enemy::Skeletor {
                x,
                y,
                direction,
                turn_timer,
                ..
            } => {
                *turn_timer -= dt;
                if *turn_timer <= 0.0 {
                    *direction = -*direction;
                    *turn_timer = draw_turn_timer(speeds.turn_timer_max, rng);
                }
                let travel = speeds.skeletor * dt * speeds.multiplier;
                let next = *y + f64::from(*direction) * travel;
                if next < 0.0 || next >= GRID_HEIGHT as f64 || board.is_blocking(*x, round_cell(next)) {
                    *direction = -*direction;
                } else {
                    *y = next;
                }
            }
        }
    }
}

/// Whether any enemy shares `pos`.
pub fn touches_enemy(enemies: &[Enemy], pos: GridPosition) -> bool {
    enemies.iter().any(|e| e.occupies(pos))
}

/// Index of the first enemy on `pos`, scanning from the back so removing it
/// leaves earlier indices valid.
pub fn last_enemy_at(enemies: &[Enemy], pos: GridPosition) -> Option<usize> {
    enemies.iter().rposition(|e| e.occupies(pos))
}
