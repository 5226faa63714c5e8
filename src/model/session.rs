//! The session root: one owned record that every input and frame mutates.

use std::collections::BTreeSet;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::combat::{apply_damage, attack_target, damage_for_level, strike, try_regenerate};
use super::entity::{AttackEffect, Direction, EnemyId, EnemyKind, Enemy, Player};
use super::error::Rejection;
use super::grid::{Board, GridPosition};
use super::input::ControlScheme;
use super::movement::{EnemySpeeds, StepTarget, move_enemies, plan_step, touches_enemy};
use super::progression::{Progress, next_level};
use crate::config::{CatalogError, GameConfig, LevelCatalog};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Gameplay is frozen until restart; frames keep ticking transients.
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeTone {
    Warning,
    Info,
}

/// Transient message shown over the board.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub text: String,
    pub tone: NoticeTone,
    pub expires_at: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    pub enemy_speed: f64,
    pub control_scheme: ControlScheme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enemy_speed: 1.0,
            control_scheme: ControlScheme::default(),
        }
    }
}

/// What happened as a result of an input or a frame.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Moved { to: GridPosition },
    DoorOpened { at: GridPosition },
    LevelCompleted { level: usize, all_completed: bool },
    LevelEntered { level: usize },
    Attacked { at: GridPosition, slain: Option<EnemyId> },
    PlayerHit { damage: u32, health: u32 },
    Regenerated { health: u32 },
    GameOver { score: u32 },
    Restarted,
}

/// Read-only view of everything the presentation layer draws.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub score: u32,
    /// 1-based, for display.
    pub level: usize,
    pub enemy_count: usize,
    pub player_cell: GridPosition,
    pub facing: Direction,
    pub hearts: (u32, u32),
    pub enemies: Vec<(EnemyKind, f64, f64)>,
    pub completed: BTreeSet<usize>,
    pub all_completed: bool,
    pub phase: Phase,
    /// Notice text with its remaining display time in ms.
    pub notice: Option<(String, f64)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    catalog: Rc<LevelCatalog>,
    pub config: GameConfig,
    pub board: Board,
    pub level: usize,
    pub score: u32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub attacks: Vec<AttackEffect>,
    pub progress: Progress,
    pub settings: Settings,
    pub phase: Phase,
    pub notice: Option<Notice>,
    /// Board flash after a locked exit.
    pub flash_until: Option<f64>,
    last_frame_at: Option<f64>,
    next_enemy_id: u32,
    rng: SmallRng,
}

impl GameSession {
    /// Starts on level 0. `seed` drives every random draw in the session.
    pub fn new(catalog: LevelCatalog, seed: u64) -> Result<Self, CatalogError> {
        Self::with_catalog(Rc::new(catalog), seed)
    }

    pub fn with_catalog(catalog: Rc<LevelCatalog>, seed: u64) -> Result<Self, CatalogError> {
        let Some(first) = catalog.level(0) else {
            return Err(CatalogError::Empty);
        };
        let config = catalog.config;
        let player = Player::new(first.start, config.max_health);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut next_enemy_id = 0;
        let (board, enemies) = Board::load(first, config.turn_timer_max_secs, &mut next_enemy_id, &mut rng);
        Ok(Self {
            catalog,
            config,
            board,
            level: 0,
            score: 0,
            player,
            enemies,
            attacks: Vec::new(),
            progress: Progress::default(),
            settings: Settings::default(),
            phase: Phase::Playing,
            notice: None,
            flash_until: None,
            last_frame_at: None,
            next_enemy_id,
            rng,
        })
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn level_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn level_name(&self) -> &str {
        self.catalog.level(self.level).map_or("", |l| l.name.as_str())
    }

    pub fn display_level(&self) -> usize {
        self.level + 1
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    fn ensure_playing(&self) -> Result<(), Rejection> {
        if self.is_over() { Err(Rejection::SessionOver) } else { Ok(()) }
    }

    /// Rebuilds board and enemies from the static definition of `index`.
    fn load_level(&mut self, index: usize) {
        let catalog = Rc::clone(&self.catalog);
        let Some(level) = catalog.level(index) else {
            return;
        };
        let (board, enemies) = Board::load(
            level,
            self.config.turn_timer_max_secs,
            &mut self.next_enemy_id,
            &mut self.rng,
        );
        self.level = index;
        self.board = board;
        self.enemies = enemies;
        self.attacks.clear();
    }

    fn start_of(&self, index: usize) -> GridPosition {
        self.catalog
            .level(index)
            .map(|l| l.start)
            .or_else(|| GridPosition::new(self.config.initial_position))
            .unwrap_or(self.player.position)
    }

    /// One grid step. Facing changes even when the step is rejected.
    pub fn move_player(&mut self, dir: Direction, now_ms: f64) -> Result<Vec<GameEvent>, Rejection> {
        self.ensure_playing()?;
        self.player.facing = dir;
        let target = plan_step(&self.board, self.player.position, dir)?;
        let mut events = Vec::new();
        let to = match target {
            StepTarget::Exit(_) => {
                if !self.enemies.is_empty() {
                    self.raise_locked_exit(now_ms);
                    return Err(Rejection::LevelLocked);
                }
                self.advance_level(&mut events);
                return Ok(events);
            }
            StepTarget::Door(to) => {
                if self.board.consume_door(to) {
                    events.push(GameEvent::DoorOpened { at: to });
                }
                to
            }
            StepTarget::Floor(to) => to,
        };
        self.player.position = to;
        events.push(GameEvent::Moved { to });
        self.check_contact(now_ms, &mut events);
        Ok(events)
    }

    fn raise_locked_exit(&mut self, now_ms: f64) {
        self.flash_until = Some(now_ms + self.config.locked_flash_ms);
        self.notice = Some(Notice {
            text: Rejection::LevelLocked.to_string(),
            tone: NoticeTone::Warning,
            expires_at: now_ms + self.config.locked_notice_ms,
        });
    }

    /// Player keeps its cell; the level changes underneath it. A cell that
    /// is solid in the new layout sends the player to the level start.
    fn advance_level(&mut self, events: &mut Vec<GameEvent>) {
        let total = self.level_count();
        self.progress.record_completion(self.level, total);
        events.push(GameEvent::LevelCompleted {
            level: self.level,
            all_completed: self.progress.all_completed(),
        });
        let next = next_level(self.level, total);
        self.load_level(next);
        if self.board.tile(self.player.position).is_blocking() {
            self.player.position = self.start_of(next);
        }
        events.push(GameEvent::LevelEntered { level: next });
    }

    fn check_contact(&mut self, now_ms: f64, events: &mut Vec<GameEvent>) {
        if touches_enemy(&self.enemies, self.player.position) {
            self.take_hit(now_ms, events);
        }
    }

    fn take_hit(&mut self, now_ms: f64, events: &mut Vec<GameEvent>) {
        let amount = damage_for_level(self.config.base_damage, self.level);
        let Some(damage) = apply_damage(&mut self.player, amount, now_ms, self.config.invulnerability_ms) else {
            return;
        };
        events.push(GameEvent::PlayerHit {
            damage,
            health: self.player.health,
        });
        if self.player.health == 0 {
            self.phase = Phase::GameOver;
            self.notice = Some(Notice {
                text: format!("Game Over! Final Score: {}", self.score),
                tone: NoticeTone::Info,
                expires_at: now_ms + self.config.game_over_notice_ms,
            });
            events.push(GameEvent::GameOver { score: self.score });
        }
    }

    /// Strikes the cell in front of the player; removes at most one enemy.
    pub fn attack(&mut self, now_ms: f64) -> Result<Vec<GameEvent>, Rejection> {
        self.ensure_playing()?;
        let at = attack_target(&self.player)?;
        self.attacks.push(AttackEffect {
            cell: at,
            expires_at: now_ms + self.config.attack_effect_ms,
        });
        let slain = strike(&mut self.enemies, at).map(|e| e.id());
        if slain.is_some() {
            self.score += 1;
        }
        Ok(vec![GameEvent::Attacked { at, slain }])
    }

    /// Back to level 0 with a fresh player. Progress and settings survive.
    pub fn restart(&mut self) -> Vec<GameEvent> {
        self.score = 0;
        self.phase = Phase::Playing;
        self.notice = None;
        self.flash_until = None;
        self.last_frame_at = None;
        self.player = Player::new(self.start_of(0), self.config.max_health);
        self.load_level(0);
        vec![GameEvent::Restarted, GameEvent::LevelEntered { level: 0 }]
    }

    /// Jumps to any level once all of them have been completed.
    pub fn select_level(&mut self, index: usize) -> Result<Vec<GameEvent>, Rejection> {
        self.ensure_playing()?;
        self.progress.check_selection(index, self.level_count())?;
        self.load_level(index);
        self.player.position = self.start_of(index);
        self.player.facing = Direction::Right;
        self.notice = None;
        self.flash_until = None;
        Ok(vec![GameEvent::LevelEntered { level: index }])
    }

    /// Clamps into the configured range. Returns the multiplier in effect.
    pub fn set_enemy_speed(&mut self, multiplier: f64) -> Result<f64, Rejection> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(Rejection::InvalidSpeed(multiplier));
        }
        let speed = multiplier.clamp(self.config.min_enemy_speed, self.config.max_enemy_speed);
        self.settings.enemy_speed = speed;
        Ok(speed)
    }

    pub fn set_control_scheme(&mut self, scheme: ControlScheme) {
        self.settings.control_scheme = scheme;
    }

    /// Per-frame update driven by the display refresh. Long gaps (a
    /// backgrounded tab) are dropped rather than simulated.
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.expire_transients(now_ms);
        let previous = self.last_frame_at.replace(now_ms);
        if self.is_over() {
            return events;
        }
        let Some(previous) = previous else {
            return events;
        };
        let dt = (now_ms - previous) / 1000.0;
        if dt < 0.0 || dt > self.config.max_frame_delta_secs {
            return events;
        }
        let speeds = EnemySpeeds {
            slicer: self.config.slicer_speed,
            skeletor: self.config.skeletor_speed,
            multiplier: self.settings.enemy_speed,
            turn_timer_max: self.config.turn_timer_max_secs,
        };
        move_enemies(&mut self.enemies, &self.board, dt, speeds, &mut self.rng);
        self.check_contact(now_ms, &mut events);
        if !self.is_over() && try_regenerate(&mut self.player, now_ms, self.config.regen_delay_ms) {
            events.push(GameEvent::Regenerated {
                health: self.player.health,
            });
        }
        events
    }

    fn expire_transients(&mut self, now_ms: f64) {
        if self.notice.as_ref().is_some_and(|n| now_ms >= n.expires_at) {
            self.notice = None;
        }
        if self.flash_until.is_some_and(|t| now_ms >= t) {
            self.flash_until = None;
        }
        self.attacks.retain(|a| now_ms < a.expires_at);
    }

    pub fn is_flashing(&self, now_ms: f64) -> bool {
        self.flash_until.is_some_and(|t| now_ms < t)
    }

    pub fn snapshot(&self, now_ms: f64) -> Snapshot {
        Snapshot {
            score: self.score,
            level: self.display_level(),
            enemy_count: self.enemy_count(),
            player_cell: self.player.position,
            facing: self.player.facing,
            hearts: self.player.hearts(),
            enemies: self
                .enemies
                .iter()
                .map(|e| {
                    let (x, y) = e.position();
                    (e.kind(), x, y)
                })
                .collect(),
            completed: self.progress.completed().clone(),
            all_completed: self.progress.all_completed(),
            phase: self.phase,
            notice: self
                .notice
                .as_ref()
                .filter(|n| now_ms < n.expires_at)
                .map(|n| (n.text.clone(), n.expires_at - now_ms)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::grid::Tile;

    const CLEAR: [&str; 9] = [
        "ycc)cc^ccw",
        "a        b",
        "a        b",
        "a    (   b",
        "%        b",
        "a        b",
        "a        b",
        "a        b",
        "xdd)dd)ddz",
    ];

    const GUARDED: [&str; 9] = [
        "yccccccccw",
        "a        b",
        "a        b",
        "a        b",
        "         b",
        "a    $   b",
        "a      * b",
        "a        b",
        "xddddddddz",
    ];

    fn session() -> GameSession {
        let catalog = LevelCatalog::from_rows(
            GameConfig::default(),
            &[("clear", &CLEAR[..]), ("guarded", &GUARDED[..])],
        )
        .unwrap();
        GameSession::new(catalog, 7).unwrap()
    }

    fn cell(x: i32, y: i32) -> GridPosition {
        GridPosition::from_xy(x, y).unwrap()
    }

    #[test]
    fn starts_on_level_zero_with_full_health() {
        let s = session();
        assert_eq!(s.display_level(), 1);
        assert_eq!(s.player.position.index(), 40);
        assert_eq!(s.player.facing, Direction::Right);
        assert_eq!(s.player.hearts(), (3, 0));
        assert_eq!(s.enemy_count(), 0);
        assert_eq!(s.phase, Phase::Playing);
    }

    #[test]
    fn door_under_start_is_consumed_on_reentry() {
        let mut s = session();
        assert_eq!(s.board.tile(cell(0, 4)), Tile::LeftDoor);
        s.move_player(Direction::Right, 0.0).unwrap();
        let events = s.move_player(Direction::Left, 0.0).unwrap();
        assert_eq!(
            events,
            vec![GameEvent::DoorOpened { at: cell(0, 4) }, GameEvent::Moved { to: cell(0, 4) }]
        );
        assert_eq!(s.board.tile(cell(0, 4)), Tile::Empty);
        s.move_player(Direction::Right, 0.0).unwrap();
        let events = s.move_player(Direction::Left, 0.0).unwrap();
        assert_eq!(events, vec![GameEvent::Moved { to: cell(0, 4) }]);
    }

    #[test]
    fn rejected_step_only_turns_the_player() {
        let mut s = session();
        assert_eq!(s.move_player(Direction::Left, 0.0), Err(Rejection::OutOfBounds));
        assert_eq!(s.player.facing, Direction::Left);
        assert_eq!(s.player.position.index(), 40);
        assert_eq!(s.move_player(Direction::Up, 0.0), Err(Rejection::Blocked));
        assert_eq!(s.player.facing, Direction::Up);
        assert_eq!(s.player.position.index(), 40);
    }

    #[test]
    fn exit_with_enemies_is_locked_and_raises_notice() {
        let mut s = session();
        s.enemies.push(Enemy::slicer(EnemyId(99), 8, 7));
        s.player.position = cell(6, 1);
        assert_eq!(s.move_player(Direction::Up, 100.0), Err(Rejection::LevelLocked));
        assert_eq!(s.level, 0);
        assert_eq!(s.player.position, cell(6, 1));
        assert!(s.is_flashing(300.0));
        assert!(!s.is_flashing(400.0));
        let snap = s.snapshot(1100.0);
        assert_eq!(snap.notice, Some(("Defeat all enemies first!".to_string(), 1000.0)));
        s.frame(2100.0);
        assert_eq!(s.notice, None);
    }

    #[test]
    fn clear_exit_advances_and_keeps_player_cell() {
        let mut s = session();
        s.player.position = cell(6, 1);
        let events = s.move_player(Direction::Up, 0.0).unwrap();
        assert_eq!(
            events,
            vec![
                GameEvent::LevelCompleted { level: 0, all_completed: false },
                GameEvent::LevelEntered { level: 1 },
            ]
        );
        assert_eq!(s.level, 1);
        assert_eq!(s.player.position, cell(6, 1));
        assert_eq!(s.enemy_count(), 1);
        assert!(s.progress.is_completed(0));
    }

    #[test]
    fn attack_removes_enemy_and_scores() {
        let mut s = session();
        s.enemies.push(Enemy::slicer(EnemyId(50), 1, 4));
        let events = s.attack(0.0).unwrap();
        assert_eq!(
            events,
            vec![GameEvent::Attacked { at: cell(1, 4), slain: Some(EnemyId(50)) }]
        );
        assert_eq!(s.score, 1);
        assert_eq!(s.enemy_count(), 0);
        assert_eq!(s.attacks.len(), 1);
        s.frame(999.0);
        assert_eq!(s.attacks.len(), 1);
        s.frame(1000.0);
        assert!(s.attacks.is_empty());
    }

    #[test]
    fn attack_off_grid_is_rejected() {
        let mut s = session();
        s.player.facing = Direction::Left;
        assert_eq!(s.attack(0.0), Err(Rejection::OutOfBounds));
        assert!(s.attacks.is_empty());
    }

    #[test]
    fn first_frame_and_long_gaps_are_skipped() {
        let mut s = session();
        s.enemies.push(Enemy::slicer(EnemyId(1), 5, 6));
        s.frame(1000.0);
        assert_eq!(s.enemies[0].position(), (5.0, 6.0));
        s.frame(1250.0);
        assert_eq!(s.enemies[0].position(), (5.0, 6.0));
        s.frame(1300.0);
        assert!((s.enemies[0].position().0 - 4.9).abs() < 1e-9);
    }

    #[test]
    fn enemy_walking_into_player_deals_damage_then_game_over() {
        let mut s = session();
        s.player.health = 1;
        // pinned against the left edge, so it bounces in place on the player
        s.enemies.push(Enemy::slicer(EnemyId(1), 0, 4));
        s.frame(0.0);
        let events = s.frame(16.0);
        assert_eq!(
            events,
            vec![
                GameEvent::PlayerHit { damage: 1, health: 0 },
                GameEvent::GameOver { score: 0 },
            ]
        );
        assert!(s.is_over());
        assert_eq!(s.move_player(Direction::Right, 20.0), Err(Rejection::SessionOver));
        assert_eq!(s.attack(20.0), Err(Rejection::SessionOver));
        let frozen = s.enemies.clone();
        s.frame(32.0);
        assert_eq!(s.enemies, frozen);
        assert_eq!(
            s.snapshot(32.0).notice.map(|(t, _)| t),
            Some("Game Over! Final Score: 0".to_string())
        );
    }

    #[test]
    fn damage_grows_with_level() {
        let mut s = session();
        s.level = 5;
        s.enemies.push(Enemy::slicer(EnemyId(1), 1, 4));
        s.player.position = cell(2, 4);
        let events = s.move_player(Direction::Left, 0.0).unwrap();
        assert!(events.contains(&GameEvent::PlayerHit { damage: 3, health: 0 }));
    }

    #[test]
    fn regen_ticks_from_frames() {
        let mut s = session();
        s.player.health = 2;
        s.frame(0.0);
        assert_eq!(s.frame(16.0), vec![GameEvent::Regenerated { health: 3 }]);
        assert!(s.frame(32.0).is_empty());
    }

    #[test]
    fn speed_is_validated_and_clamped() {
        let mut s = session();
        assert_eq!(s.set_enemy_speed(2.0), Ok(2.0));
        assert_eq!(s.set_enemy_speed(10.0), Ok(3.0));
        assert_eq!(s.set_enemy_speed(0.1), Ok(0.25));
        assert_eq!(s.settings.enemy_speed, 0.25);
        assert!(matches!(s.set_enemy_speed(0.0), Err(Rejection::InvalidSpeed(_))));
        assert!(matches!(s.set_enemy_speed(f64::NAN), Err(Rejection::InvalidSpeed(_))));
        assert_eq!(s.settings.enemy_speed, 0.25);
        s.set_control_scheme(ControlScheme::Wasd);
        assert_eq!(s.settings.control_scheme, ControlScheme::Wasd);
    }

    #[test]
    fn empty_catalog_cannot_start_a_session() {
        let catalog = LevelCatalog {
            config: GameConfig::default(),
            levels: Vec::new(),
        };
        assert!(matches!(GameSession::new(catalog, 0), Err(CatalogError::Empty)));
    }
}
