//! Core game model. Everything in here is plain data plus the reducer that
//! the yew components dispatch into; none of it touches the DOM.

pub mod combat;
pub mod entity;
pub mod error;
pub mod grid;
pub mod input;
pub mod movement;
pub mod progression;
pub mod session;

use std::rc::Rc;

use yew::Reducible;

pub use entity::{AttackEffect, Direction, Enemy, EnemyId, EnemyKind, Player};
pub use error::Rejection;
pub use grid::{Board, GRID_HEIGHT, GRID_WIDTH, GridPosition, Level, Tile};
pub use input::{ControlScheme, InputCommand};
pub use session::{GameEvent, GameSession, Notice, NoticeTone, Phase, Settings, Snapshot};

use crate::util::clog;

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum GameAction {
    Move { dir: Direction, now_ms: f64 },
    Attack { now_ms: f64 },
    Restart,
    SelectLevel { index: usize },
    SetEnemySpeed(f64),
    SetControlScheme(ControlScheme),
    /// Called once per animation frame.
    Frame { now_ms: f64 },
}

impl GameSession {
    /// Applies one action in place and logs what came of it.
    pub fn apply(&mut self, action: GameAction) {
        use GameAction::*;
        let outcome = match action {
            Move { dir, now_ms } => self.move_player(dir, now_ms),
            Attack { now_ms } => self.attack(now_ms),
            Restart => Ok(self.restart()),
            SelectLevel { index } => self.select_level(index),
            SetEnemySpeed(multiplier) => self.set_enemy_speed(multiplier).map(|speed| {
                clog(&format!("enemy speed set to {speed:.2}x"));
                Vec::new()
            }),
            SetControlScheme(scheme) => {
                self.set_control_scheme(scheme);
                clog(&format!("control scheme: {}", scheme.label()));
                Ok(Vec::new())
            }
            Frame { now_ms } => Ok(self.frame(now_ms)),
        };
        match outcome {
            Ok(events) => {
                for event in events {
                    clog(&format!("{event:?}"));
                }
            }
            Err(rejection) => clog(&format!("rejected: {rejection}")),
        }
    }
}

impl Reducible for GameSession {
    type Action = GameAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        new.apply(action);
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LevelCatalog;

    #[test]
    fn reducer_returns_updated_copy() {
        let session = Rc::new(GameSession::new(LevelCatalog::bundled().unwrap(), 3).unwrap());
        let next = Rc::clone(&session).reduce(GameAction::Move {
            dir: Direction::Right,
            now_ms: 0.0,
        });
        assert_eq!(session.player.position.index(), 40);
        assert_eq!(next.player.position.index(), 41);
        let turned = Rc::clone(&next).reduce(GameAction::SetControlScheme(ControlScheme::Wasd));
        assert_eq!(turned.settings.control_scheme, ControlScheme::Wasd);
        assert_eq!(turned.player.position.index(), 41);
    }

    #[test]
    fn rejected_actions_keep_state() {
        let mut session = GameSession::new(LevelCatalog::bundled().unwrap(), 3).unwrap();
        let before = session.clone();
        session.apply(GameAction::SelectLevel { index: 3 });
        assert_eq!(session.level, 0);
        session.apply(GameAction::SetEnemySpeed(-1.0));
        assert_eq!(session.settings.enemy_speed, 1.0);
        assert_eq!(session, before);
    }

    #[test]
    fn sessions_compare_by_value() {
        let session = Rc::new(GameSession::new(LevelCatalog::bundled().unwrap(), 3).unwrap());
        assert_eq!(*session, (*session).clone());
        let moved = Rc::clone(&session).reduce(GameAction::Move {
            dir: Direction::Right,
            now_ms: 0.0,
        });
        assert_ne!(*moved, *session);
        let other_seed = GameSession::new(LevelCatalog::bundled().unwrap(), 4).unwrap();
        assert_ne!(other_seed, *session);
    }
}
