//! Player, enemies and attack effects. Pure data; nothing here knows about
//! the DOM or the canvas.

use super::grid::{GridPosition, round_cell};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub position: GridPosition,
    pub facing: Direction,
    pub health: u32,
    pub max_health: u32,
    /// Hits landing before this timestamp (ms) are ignored.
    pub invulnerable_until: Option<f64>,
    pub last_damage_at: Option<f64>,
    pub last_regen_at: Option<f64>,
}

impl Player {
    pub fn new(position: GridPosition, max_health: u32) -> Self {
        Self {
            position,
            facing: Direction::Right,
            health: max_health,
            max_health,
            invulnerable_until: None,
            last_damage_at: None,
            last_regen_at: None,
        }
    }

    pub fn is_invulnerable(&self, now_ms: f64) -> bool {
        self.invulnerable_until.is_some_and(|until| now_ms < until)
    }

    /// Heart counts for the HUD as `(filled, empty)`.
    pub fn hearts(&self) -> (u32, u32) {
        (self.health, self.max_health.saturating_sub(self.health))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Slicer,
    Skeletor,
}

impl EnemyKind {
    pub fn from_marker(ch: char) -> Option<Self> {
        match ch {
            '*' => Some(EnemyKind::Slicer),
            '}' => Some(EnemyKind::Skeletor),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Enemy {
    /// Sweeps horizontally; `x` is continuous, `y` is a row.
    Slicer {
        id: EnemyId,
        x: f64,
        y: i32,
        direction: i8,
    },
    /// Patrols vertically and turns around whenever its timer runs out.
    Skeletor {
        id: EnemyId,
        x: i32,
        y: f64,
        direction: i8,
        turn_timer: f64,
    },
}

impl Enemy {
    pub fn slicer(id: EnemyId, x: i32, y: i32) -> Self {
        Enemy::Slicer {
            id,
            x: f64::from(x),
            y,
            direction: -1,
        }
    }

    pub fn skeletor(id: EnemyId, x: i32, y: i32, turn_timer: f64) -> Self {
        Enemy::Skeletor {
            id,
            x,
            y: f64::from(y),
            direction: -1,
            turn_timer,
        }
    }

    pub fn id(&self) -> EnemyId {
        match *self {
            Enemy::Slicer { id, .. } | Enemy::Skeletor { id, .. } => id,
        }
    }

    pub fn kind(&self) -> EnemyKind {
        match self {
            Enemy::Slicer { .. } => EnemyKind::Slicer,
            Enemy::Skeletor { .. } => EnemyKind::Skeletor,
        }
    }

    pub fn direction(&self) -> i8 {
        match *self {
            Enemy::Slicer { direction, .. } | Enemy::Skeletor { direction, .. } => direction,
        }
    }

    /// Continuous position in tile units.
    pub fn position(&self) -> (f64, f64) {
        match *self {
            Enemy::Slicer { x, y, .. } => (x, f64::from(y)),
            Enemy::Skeletor { x, y, .. } => (f64::from(x), y),
        }
    }

    /// The cell this enemy counts as occupying.
    pub fn cell(&self) -> (i32, i32) {
        let (x, y) = self.position();
        (round_cell(x), round_cell(y))
    }

    pub fn occupies(&self, pos: GridPosition) -> bool {
        self.cell() == (pos.x(), pos.y())
    }
}

/// Short-lived attack marker; it only resolves hits at the moment it spawns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackEffect {
    pub cell: GridPosition,
    pub expires_at: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hearts_split_filled_and_empty() {
        let mut p = Player::new(GridPosition::new(40).unwrap(), 3);
        assert_eq!(p.hearts(), (3, 0));
        p.health = 1;
        assert_eq!(p.hearts(), (1, 2));
    }

    #[test]
    fn invulnerability_window_is_half_open() {
        let mut p = Player::new(GridPosition::new(40).unwrap(), 3);
        assert!(!p.is_invulnerable(0.0));
        p.invulnerable_until = Some(1000.0);
        assert!(p.is_invulnerable(999.9));
        assert!(!p.is_invulnerable(1000.0));
    }

    #[test]
    fn occupancy_rounds_the_moving_axis() {
        let pos = GridPosition::from_xy(4, 4).unwrap();
        let mut slicer = Enemy::slicer(EnemyId(1), 4, 4);
        assert!(slicer.occupies(pos));
        if let Enemy::Slicer { x, .. } = &mut slicer {
            *x = 4.49;
        }
        assert!(slicer.occupies(pos));
        if let Enemy::Slicer { x, .. } = &mut slicer {
            *x = 3.5;
        }
        assert!(slicer.occupies(pos));
        if let Enemy::Slicer { x, .. } = &mut slicer {
            *x = 3.49;
        }
        assert!(!slicer.occupies(pos));

        let skel = Enemy::skeletor(EnemyId(2), 4, 5, 1.0);
        assert_eq!(skel.cell(), (4, 5));
        assert_eq!(skel.kind(), EnemyKind::Skeletor);
    }
}
