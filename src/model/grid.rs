//! Tile grid: static level layouts and the per-run board built from them.

use rand::Rng;

use super::entity::{Direction, Enemy, EnemyId, EnemyKind};

pub const GRID_WIDTH: usize = 10;
pub const GRID_HEIGHT: usize = 9;
pub const GRID_CELLS: usize = GRID_WIDTH * GRID_HEIGHT;

/// Row-major cell index, always inside the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPosition(usize);

impl GridPosition {
    pub fn new(index: usize) -> Option<Self> {
        (index < GRID_CELLS).then_some(Self(index))
    }

    pub fn from_xy(x: i32, y: i32) -> Option<Self> {
        if in_bounds(x, y) {
            Some(Self(y as usize * GRID_WIDTH + x as usize))
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn x(self) -> i32 {
        (self.0 % GRID_WIDTH) as i32
    }

    pub fn y(self) -> i32 {
        (self.0 / GRID_WIDTH) as i32
    }

    /// The neighbouring cell in `dir`, or `None` past the grid edge.
    pub fn step(self, dir: Direction) -> Option<Self> {
        let (dx, dy) = dir.delta();
        Self::from_xy(self.x() + dx, self.y() + dy)
    }
}

pub fn in_bounds(x: i32, y: i32) -> bool {
    x >= 0 && y >= 0 && (x as usize) < GRID_WIDTH && (y as usize) < GRID_HEIGHT
}

/// Nearest cell for a continuous coordinate. Halves round up, so 2.5 -> 3.
pub fn round_cell(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallSegment {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decoration {
    Lanterns,
    FirePot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Wall(WallSegment),
    /// Opens for good the first time the player walks onto it.
    LeftDoor,
    /// Exit; only usable once the level is cleared.
    TopDoor,
    /// Exit; only usable once the level is cleared.
    Stairs,
    Decoration(Decoration),
}

impl Tile {
    /// Map character to tile. Enemy markers sit on empty floor.
    pub fn from_char(ch: char) -> Option<Tile> {
        use WallSegment::*;
        let tile = match ch {
            ' ' | '*' | '}' => Tile::Empty,
            'a' => Tile::Wall(Left),
            'b' => Tile::Wall(Right),
            'c' => Tile::Wall(Top),
            'd' => Tile::Wall(Bottom),
            'w' => Tile::Wall(TopRight),
            'x' => Tile::Wall(BottomLeft),
            'y' => Tile::Wall(TopLeft),
            'z' => Tile::Wall(BottomRight),
            '%' => Tile::LeftDoor,
            '^' => Tile::TopDoor,
            '$' => Tile::Stairs,
            ')' => Tile::Decoration(Decoration::Lanterns),
            '(' => Tile::Decoration(Decoration::FirePot),
            _ => return None,
        };
        Some(tile)
    }

    pub fn is_blocking(self) -> bool {
        matches!(self, Tile::Wall(_) | Tile::Decoration(_))
    }

    pub fn is_exit(self) -> bool {
        matches!(self, Tile::TopDoor | Tile::Stairs)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spawn {
    pub kind: EnemyKind,
    pub x: i32,
    pub y: i32,
}

/// Immutable level definition parsed from the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    pub name: String,
    pub tiles: Vec<Tile>,
    pub start: GridPosition,
    pub spawns: Vec<Spawn>,
}

impl Level {
    /// `chars` must hold `GRID_CELLS` characters already accepted by
    /// [`Tile::from_char`]; anything else reads as empty floor.
    pub fn from_chars(name: String, chars: &[char], start: GridPosition) -> Self {
        let mut tiles = Vec::with_capacity(GRID_CELLS);
        let mut spawns = Vec::new();
        for (i, &ch) in chars.iter().take(GRID_CELLS).enumerate() {
            tiles.push(Tile::from_char(ch).unwrap_or(Tile::Empty));
            if let Some(kind) = EnemyKind::from_marker(ch) {
                spawns.push(Spawn {
                    kind,
                    x: (i % GRID_WIDTH) as i32,
                    y: (i / GRID_WIDTH) as i32,
                });
            }
        }
        tiles.resize(GRID_CELLS, Tile::Empty);
        Self {
            name,
            tiles,
            start,
            spawns,
        }
    }

    pub fn tile_at(&self, pos: GridPosition) -> Tile {
        self.tiles[pos.index()]
    }
}

/// Live tile layer for the active level. Only left doors ever change.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    tiles: Vec<Tile>,
}

impl Board {
    /// Materializes a level: fresh tiles plus its enemies, ids starting at
    /// `*next_id`. Skeletor turn timers come from `rng`.
    pub fn load<R: Rng + ?Sized>(
        level: &Level,
        turn_timer_max: f64,
        next_id: &mut u32,
        rng: &mut R,
    ) -> (Board, Vec<Enemy>) {
        let enemies = level
            .spawns
            .iter()
            .map(|spawn| {
                let id = EnemyId(*next_id);
                *next_id += 1;
                match spawn.kind {
                    EnemyKind::Slicer => Enemy::slicer(id, spawn.x, spawn.y),
                    EnemyKind::Skeletor => {
                        let timer = draw_turn_timer(turn_timer_max, rng);
                        Enemy::skeletor(id, spawn.x, spawn.y, timer)
                    }
                }
            })
            .collect();
        (
            Board {
                tiles: level.tiles.clone(),
            },
            enemies,
        )
    }

    pub fn classify(&self, x: i32, y: i32) -> Option<Tile> {
        GridPosition::from_xy(x, y).map(|p| self.tiles[p.index()])
    }

    pub fn tile(&self, pos: GridPosition) -> Tile {
        self.tiles[pos.index()]
    }

    /// Outside the grid counts as blocking.
    pub fn is_blocking(&self, x: i32, y: i32) -> bool {
        self.classify(x, y).is_none_or(Tile::is_blocking)
    }

    /// Opens a left door. Returns whether anything changed.
    pub fn consume_door(&mut self, pos: GridPosition) -> bool {
        let tile = &mut self.tiles[pos.index()];
        if *tile == Tile::LeftDoor {
            *tile = Tile::Empty;
            true
        } else {
            false
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

pub(crate) fn draw_turn_timer<R: Rng + ?Sized>(max: f64, rng: &mut R) -> f64 {
    if max > 0.0 { rng.gen_range(0.0..max) } else { 0.0 }
}
