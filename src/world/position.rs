use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: u16,
    pub y: u16,
    pub z: i8,
}

/// Eight-way facing. The discriminants are the protocol values, with the run
/// bit carried separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    #[default]
    North = 0,
    Northeast = 1,
    East = 2,
    Southeast = 3,
    South = 4,
    Southwest = 5,
    West = 6,
    Northwest = 7,
}

pub const DIRECTION_MASK: u8 = 0x07;
pub const RUNNING_BIT: u8 = 0x80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionDelta {
    pub dx: i16,
    pub dy: i16,
    pub dz: i8,
}

impl Position {
    pub const fn new(x: u16, y: u16, z: i8) -> Self {
        Self { x, y, z }
    }

    pub fn offset(self, delta: PositionDelta) -> Option<Self> {
        let x = i32::from(self.x) + i32::from(delta.dx);
        let y = i32::from(self.y) + i32::from(delta.dy);
        let z = i16::from(self.z) + i16::from(delta.dz);

        if x < 0 || y < 0 {
            return None;
        }

        if x > i32::from(u16::MAX) || y > i32::from(u16::MAX) {
            return None;
        }

        if z < i16::from(i8::MIN) || z > i16::from(i8::MAX) {
            return None;
        }

        Some(Self {
            x: x as u16,
            y: y as u16,
            z: z as i8,
        })
    }

    /// The tile one step away in `direction`, keeping the current Z.
    pub fn step(self, direction: Direction) -> Option<Self> {
        self.offset(direction.delta())
    }

    pub fn same_tile(self, other: Position) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// True when `other` is one of the eight neighbouring tiles.
    pub fn is_adjacent(self, other: Position) -> bool {
        let dx = (i32::from(self.x) - i32::from(other.x)).abs();
        let dy = (i32::from(self.y) - i32::from(other.y)).abs();
        dx <= 1 && dy <= 1 && dx + dy != 0
    }

    /// Direction of travel from `self` towards `target`, by the signs of the
    /// tile deltas. `None` when both tiles are the same.
    pub fn direction_to(self, target: Position) -> Option<Direction> {
        let dx = i32::from(target.x) - i32::from(self.x);
        let dy = i32::from(target.y) - i32::from(self.y);
        let direction = match (dx.signum(), dy.signum()) {
            (0, 0) => return None,
            (0, -1) => Direction::North,
            (1, -1) => Direction::Northeast,
            (1, 0) => Direction::East,
            (1, 1) => Direction::Southeast,
            (0, 1) => Direction::South,
            (-1, 1) => Direction::Southwest,
            (-1, 0) => Direction::West,
            _ => Direction::Northwest,
        };
        Some(direction)
    }
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::Northeast,
        Direction::East,
        Direction::Southeast,
        Direction::South,
        Direction::Southwest,
        Direction::West,
        Direction::Northwest,
    ];

    /// Decodes a protocol byte, ignoring the run bit and any high garbage.
    pub fn from_byte(value: u8) -> Self {
        Self::ALL[usize::from(value & DIRECTION_MASK)]
    }

    pub fn as_byte(self) -> u8 {
        self as u8
    }

    pub fn with_run(self, run: bool) -> u8 {
        if run {
            self.as_byte() | RUNNING_BIT
        } else {
            self.as_byte()
        }
    }

    pub fn delta(self) -> PositionDelta {
        match self {
            Direction::North => PositionDelta { dx: 0, dy: -1, dz: 0 },
            Direction::Northeast => PositionDelta { dx: 1, dy: -1, dz: 0 },
            Direction::East => PositionDelta { dx: 1, dy: 0, dz: 0 },
            Direction::Southeast => PositionDelta { dx: 1, dy: 1, dz: 0 },
            Direction::South => PositionDelta { dx: 0, dy: 1, dz: 0 },
            Direction::Southwest => PositionDelta { dx: -1, dy: 1, dz: 0 },
            Direction::West => PositionDelta { dx: -1, dy: 0, dz: 0 },
            Direction::Northwest => PositionDelta { dx: -1, dy: -1, dz: 0 },
        }
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::Northeast
                | Direction::Northwest
                | Direction::Southeast
                | Direction::Southwest
        )
    }
}
