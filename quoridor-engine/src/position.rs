//! 坐标、方向、玩家编号等基础类型

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, MAX_COORD, PLAYER_ONE_START, PLAYER_TWO_START};
use crate::error::RuleError;

/// 未经校验的外部坐标
///
/// 表现层传入的原始 (列, 行)，可能越界或为负。
/// 引擎在回合检查之后才把它转换成 [`Position`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Position> for Coord {
    fn from(pos: Position) -> Self {
        Self {
            x: pos.x as i32,
            y: pos.y as i32,
        }
    }
}

/// 棋盘位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// 列 (0-8)，向右增大
    pub x: u8,
    /// 行 (0-8)，向下增大；第 0 行是玩家 1 的底线
    pub y: u8,
}

impl Position {
    /// 创建新位置
    pub fn new(x: u8, y: u8) -> Option<Self> {
        if x <= MAX_COORD && y <= MAX_COORD {
            Some(Self { x, y })
        } else {
            None
        }
    }

    /// 创建新位置（不检查边界，内部使用）
    pub const fn new_unchecked(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// 检查位置是否在棋盘内
    pub fn is_valid(&self) -> bool {
        self.x <= MAX_COORD && self.y <= MAX_COORD
    }

    /// 获取偏移后的位置
    pub fn offset(&self, dx: i8, dy: i8) -> Option<Position> {
        let new_x = self.x as i8 + dx;
        let new_y = self.y as i8 + dy;
        if new_x >= 0 && (new_x as usize) < BOARD_SIZE && new_y >= 0 && (new_y as usize) < BOARD_SIZE {
            Some(Position {
                x: new_x as u8,
                y: new_y as u8,
            })
        } else {
            None
        }
    }

    /// 沿方向走一格
    pub fn step(&self, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }

    /// 到另一个位置的位移 (dx, dy)
    pub fn displacement_to(&self, other: Position) -> (i8, i8) {
        (
            other.x as i8 - self.x as i8,
            other.y as i8 - self.y as i8,
        )
    }

    /// 遍历棋盘上的所有位置（按行优先）
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE as u8)
            .flat_map(|y| (0..BOARD_SIZE as u8).map(move |x| Position::new_unchecked(x, y)))
    }
}

impl TryFrom<Coord> for Position {
    type Error = RuleError;

    fn try_from(coord: Coord) -> Result<Self, Self::Error> {
        let in_range = |v: i32| (0..BOARD_SIZE as i32).contains(&v);
        if in_range(coord.x) && in_range(coord.y) {
            Ok(Position::new_unchecked(coord.x as u8, coord.y as u8))
        } else {
            Err(RuleError::OutOfBounds {
                x: coord.x,
                y: coord.y,
            })
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 格子的四条边 / 四个移动方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// 上（行号减小）
    Up,
    /// 右（列号增大）
    Right,
    /// 下（行号增大）
    Down,
    /// 左（列号减小）
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// 单位位移
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    /// 从单位位移反查方向
    pub fn from_delta(dx: i8, dy: i8) -> Option<Direction> {
        match (dx, dy) {
            (0, -1) => Some(Direction::Up),
            (1, 0) => Some(Direction::Right),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            _ => None,
        }
    }

    /// 相反方向
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }
}

/// 挡板方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// 横向：挡在锚点格子的上边
    Horizontal,
    /// 纵向：挡在锚点格子的左边
    Vertical,
}

impl Orientation {
    /// 锚点格子上承载挡板的那条边
    pub fn anchor_side(&self) -> Direction {
        match self {
            Orientation::Horizontal => Direction::Up,
            Orientation::Vertical => Direction::Left,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Orientation::Horizontal => 'h',
            Orientation::Vertical => 'v',
        }
    }
}

impl FromStr for Orientation {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h" => Ok(Orientation::Horizontal),
            "v" => Ok(Orientation::Vertical),
            other => Err(RuleError::InvalidOrientation(other.to_string())),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// 玩家编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    /// 玩家 1（先手，从第 0 行出发）
    One,
    /// 玩家 2（后手，从第 8 行出发）
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// 获取对手
    pub fn opponent(&self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// 数字编号 (1 或 2)
    pub fn number(&self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }

    /// 到达即获胜的目标行
    pub fn goal_row(&self) -> u8 {
        match self {
            PlayerId::One => MAX_COORD,
            PlayerId::Two => 0,
        }
    }

    /// 棋子起始位置
    pub fn start_position(&self) -> Position {
        let (x, y) = match self {
            PlayerId::One => PLAYER_ONE_START,
            PlayerId::Two => PLAYER_TWO_START,
        };
        Position::new_unchecked(x, y)
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = RuleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlayerId::One),
            2 => Ok(PlayerId::Two),
            other => Err(RuleError::InvalidPlayer(other)),
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.number())
    }
}
