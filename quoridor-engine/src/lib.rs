//! 步步为营（Quoridor）规则引擎
//!
//! 包含:
//! - 坐标、方向、玩家编号等基础类型
//! - 棋盘、格子与挡板状态
//! - 走法分类、验证和生成（一步、直跳、斜走）
//! - 对局控制：回合轮换、挡板放置、胜负判定

mod board;
mod constants;
mod error;
mod game;
mod moves;
mod player;
mod position;

pub use board::{Board, Border, Cell};
pub use constants::*;
pub use error::{Result, RuleError};
pub use game::{GameEngine, GameStatus, MoveOutcome};
pub use moves::{Action, MoveGenerator, MoveKind};
pub use player::Player;
pub use position::{Coord, Direction, Orientation, PlayerId, Position};
