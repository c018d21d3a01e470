//! 错误类型定义

use thiserror::Error;

use crate::position::{Orientation, PlayerId, Position};

/// 规则错误
///
/// 每种拒绝原因一个变体。返回任何错误时引擎状态保持不变。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    /// 游戏已结束
    #[error("Game is already over: {winner} has won")]
    GameOver { winner: PlayerId },

    /// 不是你的回合
    #[error("Not your turn: waiting for {expected}")]
    NotYourTurn { expected: PlayerId },

    /// 无效的玩家编号
    #[error("Invalid player number: {0}")]
    InvalidPlayer(u8),

    /// 坐标越界
    #[error("Coordinate out of bounds: ({x}, {y})")]
    OutOfBounds { x: i32, y: i32 },

    /// 无效的挡板方向
    #[error("Invalid fence orientation: {0:?} (expected \"h\" or \"v\")")]
    InvalidOrientation(String),

    /// 摆局面时棋子已在自己的目标行
    #[error("{player} pawn at {pawn} already stands on its goal row")]
    AlreadyAtGoal { player: PlayerId, pawn: Position },

    /// 目标格已有棋子
    #[error("Cell {0} is already occupied")]
    Occupied(Position),

    /// 挡板用完
    #[error("{player} has no fences left")]
    NoFencesLeft { player: PlayerId },

    /// 挡板放在棋盘外边缘
    #[error("Cannot place {orientation} fence at {anchor}: board edge")]
    EdgeFence {
        anchor: Position,
        orientation: Orientation,
    },

    /// 该位置已有挡板
    #[error("A {orientation} fence already exists at {anchor}")]
    FenceExists {
        anchor: Position,
        orientation: Orientation,
    },

    /// 位移不是一步、跳跃或斜走
    #[error("Illegal move: from {from} to {to}")]
    IllegalMove { from: Position, to: Position },

    /// 路径被挡板阻挡
    #[error("Move from {from} to {to} is blocked by a fence")]
    FenceBlocked { from: Position, to: Position },

    /// 跳跃或斜走时中间没有对方棋子
    #[error("No opponent pawn to jump from {from} to {to}")]
    NoPawnToJump { from: Position, to: Position },

    /// 直跳未被挡住，不允许斜走
    #[error("Diagonal move from {from} to {to} is only allowed when the straight jump is fenced off")]
    JumpNotBlocked { from: Position, to: Position },
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, RuleError>;
