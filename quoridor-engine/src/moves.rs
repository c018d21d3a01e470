//! 走法分类、验证和生成
//!
//! 棋子的位移先被归为四类之一（一步、直跳、斜走、非法），
//! 再交给对应的验证函数。验证按方向参数化，不区分上下左右分别处理。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{Result, RuleError};
use crate::game::GameEngine;
use crate::position::{Direction, Orientation, PlayerId, Position};

/// 所有可能合法的位移：四个一步、四个直跳、四个斜走
const CANDIDATE_OFFSETS: [(i8, i8); 12] = [
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -2),
    (2, 0),
    (0, 2),
    (-2, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// 位移分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// 正交走一格
    Step(Direction),
    /// 正交跳过相邻的对方棋子
    Jump(Direction),
    /// 斜走一格（直跳被挡时的替代）
    Diagonal {
        vertical: Direction,
        horizontal: Direction,
    },
    /// 其他任何位移
    Illegal,
}

impl MoveKind {
    /// 根据起点和终点对位移分类
    pub fn classify(from: Position, to: Position) -> MoveKind {
        let (dx, dy) = from.displacement_to(to);
        match (dx.abs(), dy.abs()) {
            (1, 0) | (0, 1) => Direction::from_delta(dx, dy)
                .map(MoveKind::Step)
                .unwrap_or(MoveKind::Illegal),
            (2, 0) | (0, 2) => Direction::from_delta(dx.signum(), dy.signum())
                .map(MoveKind::Jump)
                .unwrap_or(MoveKind::Illegal),
            (1, 1) => match (Direction::from_delta(0, dy), Direction::from_delta(dx, 0)) {
                (Some(vertical), Some(horizontal)) => MoveKind::Diagonal {
                    vertical,
                    horizontal,
                },
                _ => MoveKind::Illegal,
            },
            _ => MoveKind::Illegal,
        }
    }

    /// 验证棋子从 `from` 走到 `to` 的几何合法性
    ///
    /// 只看挡板和对方棋子的位置，不检查回合、胜负和目标格是否有子。
    pub fn validate(board: &Board, from: Position, opponent: Position, to: Position) -> Result<MoveKind> {
        let kind = Self::classify(from, to);
        match kind {
            MoveKind::Step(dir) => Self::validate_step(board, from, to, dir)?,
            MoveKind::Jump(dir) => Self::validate_jump(board, from, opponent, to, dir)?,
            MoveKind::Diagonal {
                vertical,
                horizontal,
            } => Self::validate_diagonal(board, from, opponent, to, vertical, horizontal)?,
            MoveKind::Illegal => return Err(RuleError::IllegalMove { from, to }),
        }
        Ok(kind)
    }

    fn validate_step(board: &Board, from: Position, to: Position, dir: Direction) -> Result<()> {
        if board.has_fence(from, dir) {
            return Err(RuleError::FenceBlocked { from, to });
        }
        Ok(())
    }

    fn validate_jump(
        board: &Board,
        from: Position,
        opponent: Position,
        to: Position,
        dir: Direction,
    ) -> Result<()> {
        if from.step(dir) != Some(opponent) {
            return Err(RuleError::NoPawnToJump { from, to });
        }
        // 两段都要检查
        if board.has_fence(from, dir) || board.has_fence(opponent, dir) {
            return Err(RuleError::FenceBlocked { from, to });
        }
        Ok(())
    }

    fn validate_diagonal(
        board: &Board,
        from: Position,
        opponent: Position,
        to: Position,
        vertical: Direction,
        horizontal: Direction,
    ) -> Result<()> {
        // 对方可能在竖直方向相邻，也可能在水平方向相邻，两轴对称处理
        for (toward, aside) in [(vertical, horizontal), (horizontal, vertical)] {
            if from.step(toward) != Some(opponent) {
                continue;
            }
            // 只有真正的挡板能逼出斜走，棋盘边缘不算
            if !board.has_fence(opponent, toward) {
                return Err(RuleError::JumpNotBlocked { from, to });
            }
            if board.has_fence(from, toward) || board.has_fence(opponent, aside) {
                return Err(RuleError::FenceBlocked { from, to });
            }
            return Ok(());
        }
        Err(RuleError::NoPawnToJump { from, to })
    }
}

/// 已执行的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// 移动棋子
    Pawn {
        player: PlayerId,
        from: Position,
        to: Position,
    },
    /// 放置挡板
    Fence {
        player: PlayerId,
        orientation: Orientation,
        anchor: Position,
    },
}

impl Action {
    /// 执行动作的玩家
    pub fn player(&self) -> PlayerId {
        match self {
            Action::Pawn { player, .. } | Action::Fence { player, .. } => *player,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Pawn { player, from, to } => write!(f, "{}: {} -> {}", player, from, to),
            Action::Fence {
                player,
                orientation,
                anchor,
            } => write!(f, "{}: fence {} at {}", player, orientation, anchor),
        }
    }
}

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成指定玩家的所有合法落点（不考虑当前轮到谁）
    pub fn pawn_moves(engine: &GameEngine, player: PlayerId) -> Vec<Position> {
        let from = engine.player(player).pawn();
        CANDIDATE_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| from.offset(dx, dy))
            .filter(|&to| engine.check_pawn_move(player, to).is_ok())
            .collect()
    }

    /// 生成指定玩家的所有合法挡板放置（不考虑当前轮到谁）
    pub fn fence_placements(engine: &GameEngine, player: PlayerId) -> Vec<(Orientation, Position)> {
        let mut placements = Vec::new();
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            for anchor in Position::all() {
                if engine.check_fence(player, orientation, anchor).is_ok() {
                    placements.push((orientation, anchor));
                }
            }
        }
        placements
    }
}
