//! 玩家状态

use serde::{Deserialize, Serialize};

use crate::constants::FENCES_PER_PLAYER;
use crate::position::{PlayerId, Position};

/// 玩家信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// 棋子当前位置
    pawn: Position,
    /// 剩余挡板数
    fences: u8,
}

impl Player {
    /// 在起始位置创建玩家
    pub fn new(id: PlayerId) -> Self {
        Self::at(id, id.start_position())
    }

    /// 在指定位置创建玩家
    pub fn at(id: PlayerId, pawn: Position) -> Self {
        Self {
            id,
            pawn,
            fences: FENCES_PER_PLAYER,
        }
    }

    pub fn pawn(&self) -> Position {
        self.pawn
    }

    pub fn set_pawn(&mut self, pos: Position) {
        self.pawn = pos;
    }

    pub fn fences(&self) -> u8 {
        self.fences
    }

    /// 用掉一块挡板（调用方已检查余量）
    pub fn use_fence(&mut self) {
        self.fences = self.fences.saturating_sub(1);
    }

    /// 是否已到达目标行
    pub fn has_reached_goal(&self) -> bool {
        self.pawn.y == self.id.goal_row()
    }
}
