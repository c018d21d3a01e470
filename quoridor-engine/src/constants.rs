//! 规则常量定义

/// 棋盘边长（行数 = 列数）
pub const BOARD_SIZE: usize = 9;

/// 最大坐标值
pub const MAX_COORD: u8 = (BOARD_SIZE - 1) as u8;

/// 每位玩家的初始挡板数
pub const FENCES_PER_PLAYER: u8 = 10;

/// 玩家 1 起始位置 (列, 行)
pub const PLAYER_ONE_START: (u8, u8) = (4, 0);

/// 玩家 2 起始位置 (列, 行)
pub const PLAYER_TWO_START: (u8, u8) = (4, MAX_COORD);
