//! 棋盘与格子

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, MAX_COORD};
use crate::position::{Direction, Position};

/// 格子某条边的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Border {
    /// 棋盘外边缘，构造时确定，永远不能放挡板
    Edge,
    /// 无挡板
    Open,
    /// 有挡板（放下后不会撤回）
    Fenced,
}

/// 棋盘上的一个格子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// 按 上、右、下、左 排列
    borders: [Border; 4],
    pawn: bool,
}

impl Cell {
    fn at(pos: Position) -> Self {
        let edge_if = |is_edge: bool| if is_edge { Border::Edge } else { Border::Open };
        Self {
            borders: [
                edge_if(pos.y == 0),
                edge_if(pos.x == MAX_COORD),
                edge_if(pos.y == MAX_COORD),
                edge_if(pos.x == 0),
            ],
            pawn: false,
        }
    }

    /// 获取某条边的状态
    pub fn border(&self, side: Direction) -> Border {
        self.borders[side.index()]
    }

    /// 该边是否有挡板
    pub fn has_fence(&self, side: Direction) -> bool {
        self.border(side) == Border::Fenced
    }

    /// 是否有棋子
    pub fn has_pawn(&self) -> bool {
        self.pawn
    }
}

/// 9x9 棋盘
///
/// 只负责存储，不做任何合法性判断。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 索引为 cells[y][x]
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// 创建空棋盘（无棋子、无挡板，边缘已标记）
    pub fn new() -> Self {
        let mut cells = [[Cell::at(Position::new_unchecked(0, 0)); BOARD_SIZE]; BOARD_SIZE];
        for pos in Position::all() {
            cells[pos.y as usize][pos.x as usize] = Cell::at(pos);
        }
        Self { cells }
    }

    /// 获取格子（越界返回 None）
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        if pos.is_valid() {
            Some(&self.cells[pos.y as usize][pos.x as usize])
        } else {
            None
        }
    }

    fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        if pos.is_valid() {
            Some(&mut self.cells[pos.y as usize][pos.x as usize])
        } else {
            None
        }
    }

    /// 获取格子某条边的状态（棋盘外的位置视为边缘）
    pub fn border(&self, pos: Position, side: Direction) -> Border {
        self.cell(pos).map_or(Border::Edge, |cell| cell.border(side))
    }

    /// 格子某条边是否有挡板
    pub fn has_fence(&self, pos: Position, side: Direction) -> bool {
        self.cell(pos).is_some_and(|cell| cell.has_fence(side))
    }

    /// 在格子的一条边上放挡板（不检查规则，边缘保持不变）
    ///
    /// 只写这一侧；相邻格子的对应边由调用方负责。
    pub fn set_fence(&mut self, pos: Position, side: Direction) {
        if let Some(cell) = self.cell_mut(pos) {
            let border = &mut cell.borders[side.index()];
            if *border != Border::Edge {
                *border = Border::Fenced;
            }
        }
    }

    /// 格子上是否有棋子
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(|cell| cell.pawn)
    }

    /// 设置格子的棋子标记
    pub fn set_occupied(&mut self, pos: Position, occupied: bool) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.pawn = occupied;
        }
    }

    /// 有棋子的格子数
    pub fn pawn_count(&self) -> usize {
        Position::all().filter(|&pos| self.is_occupied(pos)).count()
    }

    /// 有挡板的边数（每块挡板占两条边）
    pub fn fenced_sides(&self) -> usize {
        Position::all()
            .map(|pos| {
                Direction::ALL
                    .iter()
                    .filter(|&&side| self.has_fence(pos, side))
                    .count()
            })
            .sum()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
