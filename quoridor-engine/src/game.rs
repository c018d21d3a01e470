//! 对局控制
//!
//! 回合轮换、走子与放挡板的验证和执行、胜负判定。
//! 所有检查都在第一次写入之前完成，失败的调用不会改变任何状态。

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::{Board, Border};
use crate::error::{Result, RuleError};
use crate::moves::{Action, MoveKind};
use crate::player::Player;
use crate::position::{Coord, Orientation, PlayerId, Position};

/// 对局状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// 进行中
    InProgress,
    /// 已有胜者（终态）
    Won(PlayerId),
}

/// 走子结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// 普通走子，已轮到对方
    Moved(MoveKind),
    /// 走子到达目标行，对局结束
    Won(MoveKind),
}

/// 对局引擎
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEngine {
    board: Board,
    /// 按 PlayerId 索引
    players: [Player; 2],
    current_turn: PlayerId,
    status: GameStatus,
    history: Vec<Action>,
}

impl GameEngine {
    /// 创建新对局，玩家 1 先走
    pub fn new() -> Self {
        Self::from_players(Player::new(PlayerId::One), Player::new(PlayerId::Two))
    }

    /// 以指定的棋子位置创建对局（用于摆局面测试），玩家 1 先走
    ///
    /// 胜负只在走子后判定，所以不接受已经站在自己目标行上的棋子。
    pub fn with_positions(one: Position, two: Position) -> Result<Self> {
        ensure_on_board(one)?;
        ensure_on_board(two)?;
        if one == two {
            return Err(RuleError::Occupied(two));
        }
        for (player, pawn) in [(PlayerId::One, one), (PlayerId::Two, two)] {
            if pawn.y == player.goal_row() {
                return Err(RuleError::AlreadyAtGoal { player, pawn });
            }
        }
        Ok(Self::from_players(
            Player::at(PlayerId::One, one),
            Player::at(PlayerId::Two, two),
        ))
    }

    fn from_players(one: Player, two: Player) -> Self {
        let mut board = Board::new();
        board.set_occupied(one.pawn(), true);
        board.set_occupied(two.pawn(), true);
        Self {
            board,
            players: [one, two],
            current_turn: PlayerId::One,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// 棋盘（只读）
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// 玩家信息
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// 当前走子方
    pub fn current_turn(&self) -> PlayerId {
        self.current_turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// 胜者（如果有）
    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Won(winner) => Some(winner),
            GameStatus::InProgress => None,
        }
    }

    /// 指定玩家是否已获胜
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner() == Some(player)
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// 已执行的动作
    pub fn history(&self) -> &[Action] {
        &self.history
    }

    /// 指定格子上的棋子属于谁
    pub fn pawn_at(&self, pos: Position) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|player| player.pawn() == pos)
            .map(|player| player.id)
    }

    /// 移动棋子
    ///
    /// 依次检查：对局未结束、轮到该玩家、坐标在棋盘内、目标格无子、几何合法。
    pub fn move_pawn(&mut self, player: PlayerId, to: impl Into<Coord>) -> Result<MoveOutcome> {
        let (to, kind) = match self.validate_pawn_move(player, to.into()) {
            Ok(checked) => checked,
            Err(err) => {
                debug!("{} pawn move rejected: {}", player, err);
                return Err(err);
            }
        };

        let from = self.player(player).pawn();
        self.board.set_occupied(from, false);
        self.board.set_occupied(to, true);
        self.player_mut(player).set_pawn(to);
        self.history.push(Action::Pawn { player, from, to });
        debug!("{} moved {} -> {} ({:?})", player, from, to, kind);

        if self.player(player).has_reached_goal() {
            self.status = GameStatus::Won(player);
            info!("{} wins by reaching row {}", player, to.y);
            return Ok(MoveOutcome::Won(kind));
        }

        self.switch_turn();
        Ok(MoveOutcome::Moved(kind))
    }

    fn validate_pawn_move(&self, player: PlayerId, to: Coord) -> Result<(Position, MoveKind)> {
        self.ensure_can_act(player)?;
        let to = Position::try_from(to)?;
        let kind = self.check_pawn_move(player, to)?;
        Ok((to, kind))
    }

    /// 检查棋子能否走到 `to`（不检查回合）
    pub fn check_pawn_move(&self, player: PlayerId, to: Position) -> Result<MoveKind> {
        self.ensure_in_progress()?;
        ensure_on_board(to)?;
        if self.board.is_occupied(to) {
            return Err(RuleError::Occupied(to));
        }
        let from = self.player(player).pawn();
        let opponent = self.player(player.opponent()).pawn();
        MoveKind::validate(&self.board, from, opponent, to)
    }

    /// 放置挡板
    ///
    /// 横向挡板放在 `anchor` 的上边和其上方格子的下边；
    /// 纵向挡板放在 `anchor` 的左边和其左侧格子的右边。
    pub fn place_fence(
        &mut self,
        player: PlayerId,
        orientation: Orientation,
        anchor: impl Into<Coord>,
    ) -> Result<()> {
        let anchor = match self.validate_fence(player, orientation, anchor.into()) {
            Ok(anchor) => anchor,
            Err(err) => {
                debug!("{} fence placement rejected: {}", player, err);
                return Err(err);
            }
        };

        let side = orientation.anchor_side();
        self.board.set_fence(anchor, side);
        if let Some(neighbor) = anchor.step(side) {
            self.board.set_fence(neighbor, side.opposite());
        }
        self.player_mut(player).use_fence();
        self.history.push(Action::Fence {
            player,
            orientation,
            anchor,
        });
        debug!(
            "{} placed {} fence at {} ({} left)",
            player,
            orientation,
            anchor,
            self.player(player).fences()
        );

        self.switch_turn();
        Ok(())
    }

    fn validate_fence(&self, player: PlayerId, orientation: Orientation, anchor: Coord) -> Result<Position> {
        self.ensure_can_act(player)?;
        let anchor = Position::try_from(anchor)?;
        self.check_fence(player, orientation, anchor)?;
        Ok(anchor)
    }

    /// 检查挡板能否放在 `anchor`（不检查回合）
    pub fn check_fence(&self, player: PlayerId, orientation: Orientation, anchor: Position) -> Result<()> {
        self.ensure_in_progress()?;
        ensure_on_board(anchor)?;
        if self.player(player).fences() < 1 {
            return Err(RuleError::NoFencesLeft { player });
        }
        match self.board.border(anchor, orientation.anchor_side()) {
            Border::Edge => Err(RuleError::EdgeFence {
                anchor,
                orientation,
            }),
            Border::Fenced => Err(RuleError::FenceExists {
                anchor,
                orientation,
            }),
            Border::Open => Ok(()),
        }
    }

    /// 重放一个动作（只使用动作中的玩家和目标）
    pub fn apply(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Pawn { player, to, .. } => self.move_pawn(player, to).map(|_| ()),
            Action::Fence {
                player,
                orientation,
                anchor,
            } => self.place_fence(player, orientation, anchor),
        }
    }

    fn ensure_in_progress(&self) -> Result<()> {
        match self.status {
            GameStatus::Won(winner) => Err(RuleError::GameOver { winner }),
            GameStatus::InProgress => Ok(()),
        }
    }

    fn ensure_can_act(&self, player: PlayerId) -> Result<()> {
        self.ensure_in_progress()?;
        if self.current_turn != player {
            return Err(RuleError::NotYourTurn {
                expected: self.current_turn,
            });
        }
        Ok(())
    }

    /// 切换走子方
    fn switch_turn(&mut self) {
        self.current_turn = self.current_turn.opponent();
    }
}

/// 越界位置（例如通过 `Position::new_unchecked` 构造）返回 `OutOfBounds`
fn ensure_on_board(pos: Position) -> Result<()> {
    if pos.is_valid() {
        Ok(())
    } else {
        Err(RuleError::OutOfBounds {
            x: pos.x as i32,
            y: pos.y as i32,
        })
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Direction;

    fn pos(x: u8, y: u8) -> Position {
        Position::new_unchecked(x, y)
    }

    #[test]
    fn test_initial_state() {
        let game = GameEngine::new();

        assert_eq!(game.current_turn(), PlayerId::One);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.player(PlayerId::One).pawn(), pos(4, 0));
        assert_eq!(game.player(PlayerId::Two).pawn(), pos(4, 8));
        assert!(game.board().is_occupied(pos(4, 0)));
        assert!(game.board().is_occupied(pos(4, 8)));
        assert_eq!(game.board().pawn_count(), 2);
        assert_eq!(game.pawn_at(pos(4, 8)), Some(PlayerId::Two));
        assert_eq!(game.pawn_at(pos(4, 4)), None);
        assert!(!game.is_winner(PlayerId::One));
        assert!(!game.is_winner(PlayerId::Two));
    }

    #[test]
    fn test_simple_move_switches_turn() {
        let mut game = GameEngine::new();

        let outcome = game.move_pawn(PlayerId::One, (4, 1)).unwrap();
        assert_eq!(outcome, MoveOutcome::Moved(MoveKind::Step(Direction::Down)));
        assert!(!game.board().is_occupied(pos(4, 0)));
        assert!(game.board().is_occupied(pos(4, 1)));
        assert_eq!(game.current_turn(), PlayerId::Two);
        assert_eq!(
            game.history(),
            &[Action::Pawn {
                player: PlayerId::One,
                from: pos(4, 0),
                to: pos(4, 1),
            }]
        );
    }

    #[test]
    fn test_wrong_turn() {
        let mut game = GameEngine::new();

        assert_eq!(
            game.move_pawn(PlayerId::Two, (4, 7)),
            Err(RuleError::NotYourTurn {
                expected: PlayerId::One
            })
        );
        assert_eq!(
            game.place_fence(PlayerId::Two, Orientation::Horizontal, (4, 4)),
            Err(RuleError::NotYourTurn {
                expected: PlayerId::One
            })
        );
    }

    #[test]
    fn test_out_of_bounds() {
        let mut game = GameEngine::new();

        assert_eq!(
            game.move_pawn(PlayerId::One, (4, -1)),
            Err(RuleError::OutOfBounds { x: 4, y: -1 })
        );
        assert_eq!(
            game.place_fence(PlayerId::One, Orientation::Vertical, (9, 3)),
            Err(RuleError::OutOfBounds { x: 9, y: 3 })
        );
        assert_eq!(game, GameEngine::new());
    }

    #[test]
    fn test_turn_checked_before_bounds() {
        let mut game = GameEngine::new();
        assert!(matches!(
            game.move_pawn(PlayerId::Two, (20, 20)),
            Err(RuleError::NotYourTurn { .. })
        ));
    }

    #[test]
    fn test_illegal_geometry() {
        let mut game = GameEngine::new();

        assert_eq!(
            game.move_pawn(PlayerId::One, (4, 3)),
            Err(RuleError::IllegalMove {
                from: pos(4, 0),
                to: pos(4, 3),
            })
        );
        assert_eq!(
            game.move_pawn(PlayerId::One, (4, 2)),
            Err(RuleError::NoPawnToJump {
                from: pos(4, 0),
                to: pos(4, 2),
            })
        );
        assert_eq!(
            game.move_pawn(PlayerId::One, (5, 1)),
            Err(RuleError::NoPawnToJump {
                from: pos(4, 0),
                to: pos(5, 1),
            })
        );
    }

    #[test]
    fn test_occupied_destination() {
        let mut game = GameEngine::with_positions(pos(4, 4), pos(4, 5)).unwrap();
        assert_eq!(
            game.move_pawn(PlayerId::One, (4, 5)),
            Err(RuleError::Occupied(pos(4, 5)))
        );
        // 原地不动也算目标格有子
        assert_eq!(
            game.move_pawn(PlayerId::One, (4, 4)),
            Err(RuleError::Occupied(pos(4, 4)))
        );
    }

    #[test]
    fn test_fence_writes_both_sides() {
        let mut game = GameEngine::new();

        game.place_fence(PlayerId::One, Orientation::Horizontal, (3, 5)).unwrap();
        assert!(game.board().has_fence(pos(3, 5), Direction::Up));
        assert!(game.board().has_fence(pos(3, 4), Direction::Down));
        assert_eq!(game.player(PlayerId::One).fences(), 9);
        assert_eq!(game.current_turn(), PlayerId::Two);

        game.place_fence(PlayerId::Two, Orientation::Vertical, (6, 2)).unwrap();
        assert!(game.board().has_fence(pos(6, 2), Direction::Left));
        assert!(game.board().has_fence(pos(5, 2), Direction::Right));
        assert_eq!(game.player(PlayerId::Two).fences(), 9);
        assert_eq!(game.board().fenced_sides(), 4);
    }

    #[test]
    fn test_fence_on_edge() {
        let mut game = GameEngine::new();
        for x in 0..9i32 {
            assert_eq!(
                game.place_fence(PlayerId::One, Orientation::Horizontal, (x, 0)),
                Err(RuleError::EdgeFence {
                    anchor: pos(x as u8, 0),
                    orientation: Orientation::Horizontal,
                })
            );
        }
        for y in 0..9i32 {
            assert!(matches!(
                game.place_fence(PlayerId::One, Orientation::Vertical, (0, y)),
                Err(RuleError::EdgeFence { .. })
            ));
        }
        assert_eq!(game, GameEngine::new());
    }

    #[test]
    fn test_duplicate_fence() {
        let mut game = GameEngine::new();
        game.place_fence(PlayerId::One, Orientation::Vertical, (4, 4)).unwrap();
        assert_eq!(
            game.place_fence(PlayerId::Two, Orientation::Vertical, (4, 4)),
            Err(RuleError::FenceExists {
                anchor: pos(4, 4),
                orientation: Orientation::Vertical,
            })
        );
        assert_eq!(game.player(PlayerId::Two).fences(), 10);
        assert_eq!(game.current_turn(), PlayerId::Two);
    }

    #[test]
    fn test_fences_run_out() {
        let mut game = GameEngine::new();
        for i in 0..10i32 {
            game.place_fence(PlayerId::One, Orientation::Horizontal, (i % 9, 1 + i / 9))
                .unwrap();
            game.place_fence(PlayerId::Two, Orientation::Horizontal, (i % 9, 5 + i / 9))
                .unwrap();
        }
        assert_eq!(game.player(PlayerId::One).fences(), 0);
        assert_eq!(game.player(PlayerId::Two).fences(), 0);

        assert_eq!(
            game.place_fence(PlayerId::One, Orientation::Vertical, (5, 5)),
            Err(RuleError::NoFencesLeft {
                player: PlayerId::One
            })
        );
        // 仍然可以走子
        assert!(game.move_pawn(PlayerId::One, (3, 0)).is_ok());
    }

    #[test]
    fn test_win_freezes_game() {
        let mut game = GameEngine::with_positions(pos(4, 7), pos(0, 8)).unwrap();

        let outcome = game.move_pawn(PlayerId::One, (4, 8)).unwrap();
        assert!(matches!(outcome, MoveOutcome::Won(_)));
        assert!(game.is_winner(PlayerId::One));
        assert!(!game.is_winner(PlayerId::Two));
        assert_eq!(game.current_turn(), PlayerId::One);

        let snapshot = game.clone();
        assert_eq!(
            game.move_pawn(PlayerId::One, (4, 7)),
            Err(RuleError::GameOver {
                winner: PlayerId::One
            })
        );
        assert!(game.move_pawn(PlayerId::Two, (0, 7)).is_err());
        assert!(game
            .place_fence(PlayerId::Two, Orientation::Horizontal, (2, 2))
            .is_err());
        assert_eq!(game, snapshot);
    }

    #[test]
    fn test_player_two_wins_on_row_zero() {
        let mut game = GameEngine::with_positions(pos(8, 4), pos(1, 1)).unwrap();
        game.move_pawn(PlayerId::One, (8, 5)).unwrap();
        game.move_pawn(PlayerId::Two, (1, 0)).unwrap();
        assert!(game.is_winner(PlayerId::Two));
        assert_eq!(game.winner(), Some(PlayerId::Two));
    }

    #[test]
    fn test_unchecked_positions_are_rejected() {
        let game = GameEngine::new();

        assert_eq!(
            game.check_pawn_move(PlayerId::One, pos(9, 0)),
            Err(RuleError::OutOfBounds { x: 9, y: 0 })
        );
        assert_eq!(
            game.check_fence(PlayerId::One, Orientation::Vertical, pos(4, 12)),
            Err(RuleError::OutOfBounds { x: 4, y: 12 })
        );
        assert_eq!(
            GameEngine::with_positions(pos(4, 30), pos(4, 8)),
            Err(RuleError::OutOfBounds { x: 4, y: 30 })
        );
    }

    #[test]
    fn test_with_positions_rejects_pawn_on_goal_row() {
        assert_eq!(
            GameEngine::with_positions(pos(2, 8), pos(4, 4)),
            Err(RuleError::AlreadyAtGoal {
                player: PlayerId::One,
                pawn: pos(2, 8),
            })
        );
        assert_eq!(
            GameEngine::with_positions(pos(4, 4), pos(6, 0)),
            Err(RuleError::AlreadyAtGoal {
                player: PlayerId::Two,
                pawn: pos(6, 0),
            })
        );
        // 站在自己的起始行没问题
        assert!(GameEngine::with_positions(pos(0, 0), pos(8, 8)).is_ok());
    }

    #[test]
    fn test_with_positions_rejects_overlap() {
        assert_eq!(
            GameEngine::with_positions(pos(2, 2), pos(2, 2)),
            Err(RuleError::Occupied(pos(2, 2)))
        );
    }

    #[test]
    fn test_apply_replays_history() {
        let mut game = GameEngine::new();
        game.move_pawn(PlayerId::One, (4, 1)).unwrap();
        game.place_fence(PlayerId::Two, Orientation::Horizontal, (4, 3)).unwrap();
        game.move_pawn(PlayerId::One, (3, 1)).unwrap();

        let mut replay = GameEngine::new();
        for action in game.history().to_vec() {
            replay.apply(action).unwrap();
        }
        assert_eq!(replay, game);
    }
}
