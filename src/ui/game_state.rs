//! Game state management for the Xiangqi viewer

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::board::{Board, Move, MoveList, Pos, Side};
use crate::game::{GameConfig, GameHistory, XiangqiGame};
use crate::hash::Fingerprint;
use crate::render::{render, RenderedBoard};
use crate::rules::Outcome;

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }
}

/// Hotseat game: both sides play from the same window
pub struct GameState {
    game: XiangqiGame,
    history: GameHistory,
    /// Legal moves for the side to move
    legal: MoveList,
    pub selected: Option<Pos>,
    pub move_timer: MoveTimer,
    pub message: Option<String>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(XiangqiGame::new())
    }
}

impl GameState {
    pub fn new(game: XiangqiGame) -> Self {
        let history = game.history(Board::initial(), Side::First);
        let mut state = Self {
            game,
            history,
            legal: MoveList::new(),
            selected: None,
            move_timer: MoveTimer::default(),
            message: None,
        };
        state.refresh_legal();
        state
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.game.clone());
    }

    fn refresh_legal(&mut self) {
        match self.game.legal_moves(self.history.board(), self.history.side_to_move()) {
            Ok(moves) => self.legal = moves,
            Err(e) => {
                self.legal = MoveList::new();
                self.message = Some(e.to_string());
            }
        }
    }

    pub fn board(&self) -> &Board {
        self.history.board()
    }

    pub fn side_to_move(&self) -> Side {
        self.history.side_to_move()
    }

    pub fn config(&self) -> &GameConfig {
        self.game.config()
    }

    pub fn legal_moves(&self) -> &MoveList {
        &self.legal
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last_move()
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    pub fn repetitions(&self) -> u32 {
        self.history.repetitions()
    }

    pub fn outcome(&self) -> Outcome {
        self.history.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_terminal()
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.game.fingerprint(self.board())
    }

    pub fn rendered(&self) -> RenderedBoard {
        render(self.board())
    }

    /// Destinations of the selected piece
    pub fn targets(&self) -> Vec<Pos> {
        let Some(from) = self.selected else {
            return Vec::new();
        };
        self.legal.iter().filter(|m| m.from() == from).map(|m| m.to()).collect()
    }

    /// Handle a click on `pos`: select an own piece, or move the selected
    /// piece there.
    pub fn click(&mut self, pos: Pos) -> Result<(), String> {
        if self.is_over() {
            return Err("Game is over".to_string());
        }

        if let Some(from) = self.selected {
            let mv = Move::new(from, pos);
            if self.legal.contains(mv) {
                self.play(mv);
                return Ok(());
            }
        }

        if self.board().is_own(pos, self.side_to_move()) {
            self.selected = if self.selected == Some(pos) { None } else { Some(pos) };
            return Ok(());
        }

        let had_selection = self.selected.take().is_some();
        if had_selection {
            Err("Illegal move".to_string())
        } else {
            Ok(())
        }
    }

    fn play(&mut self, mv: Move) {
        let side = self.side_to_move();
        self.history.push(mv);
        self.selected = None;
        self.message = None;
        self.move_timer.stop();
        self.refresh_legal();

        let outcome = self.outcome();
        if outcome.is_terminal() {
            info!(?outcome, moves = self.move_count(), "game over");
        } else {
            self.move_timer.start();
        }
        debug!(%side, %mv, fingerprint = %self.fingerprint(), "move played");
    }

    /// Undo last move
    pub fn undo(&mut self) {
        if self.history.pop().is_some() {
            self.selected = None;
            self.message = None;
            self.refresh_legal();
            self.move_timer.start();
        }
    }
}
