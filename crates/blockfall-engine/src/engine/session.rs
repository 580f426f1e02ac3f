use tracing::{debug, info, trace};

use crate::{
    BoardSizeError, PieceCollisionError,
    core::{
        board::Board,
        piece::{Piece, PiecePosition},
        snapshot::BoardSnapshot,
    },
};

use super::{
    config::SessionConfig,
    input::{InputResolution, TickInput},
    piece_generator::{PieceGenerator, PieceSource},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// A piece is in flight and the next tick will move it.
    Falling,
    /// A new piece could not be placed at the spawn position.
    GameOver,
}

/// What a single [`GameSession::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// The piece moved down one row.
    Fell,
    /// The piece could not fall and was locked into the board.
    ///
    /// Full rows have been compacted and the next piece has been spawned, or
    /// the session is now over if it did not fit. A snapshot taken after this
    /// tick already contains the new piece at the spawn position.
    Locked { cleared_rows: usize },
    /// The session had already ended; nothing changed.
    GameOver,
}

/// One game from the first spawn until a piece no longer fits.
///
/// The session owns the board and the falling piece. While a piece is in
/// flight its cells are stamped into the board, so [`Self::snapshot`] shows
/// it alongside the locked cells.
///
/// Each [`Self::tick`] runs in a fixed order:
///
/// 1. Erase the falling piece from the board.
/// 2. Apply the asserted rotations, then the asserted shifts, each only if
///    the result fits.
/// 3. Move the piece down one row if it fits there, and stamp it back.
/// 4. Otherwise stamp it where it is (lock), remove full rows, and spawn the
///    next piece. If the new piece does not fit, the session is over.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameSession, SessionConfig, ShapeKind, TickInput, TickOutcome};
///
/// let config = SessionConfig::default();
/// let mut session = GameSession::with_piece_source(&config, || ShapeKind::O).unwrap();
///
/// assert_eq!(session.tick(TickInput::NONE), TickOutcome::Fell);
///
/// let mut outcome = TickOutcome::Fell;
/// while outcome.is_fell() {
///     outcome = session.tick(TickInput::NONE);
/// }
/// assert_eq!(outcome, TickOutcome::Locked { cleared_rows: 0 });
/// ```
#[derive(Debug, Clone)]
pub struct GameSession<S = PieceGenerator> {
    board: Board,
    falling_piece: Option<Piece>,
    piece_source: S,
    spawn: PiecePosition,
    input_resolution: InputResolution,
}

impl GameSession {
    /// Starts a session with random pieces.
    ///
    /// Uses `config.seed` when set, otherwise a random seed.
    pub fn new(config: &SessionConfig) -> Result<Self, BoardSizeError> {
        let generator = config
            .seed
            .map_or_else(PieceGenerator::new, PieceGenerator::with_seed);
        Self::with_piece_source(config, generator)
    }
}

impl<S> GameSession<S>
where
    S: PieceSource,
{
    /// Starts a session on an empty board with pieces from `piece_source`.
    pub fn with_piece_source(
        config: &SessionConfig,
        piece_source: S,
    ) -> Result<Self, BoardSizeError> {
        let board = Board::new(config.width, config.height)?;
        Ok(Self::with_board(board, config, piece_source))
    }

    /// Starts a session on an existing board.
    ///
    /// The board's dimensions take precedence over `config.width` and
    /// `config.height`. The first piece is spawned immediately; the session
    /// may therefore already be over when this returns.
    pub fn with_board(board: Board, config: &SessionConfig, piece_source: S) -> Self {
        let mut session = Self {
            board,
            falling_piece: None,
            piece_source,
            spawn: config.spawn,
            input_resolution: config.input_resolution,
        };
        session.spawn_next();
        session
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the piece in flight, or `None` once the game is over.
    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        self.falling_piece.as_ref()
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        if self.falling_piece.is_some() {
            SessionState::Falling
        } else {
            SessionState::GameOver
        }
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.session_state().is_game_over()
    }

    /// Copies the board, including the piece in flight, for a renderer.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    /// Advances the game by one tick.
    pub fn tick(&mut self, input: TickInput) -> TickOutcome {
        let Some(piece) = self.falling_piece else {
            return TickOutcome::GameOver;
        };

        piece.unstamp_from(&mut self.board);
        let piece = self.apply_input(piece, self.input_resolution.resolve(input));

        if let Ok(dropped) = piece.down().within(&self.board) {
            trace!(kind = ?dropped.kind(), y = dropped.position().y, "piece fell");
            dropped.stamp_onto(&mut self.board);
            self.falling_piece = Some(dropped);
            return TickOutcome::Fell;
        }

        piece.stamp_onto(&mut self.board);
        let cleared_rows = self.board.compact_full_rows();
        debug!(
            kind = ?piece.kind(),
            x = piece.position().x,
            y = piece.position().y,
            cleared_rows,
            "piece locked"
        );
        self.spawn_next();
        TickOutcome::Locked { cleared_rows }
    }

    fn apply_input(&self, piece: Piece, input: TickInput) -> Piece {
        let mut piece = piece;
        if input.rotate_clockwise {
            piece = self.try_transform(piece, Piece::rotated_clockwise).unwrap_or(piece);
        }
        if input.rotate_counter_clockwise {
            piece = self
                .try_transform(piece, Piece::rotated_counter_clockwise)
                .unwrap_or(piece);
        }
        if input.move_left {
            piece = self.try_transform(piece, Piece::left).unwrap_or(piece);
        }
        if input.move_right {
            piece = self.try_transform(piece, Piece::right).unwrap_or(piece);
        }
        piece
    }

    fn try_transform(
        &self,
        piece: Piece,
        transform: impl FnOnce(&Piece) -> Piece,
    ) -> Result<Piece, PieceCollisionError> {
        transform(&piece).within(&self.board)
    }

    fn spawn_next(&mut self) {
        let kind = self.piece_source.next_kind();
        let piece = Piece::new(kind, self.spawn);
        if piece.fits(&self.board) {
            debug!(kind = ?kind, x = self.spawn.x, y = self.spawn.y, "piece spawned");
            piece.stamp_onto(&mut self.board);
            self.falling_piece = Some(piece);
        } else {
            info!(kind = ?kind, "game over: spawn position is blocked");
            self.falling_piece = None;
        }
    }
}
