use std::time::Duration;

use blockfall_engine::{BoardSnapshot, GameSession, PieceSource, TickInput, TickOutcome};
use tracing::info;

/// Supplies the input signals for each tick.
pub(crate) trait InputSource {
    /// Collects the signals asserted during the next `window`.
    ///
    /// Returns `None` when the player asked to quit.
    fn sample(&mut self, window: Duration) -> anyhow::Result<Option<TickInput>>;
}

/// Presents board frames to the player.
pub(crate) trait Renderer {
    /// Draws the board after a tick.
    fn render(&mut self, snapshot: &BoardSnapshot) -> anyhow::Result<()>;

    /// Announces that the session has ended.
    fn game_over(&mut self, snapshot: &BoardSnapshot) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub(crate) enum RunEnd {
    GameOver,
    Quit,
    TickLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub(crate) end: RunEnd,
    pub(crate) ticks: usize,
    pub(crate) locked_pieces: usize,
    pub(crate) cleared_rows: usize,
}

/// Drives `session` until the game ends, the player quits, or `max_ticks` ticks have run.
///
/// Each iteration samples input for one `tick_interval`, advances the session
/// by one tick, and renders the resulting board.
pub(crate) fn run_session<S, I, R>(
    session: &mut GameSession<S>,
    input: &mut I,
    renderer: &mut R,
    tick_interval: Duration,
    max_ticks: Option<usize>,
) -> anyhow::Result<RunSummary>
where
    S: PieceSource,
    I: InputSource,
    R: Renderer,
{
    let mut ticks = 0;
    let mut locked_pieces = 0;
    let mut cleared_rows = 0;

    let end = loop {
        if session.is_game_over() {
            renderer.game_over(&session.snapshot())?;
            break RunEnd::GameOver;
        }
        if max_ticks.is_some_and(|max| ticks >= max) {
            break RunEnd::TickLimit;
        }
        let Some(tick_input) = input.sample(tick_interval)? else {
            break RunEnd::Quit;
        };

        let outcome = session.tick(tick_input);
        ticks += 1;
        if let TickOutcome::Locked { cleared_rows: rows } = outcome {
            locked_pieces += 1;
            cleared_rows += rows;
        }
        renderer.render(&session.snapshot())?;
    };

    let summary = RunSummary {
        end,
        ticks,
        locked_pieces,
        cleared_rows,
    };
    info!(
        end = ?summary.end,
        ticks = summary.ticks,
        locked_pieces = summary.locked_pieces,
        cleared_rows = summary.cleared_rows,
        "session finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Board, SessionConfig, ShapeKind};

    use super::*;

    #[derive(Debug, Default)]
    struct RecordingRenderer {
        frames: Vec<BoardSnapshot>,
        game_over: Option<BoardSnapshot>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, snapshot: &BoardSnapshot) -> anyhow::Result<()> {
            assert!(self.game_over.is_none(), "frame rendered after game over");
            self.frames.push(snapshot.clone());
            Ok(())
        }

        fn game_over(&mut self, snapshot: &BoardSnapshot) -> anyhow::Result<()> {
            self.game_over = Some(snapshot.clone());
            Ok(())
        }
    }

    /// Replays a fixed list of inputs, then quits.
    struct ScriptedInput(std::vec::IntoIter<TickInput>);

    impl InputSource for ScriptedInput {
        fn sample(&mut self, _window: Duration) -> anyhow::Result<Option<TickInput>> {
            Ok(self.0.next())
        }
    }

    fn idle(ticks: usize) -> ScriptedInput {
        ScriptedInput(vec![TickInput::NONE; ticks].into_iter())
    }

    fn session_of(kind: ShapeKind) -> GameSession<impl PieceSource> {
        GameSession::with_piece_source(&SessionConfig::default(), move || kind).unwrap()
    }

    #[test]
    fn test_renders_once_per_tick() {
        let mut session = session_of(ShapeKind::T);
        let mut renderer = RecordingRenderer::default();
        let summary =
            run_session(&mut session, &mut idle(5), &mut renderer, Duration::ZERO, None).unwrap();

        assert_eq!(summary.end, RunEnd::Quit);
        assert_eq!(summary.ticks, 5);
        assert_eq!(renderer.frames.len(), 5);
        assert!(renderer.game_over.is_none());
        assert!(renderer.frames.iter().all(|f| f.filled_count() == 4));
    }

    #[test]
    fn test_stops_at_tick_limit() {
        let mut session = session_of(ShapeKind::O);
        let mut renderer = RecordingRenderer::default();
        let summary = run_session(
            &mut session,
            &mut idle(100),
            &mut renderer,
            Duration::ZERO,
            Some(3),
        )
        .unwrap();

        assert_eq!(summary.end, RunEnd::TickLimit);
        assert_eq!(summary.ticks, 3);
        assert_eq!(renderer.frames.len(), 3);
    }

    #[test]
    fn test_counts_locks_and_reaches_game_over() {
        // Flat lines stack in columns 3..=6 and top out after twenty pieces.
        let mut session = session_of(ShapeKind::I);
        let mut renderer = RecordingRenderer::default();
        let summary = run_session(
            &mut session,
            &mut idle(10_000),
            &mut renderer,
            Duration::ZERO,
            None,
        )
        .unwrap();

        assert_eq!(summary.end, RunEnd::GameOver);
        assert_eq!(summary.locked_pieces, 20);
        assert_eq!(summary.cleared_rows, 0);
        assert_eq!(renderer.frames.len(), summary.ticks);

        let last = renderer.game_over.unwrap();
        assert_eq!(Some(&last), renderer.frames.last());
        assert_eq!(last.filled_count(), 20 * 4);
    }

    #[test]
    fn test_blocked_board_ends_without_ticking() {
        let mut board = Board::new(10, 20).unwrap();
        for x in 0..10 {
            board.fill_cell(x, 0);
        }
        let mut session =
            GameSession::with_board(board, &SessionConfig::default(), || ShapeKind::S);
        let mut renderer = RecordingRenderer::default();
        let summary =
            run_session(&mut session, &mut idle(1), &mut renderer, Duration::ZERO, None).unwrap();

        assert_eq!(summary.end, RunEnd::GameOver);
        assert_eq!(summary.ticks, 0);
        assert!(renderer.frames.is_empty());
        assert!(renderer.game_over.is_some());
    }
}
