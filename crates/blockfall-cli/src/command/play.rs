use std::time::Duration;

use anyhow::Context as _;
use blockfall_engine::{GameSession, SessionConfig};

use crate::{
    input::KeyboardInput,
    render::TerminalRenderer,
    runner::{self, RunSummary},
};

pub(crate) fn run(config: &SessionConfig, tick_interval: Duration) -> anyhow::Result<()> {
    let mut session = GameSession::new(config).context("failed to start session")?;
    let mut input = KeyboardInput;

    let summary = ratatui::run(|terminal| -> anyhow::Result<RunSummary> {
        let mut renderer = TerminalRenderer::new(terminal);
        let summary =
            runner::run_session(&mut session, &mut input, &mut renderer, tick_interval, None)?;
        if summary.end.is_game_over() {
            input.wait_for_dismiss()?;
        }
        Ok(summary)
    })?;

    // The alternate screen is gone; leave the verdict on the normal one.
    if summary.end.is_game_over() {
        println!("Game Over");
    }
    Ok(())
}
