use std::{io, time::Duration};

use anyhow::Context as _;
use blockfall_engine::{GameSession, SessionConfig};

use crate::{input::IdleInput, render::TextRenderer, runner};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct HeadlessArg {
    /// Stop after this many ticks even if the game is still running
    #[clap(long)]
    pub(crate) max_ticks: Option<usize>,
}

pub(crate) fn run(
    arg: &HeadlessArg,
    config: &SessionConfig,
    tick_interval: Duration,
) -> anyhow::Result<()> {
    let mut session = GameSession::new(config).context("failed to start session")?;
    let mut renderer = TextRenderer::new(io::stdout().lock());
    runner::run_session(
        &mut session,
        &mut IdleInput,
        &mut renderer,
        tick_interval,
        arg.max_ticks,
    )?;
    Ok(())
}
