use blockfall_engine::BoardSnapshot;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Flex, Layout},
    text::Text,
    widgets::{Block as BlockWidget, Borders},
};

use crate::{
    runner::Renderer,
    ui::widgets::{BoardDisplay, style},
};

const HELP_TEXT: &str = "Controls: ← → (Move) | A D (Rotate) | Q (Quit)";
const GAME_OVER_TEXT: &str = "Game Over  [Q / Enter to exit]";

/// Draws the board in the alternate screen with ratatui.
pub(crate) struct TerminalRenderer<'a> {
    terminal: &'a mut DefaultTerminal,
}

impl<'a> TerminalRenderer<'a> {
    pub(crate) fn new(terminal: &'a mut DefaultTerminal) -> Self {
        Self { terminal }
    }

    fn draw_frame(&mut self, snapshot: &BoardSnapshot, status: Text<'_>) -> anyhow::Result<()> {
        self.terminal
            .draw(|frame| draw(frame, snapshot, status))?;
        Ok(())
    }
}

fn draw(frame: &mut Frame<'_>, snapshot: &BoardSnapshot, status: Text<'_>) {
    let board = BoardDisplay::new(snapshot).block(
        BlockWidget::default()
            .borders(Borders::ALL)
            .title(" blockfall ")
            .style(style::DEFAULT),
    );

    let [board_area, status_area] = Layout::vertical([
        Constraint::Length(board.height()),
        Constraint::Length(1),
    ])
    .flex(Flex::Center)
    .areas(frame.area());
    let [board_area] = Layout::horizontal([Constraint::Length(board.width())])
        .flex(Flex::Center)
        .areas(board_area);

    frame.render_widget(&board, board_area);
    frame.render_widget(status.centered(), status_area);
}

impl Renderer for TerminalRenderer<'_> {
    fn render(&mut self, snapshot: &BoardSnapshot) -> anyhow::Result<()> {
        self.draw_frame(snapshot, Text::styled(HELP_TEXT, style::HELP))
    }

    fn game_over(&mut self, snapshot: &BoardSnapshot) -> anyhow::Result<()> {
        self.draw_frame(snapshot, Text::styled(GAME_OVER_TEXT, style::GAME_OVER))
    }
}
