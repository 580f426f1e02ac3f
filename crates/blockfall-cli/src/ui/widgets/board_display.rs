use std::iter;

use blockfall_engine::BoardSnapshot;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::BlockDisplay;

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    snapshot: &'a BoardSnapshot,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(snapshot: &'a BoardSnapshot) -> Self {
        Self {
            snapshot,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        cells_to_u16(self.snapshot.width()).saturating_mul(BlockDisplay::width())
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        cells_to_u16(self.snapshot.height()).saturating_mul(BlockDisplay::height())
            + super::block_vertical_margin(self.block.as_ref())
    }
}

fn cells_to_u16(cells: usize) -> u16 {
    u16::try_from(cells).unwrap_or(u16::MAX)
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..self.snapshot.width()).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..self.snapshot.height()).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        for (grid_row, row) in iter::zip(vertical.split(area).iter(), self.snapshot.rows()) {
            let grid_cells = horizontal.split(*grid_row);
            for (grid_cell, cell) in iter::zip(grid_cells.iter(), row) {
                BlockDisplay::from_cell(*cell).render(*grid_cell, buf);
            }
        }
    }
}
