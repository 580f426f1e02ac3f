use std::io::Write;

use blockfall_engine::BoardSnapshot;

use crate::runner::Renderer;

/// Prints each frame as text: one line per row, `# ` for filled cells and
/// `. ` for empty ones, with a blank line between frames.
#[derive(Debug)]
pub(crate) struct TextRenderer<W> {
    out: W,
}

impl<W> TextRenderer<W>
where
    W: Write,
{
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

impl<W> Renderer for TextRenderer<W>
where
    W: Write,
{
    fn render(&mut self, snapshot: &BoardSnapshot) -> anyhow::Result<()> {
        for row in snapshot.rows() {
            for cell in row {
                self.out
                    .write_all(if cell.is_filled() { b"# " } else { b". " })?;
            }
            writeln!(self.out)?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    fn game_over(&mut self, _snapshot: &BoardSnapshot) -> anyhow::Result<()> {
        writeln!(self.out, "Game Over")?;
        self.out.flush()?;
        Ok(())
    }
}
