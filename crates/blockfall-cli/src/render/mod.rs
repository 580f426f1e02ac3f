pub(crate) use self::{terminal::TerminalRenderer, text::TextRenderer};

mod terminal;
mod text;
