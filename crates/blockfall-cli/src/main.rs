mod command;
mod input;
mod render;
mod runner;
mod ui;

fn main() -> anyhow::Result<()> {
    command::run()
}
