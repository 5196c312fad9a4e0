mod app;
mod command;
mod screens;
mod tui;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
