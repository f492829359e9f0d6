mod command;
mod input;
mod logging;
mod report;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
