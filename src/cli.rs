use kalender::Cli;

fn main() -> anyhow::Result<()> {
    Cli::run()
}
