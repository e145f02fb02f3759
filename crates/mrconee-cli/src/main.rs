mod cli;
mod report;

use anyhow::Context;
use clap::Parser;

/// Entry point for the `mrconee` inspector.
///
/// Parses command-line arguments, decodes the file and renders the report.
fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    run(cli)
}

fn run(cli: cli::Cli) -> anyhow::Result<()> {
    let dataset = mrconee_format::read_mrconee(&cli.path)
        .with_context(|| format!("failed to decode {}", cli.path))?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&dataset)?);
    } else {
        let stdout = std::io::stdout();
        report::print_dataset(&mut stdout.lock(), &dataset)?;
    }
    Ok(())
}
