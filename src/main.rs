use clap::Parser;
use snipper::application::{
    find_multiply_defined_tags, find_overlong_lines, ExtractService, ProcessOptions,
    ProcessService, Workspace,
};
use snipper::cli::{format_summary, Cli};
use snipper::domain::{Diagnostics, EditDistanceSuggester};
use snipper::error::SnipperError;
use snipper::infrastructure::Config;
use std::io::IsTerminal;

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), SnipperError> {
    let mut config = Config::load(cli.config.as_deref(), &cli.source_dir)?;
    cli.apply_to(&mut config);

    let mut diagnostics = Diagnostics::new();
    let mut workspace = Workspace::open(&cli.source_dir, &cli.code_dir, &config, &mut diagnostics)?;

    find_multiply_defined_tags(&workspace.documents, &workspace.hosts, &mut diagnostics);
    find_overlong_lines(&workspace.documents, config.max_line_length, &mut diagnostics);

    let options = ProcessOptions {
        render: config.render_options(cli.clean),
        dry_run: cli.dry_run,
        suffix: config.suffix.clone(),
    };
    let suggester = EditDistanceSuggester::default();
    let report = ProcessService::new(&suggester).execute(&mut workspace, &options, &mut diagnostics)?;

    if let Some(dir) = &cli.extract_dir {
        ExtractService::execute(&mut workspace, dir, &mut diagnostics)?;
    }

    println!("{}", format_summary(&report, &diagnostics, cli.dry_run));
    Ok(())
}
