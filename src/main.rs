use clap::Parser;
use semverup::args::Args;

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_ansi(true)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let version = semverup::run(&args.repo, args.dry_run)?;

    // stdout carries the version only, logs go to stderr
    println!("{}", version);

    Ok(())
}
