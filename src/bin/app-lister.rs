use anyhow::Result;
use app_lister::{run, Config, RunStamp};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // The single guard: report and fall through to a normal exit.
    if let Err(err) = try_main() {
        eprintln!("An error occurred: {err:#}");
    }
}

fn try_main() -> Result<()> {
    let config = Config::load()?;
    let stamp = RunStamp::now()?;
    run::run(&config, &stamp)?;
    Ok(())
}
