mod app;
mod render;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use dualtask_experiment::SessionConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use app::App;

#[derive(Parser, Debug)]
#[command(name = "dualtask")]
#[command(about = "Dual-task experiment: interleaved typing and subtraction")]
struct Args {
    /// Trial definitions (.yaml, .yml or .json)
    trials: PathBuf,

    /// Tab-separated response log to write
    #[arg(short, long, default_value = "responses.tsv")]
    log: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dualtask_app=info,dualtask_experiment=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let config = SessionConfig::new(args.trials, args.log);

    let app = App::new(&config)?;
    let mut stdout = io::stdout().lock();
    app.run(io::stdin().lock(), &mut stdout)?;

    Ok(())
}
