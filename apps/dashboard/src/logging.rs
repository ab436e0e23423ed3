use color_eyre::Result;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log lines go. The terminal UI owns stdout, so it logs to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    Stderr,
    File(PathBuf),
}

pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "climate_dashboard=debug"
    } else {
        "climate_dashboard=info"
    }
}

/// Installs the global subscriber. `RUST_LOG` directives are honored on top of the default.
pub fn init_logging(debug: bool, destination: &LogDestination) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(default_directive(debug).parse()?);

    match destination {
        LogDestination::Stderr => {
            tracing_subscriber::registry()
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .with(filter)
                .try_init()?;
        }
        LogDestination::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .with(filter)
                .try_init()?;
        }
    }

    Ok(())
}
