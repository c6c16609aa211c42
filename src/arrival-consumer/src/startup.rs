use std::path::PathBuf;

use snafu::ResultExt;
use tokio::fs::File;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use vessel_core::ArrivalClassifier;

use crate::{
    consumer::{Consumer, ConsumerStats},
    error::{
        Result,
        error::{OpenSnafu, TimeThresholdSnafu},
    },
    settings::{LogLevel, Settings},
};

pub struct App {
    consumer: Consumer,
    input: Option<PathBuf>,
}

/// Logs go to stderr, stdout is reserved for verdicts.
pub fn init_tracing(log_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_ref()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

impl App {
    pub fn build(settings: &Settings) -> Result<App> {
        let time_threshold = chrono::Duration::from_std(settings.time_threshold).context(
            TimeThresholdSnafu {
                threshold: settings.time_threshold,
            },
        )?;

        Ok(App {
            consumer: Consumer::new(
                ArrivalClassifier::new(time_threshold),
                settings.max_line_length,
            ),
            input: settings.input.clone(),
        })
    }

    #[instrument(skip_all)]
    pub async fn run(self) -> Result<ConsumerStats> {
        let stdout = tokio::io::stdout();

        match &self.input {
            Some(path) => {
                info!("classifying vessel positions from '{}'", path.display());
                let file = File::open(path).await.with_context(|_| OpenSnafu {
                    path: path.display().to_string(),
                })?;
                self.consumer.run(file, stdout).await
            }
            None => {
                info!("classifying vessel positions from stdin");
                self.consumer.run(tokio::io::stdin(), stdout).await
            }
        }
    }
}
