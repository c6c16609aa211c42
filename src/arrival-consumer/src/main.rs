use arrival_consumer::{
    error::{Result, error::ConfigSnafu},
    settings::Settings,
    startup::{App, init_tracing},
};
use snafu::ResultExt;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new().context(ConfigSnafu)?;
    init_tracing(settings.log_level);

    info!(
        environment = settings.environment.as_ref(),
        "starting arrival consumer"
    );

    let app = App::build(&settings)?;

    app.run().await?;

    Ok(())
}
