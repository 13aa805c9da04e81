use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use deskpost::config::Config;
use deskpost::run::Runner;
use desktop_automation::Desktop;
use placeholder_client::PlaceholderClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("deskpost=info".parse()?))
        .init();

    info!("Deskpost starting...");

    let config = Config::from_env();
    info!(
        output_dir = %config.output_dir.display(),
        post_count = config.post_count,
        editor = config.editor_program.as_str(),
        "Configuration loaded"
    );

    let desktop = platform_desktop()?;
    let runner = Runner::new(Arc::new(PlaceholderClient::new()), desktop, config);

    let stats = runner.run().await?;
    info!("Run complete. {stats}");

    Ok(())
}

/// The real automation backend for this platform.
fn platform_desktop() -> Result<Arc<dyn Desktop>> {
    #[cfg(windows)]
    {
        Ok(Arc::new(desktop_automation::WinDesktop::new()))
    }
    #[cfg(not(windows))]
    {
        Err(desktop_automation::AutomationError::Unsupported.into())
    }
}
