//! King's PK client binary.
//!
//! This binary is the composition root that assembles:
//! 1. Runtime (match engine) via client-bootstrap's RuntimeBuilder
//! 2. Frontend (UI) - CLI
//!
//! # Examples
//!
//! ```bash
//! # Standard rules
//! cargo run -p kings-client
//!
//! # Short locks, custom skills
//! BATTLE_LOCK_PRESET=quick BATTLE_SKILLS_PATH=skills.ron cargo run -p kings-client
//! ```

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    #[cfg(feature = "frontend-cli")]
    {
        run_cli().await?;
    }

    #[cfg(not(feature = "frontend-cli"))]
    {
        compile_error!("At least one frontend feature must be enabled (frontend-cli)");
    }

    Ok(())
}

/// Run the CLI frontend.
#[cfg(feature = "frontend-cli")]
async fn run_cli() -> Result<()> {
    use client_bootstrap::{ClientConfig, RuntimeBuilder};
    use client_frontend_cli::{CliConfig, CliFrontend, FrontendConfig, logging};
    use kings_client::Client;

    // 1. Load configuration from environment
    let client_config = ClientConfig::from_env();
    let frontend_config = FrontendConfig::from_env();
    let cli_config = CliConfig::from_env();

    // 2. Setup logging
    let _log_guard = logging::setup_logging(client_config.session_id.as_deref())?;

    tracing::info!("Starting King's PK client");
    tracing::info!("Lock preset override: {:?}", client_config.lock_preset);
    tracing::info!("Tick interval: {:?}", client_config.tick_interval);

    // 3. Build Runtime (independent layer)
    tracing::debug!("Building runtime...");
    let setup = RuntimeBuilder::new(client_config).build().await?;
    tracing::info!(
        max_health = setup.battle.max_health,
        max_energy = setup.battle.max_energy,
        "Runtime built successfully"
    );

    // 4. Build Frontend (independent layer)
    let frontend = CliFrontend::new(frontend_config, cli_config);

    // 5. Build Client (composition layer) and run
    let client = Client::builder()
        .runtime(setup.runtime)
        .frontend(frontend)
        .build()?;

    tracing::info!("Client assembled, starting...");
    client.run().await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
