mod args;

use args::Args;
use clap::Parser;
use fitroom_config::Config;
use fitroom_server::Server;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Variables may also come straight from the environment
    let dotenv_path = dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::load(&args.config)?;

    let _telemetry_guard = fitroom_telemetry::init(config.telemetry.as_ref(), "info")?;

    let mut server = Server::new(&config)?;
    if let Some(listen) = args.listen {
        server = server.with_listen_address(listen);
    }

    tracing::info!(
        config_path = %args.config.display(),
        dotenv = ?dotenv_path,
        listen_address = %server.listen_address(),
        description_model = %config.pipeline.description_model,
        synthesis_model = %config.pipeline.synthesis_model,
        "starting fitroom"
    );

    server.serve(cancel_on_signal()).await?;

    tracing::info!("fitroom stopped");
    Ok(())
}

/// Token cancelled on the first `SIGINT` or `SIGTERM`
fn cancel_on_signal() -> CancellationToken {
    let token = CancellationToken::new();
    let cancel = token.clone();

    tokio::spawn(async move {
        wait_for_signal().await;
        tracing::info!("shutdown signal received");
        cancel.cancel();
    });

    token
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
