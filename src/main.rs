// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, process::ExitCode, time::Duration};

use axum_server::{tls_rustls::RustlsConfig, Handle};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ecommerce_server::{
    api::router,
    config::{ServerConfig, LOG_FORMAT_ENV},
    state::AppState,
    storage::AppDatabase,
};

const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    if env::var(LOG_FORMAT_ENV).as_deref() == Ok("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal(handle: Handle<std::net::SocketAddr>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received, draining connections");
    handle.graceful_shutdown(Some(Duration::from_secs(10)));
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    if config.dev_secret {
        warn!("JWT_SECRET not set; using the development signing secret");
    }

    let db_path = config.database_path();
    let db = match AppDatabase::open(&db_path) {
        Ok(db) => db,
        Err(e) => {
            error!(path = %db_path.display(), error = %e, "failed to open database");
            return ExitCode::FAILURE;
        }
    };

    let app = router(AppState::new(db, &config.auth));
    let addr = config.bind_addr;

    let handle = Handle::new();
    tokio::spawn(shutdown_signal(handle.clone()));

    let served = match &config.tls {
        Some(tls) => {
            // Must run before any rustls config is built
            if rustls::crypto::ring::default_provider()
                .install_default()
                .is_err()
            {
                warn!("rustls crypto provider already installed");
            }

            let tls_config = match RustlsConfig::from_pem_file(&tls.cert, &tls.key).await {
                Ok(tls_config) => tls_config,
                Err(e) => {
                    error!(
                        cert = %tls.cert.display(),
                        key = %tls.key.display(),
                        error = %e,
                        "failed to load TLS credentials"
                    );
                    return ExitCode::FAILURE;
                }
            };

            info!(%addr, "listening on https (docs at /docs)");
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
        }
        None => {
            info!(%addr, "listening on http (docs at /docs)");
            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await
        }
    };

    match served {
        Ok(()) => {
            info!("server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}
