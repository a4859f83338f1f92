//! duo-web entry point.
//!
//! Bootstraps the demo server:
//! 1. Load configuration from environment
//! 2. Build router with the login page and the Duo callback
//! 3. Apply security headers middleware
//! 4. Start Axum server
//!
//! Also supports a `keygen` subcommand for generating application secret keys.

use duo_web::{config::Config, keygen, middleware::security_headers, routes};

fn print_usage() {
    eprintln!("Usage: duo-web [keygen]");
    eprintln!();
    eprintln!("Without arguments, serve the Duo Web demo using DUO_IKEY, DUO_SKEY,");
    eprintln!("DUO_AKEY and DUO_HOST from the environment or .env.");
    eprintln!();
    eprintln!("  keygen    Print a random application secret key for DUO_AKEY");
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        None => {}
        Some("keygen") if args.len() == 2 => {
            println!("{}", keygen::generate_application_key());
            return;
        }
        Some(_) => {
            print_usage();
            std::process::exit(1);
        }
    }

    // Initialize tracing with env filter support (RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load config");
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "Loaded configuration");

    let bind_addr = config.bind_addr;
    let response_path = config.response_path.clone();
    let state = routes::AppState::new(config);

    let app = routes::router(&response_path)
        .layer(axum::middleware::from_fn(security_headers))
        .with_state(state);

    let listener = match tokio::net::TcpListener::bind(bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %bind_addr, "Failed to bind");
            std::process::exit(1);
        }
    };
    tracing::info!("Listening on http://{}/?username=example", bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
