mod cli;

use std::sync::Arc;

use clap::Parser;

use cli::Commands;
use wordtrie::{
    handlers::{Consts, Ctx},
    http, importer, init,
};

#[tokio::main]
async fn main() {
    init::init_logger();

    let cli = cli::Cli::parse();

    // Handle CLI flags.
    if let Some(cmd) = cli.command {
        match cmd {
            // Generate a new config file.
            Commands::NewConfig { path } => {
                match init::generate_config(&path) {
                    Ok(_) => {
                        log::info!("config file generated: {}", path.display());
                    }
                    Err(e) => {
                        log::error!("error generating config: {}", e);
                        std::process::exit(1);
                    }
                }
                return;
            }

            // Import a word list into the store.
            Commands::Import { file } => {
                let config = init::init_config(&cli.config);
                let index = init::init_index(&config, cli.data.as_deref());

                if let Err(e) = importer::import_words(&file, &index) {
                    log::error!("error importing: {}", e);
                    std::process::exit(1);
                }
                return;
            }
        }
    }

    // Load config.
    let config = init::init_config(&cli.config);

    // Load the word store and build the index.
    let index = Arc::new(init::init_index(&config, cli.data.as_deref()));

    // Setup the global app context used in HTTP handlers.
    let ctx = Arc::new(Ctx {
        index,
        consts: Consts {
            max_suggestions: config.app.max_suggestions.unwrap_or(0),
        },
    });

    // Start the HTTP server.
    let routes = http::init_handlers(ctx);
    let addr = config.app.address;

    log::info!("starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("error listening on {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, routes).await {
        log::error!("server error: {}", e);
        std::process::exit(1);
    }
}
