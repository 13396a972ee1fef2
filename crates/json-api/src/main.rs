//! Rebate JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use rebate_app::context::AppContext;

use crate::{config::ServerConfig, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod actor;
mod config;
mod discounts;
mod extensions;
mod healthcheck;
mod logging;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Rebate JSON API Server entry point
///
/// # Panics
///
/// Panics if the server fails to bind or serve requests
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = logging::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "subscriber failed to install, stderr is the only sink left"
        )]
        {
            eprintln!("Logging error: {init_error}");
        }

        process::exit(1);
    }

    let addr = config.socket_addr();

    info!(
        currency = config.store.currency.iso_alpha_code,
        "Starting server on {addr}"
    );

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let app =
        match AppContext::from_database_url(&config.store.database_url, config.store.currency)
            .await
        {
            Ok(app) => app,
            Err(init_error) => {
                error!("failed to initialize app context: {init_error}");

                process::exit(1);
            }
        };

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::new().hoop(actor::middleware::handler).push(
                Router::with_path("product-discounts")
                    .get(discounts::index::handler)
                    .post(discounts::create::handler)
                    .push(Router::with_path("summary").get(discounts::summary::handler))
                    .push(Router::with_path("best").post(discounts::best::handler))
                    .push(
                        Router::with_path("{discount}")
                            .get(discounts::get::handler)
                            .put(discounts::update::handler)
                            .delete(discounts::delete::handler)
                            .push(Router::with_path("toggle").post(discounts::toggle::handler))
                            .push(Router::with_path("extend").post(discounts::extend::handler))
                            .push(Router::with_path("shorten").post(discounts::shorten::handler))
                            .push(
                                Router::with_path("calculate")
                                    .post(discounts::calculate::handler),
                            )
                            .push(
                                Router::with_path("validate").post(discounts::validate::handler),
                            )
                            .push(Router::with_path("apply").post(discounts::apply::handler)),
                    ),
            ),
        );

    let doc = OpenApi::new("Rebate API", env!("CARGO_PKG_VERSION")).merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;
}
