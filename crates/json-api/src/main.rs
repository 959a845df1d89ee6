//! Plaza JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use plaza_app::{context::AppContext, payments::PaymentsConfig};

use crate::{
    config::{ServerConfig, logging::LogFormat},
    state::State,
};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod carts;
mod config;
mod extensions;
mod healthcheck;
mod likes;
mod orders;
mod payments;
mod products;
mod promos;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Plaza JSON API Server entry point
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

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.log_level));

    match config.logging.log_format {
        LogFormat::Compact => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
    }

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let payments_config = PaymentsConfig {
        base_url: config.payments.base_url,
        secret_key: config.payments.secret_key,
    };

    let app = match AppContext::from_database_url(&config.database.database_url, payments_config)
        .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    // Make sure the advertised default promo exists before serving.
    match app.promos.seed_default().await {
        Ok(true) => info!("seeded default promo"),
        Ok(false) => {}
        Err(seed_error) => {
            error!("failed to seed default promo: {seed_error}");

            process::exit(1);
        }
    }

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::with_path("promos")
                .push(Router::with_path("banner").get(promos::banner::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("products")
                        .post(products::create::handler)
                        .push(
                            Router::with_path("{product}")
                                .put(products::update::handler)
                                .delete(products::delete::handler)
                                .push(Router::with_path("like").post(likes::toggle::handler)),
                        ),
                )
                .push(Router::with_path("likes").get(likes::index::handler))
                .push(
                    Router::with_path("cart")
                        .get(carts::get::handler)
                        .put(carts::put::handler)
                        .push(
                            Router::with_path("items")
                                .post(carts::items::create::handler)
                                .delete(carts::items::delete::handler),
                        ),
                )
                .push(
                    Router::with_path("promos")
                        .post(promos::create::handler)
                        .push(Router::with_path("apply").post(promos::apply::handler))
                        .push(Router::with_path("{code}").put(promos::update::handler)),
                )
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .post(orders::create::handler),
                )
                .push(Router::with_path("payments/intent").post(payments::create::handler)),
        );

    let doc = OpenApi::new("Plaza API", "0.3.0")
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

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
