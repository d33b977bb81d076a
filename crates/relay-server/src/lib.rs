mod cors;
mod health;

use std::net::SocketAddr;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use relay_config::{AnyOrArray, Config};
use relay_llm::ChatState;
use tower_http::trace::{DefaultOnFailure, TraceLayer};
use tracing::Level;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the upstream
    /// provider cannot be constructed
    pub fn new(config: Config) -> anyhow::Result<Self> {
        config.validate()?;

        let listen_address = config.server.listen_address();

        let chat_state = ChatState::from_config(&config.upstream)?;
        let mut chat = relay_llm::chat_router(chat_state);

        // Origin allow-list (chat only; health probes never carry a browser origin)
        if let AnyOrArray::List(_) = config.server.cors.origins {
            let origins = config.server.cors.origins.clone();
            chat = chat.route_layer(axum::middleware::from_fn(move |req, next| {
                let origins = origins.clone();
                async move { cors::origin_guard(&origins, req, next).await }
            }));
        }

        let mut app = Router::new()
            .merge(health::health_router(&config.server.health))
            .merge(chat);

        // Apply middleware layers (innermost first)

        // Body limit, enforced by the JSON extractor so the rejection keeps
        // the `{ error }` shape
        app = app.layer(DefaultBodyLimit::max(config.server.body_limit));

        // Tracing; failed requests are already logged where the error is built
        app = app.layer(TraceLayer::new_for_http().on_failure(DefaultOnFailure::new().level(Level::DEBUG)));

        // CORS (outermost, so preflight and rejections carry CORS headers)
        app = app.layer(cors::cors_layer(&config.server.cors));

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
