//! HTTP boundary: JSON API and home page over a [`ContactBookHandle`].

use std::future::Future;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, header::CACHE_CONTROL},
    middleware,
    response::Response,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tracing::info;

use crate::runtime::handle::ContactBookHandle;

/// Error type and response mapping.
pub mod error;
/// HTML pages.
pub mod pages;
/// JSON API handlers.
pub mod routes;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 4096;

/// Builds the application router. Every handler talks to `book`.
pub fn router(book: ContactBookHandle) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/api/server-time", get(routes::server_time))
        .route("/api/add-contact", post(routes::add_contact))
        .route("/api/contacts", get(routes::contacts))
        .route(
            "/api/contact/:id",
            get(routes::contact)
                .put(routes::update_contact)
                .delete(routes::delete_contact),
        )
        .fallback(pages::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::map_response(no_cache))
        .with_state(book)
}

/// Serves the router on `listener` until `shutdown` resolves, then finishes in-flight requests.
pub async fn serve<F>(
    listener: TcpListener,
    book: ContactBookHandle,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "http server listening");
    axum::serve(listener, router(book))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("http server stopped");
    Ok(())
}

async fn no_cache(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    response
}
