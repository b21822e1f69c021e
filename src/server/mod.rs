//! HTTP server rendering pages per request

mod error;

pub use error::{ApiError, ErrorResponse};

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::cms::CmsError;
use crate::content::{DetailPage, PostLoader, PostPagination};
use crate::templates::{SiteData, TemplateRenderer};
use crate::Blog;

/// Shared, read-only request state
pub struct AppState {
    pub blog: Blog,
    pub loader: PostLoader,
    pub renderer: TemplateRenderer,
    pub site: SiteData,
}

impl AppState {
    pub fn new(blog: &Blog) -> Result<Self> {
        Ok(Self {
            blog: blog.clone(),
            loader: blog.loader()?,
            renderer: TemplateRenderer::new()?,
            site: SiteData::from_config(&blog.config),
        })
    }

    /// Render an error page; falls back to plain text if rendering fails too
    fn error_page(&self, status: StatusCode, message: &str) -> Response {
        match self.renderer.render_error(&self.site, status.as_u16(), message) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {:#}", e);
                (status, message.to_string()).into_response()
            }
        }
    }

    /// Map a page failure to a response, logging unexpected errors
    fn page_failure(&self, err: anyhow::Error) -> Response {
        match err.downcast_ref::<CmsError>() {
            Some(cms) if cms.is_not_found() => {
                tracing::debug!("{}", cms);
                self.error_page(StatusCode::NOT_FOUND, "Post não encontrado")
            }
            _ => {
                tracing::error!("Failed to render page: {:#}", err);
                self.error_page(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Não foi possível carregar esta página",
                )
            }
        }
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/post/:slug", get(post_handler))
        .route("/posts/:slug", get(post_handler))
        .route("/api/posts", get(load_more_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(AppState::new(blog)?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

/// Listing page with the first page of posts
async fn index_handler(State(state): State<Arc<AppState>>) -> Response {
    let rendered = async {
        let listing = state.loader.load_listing().await?;
        state.renderer.render_index(&state.site, &listing)
    }
    .await;

    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => state.page_failure(e),
    }
}

/// Post page, rendered on first request
async fn post_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Response {
    let rendered = async {
        let post = state.loader.load_post(&slug).await?;
        state.renderer.render_post(
            &state.site,
            &DetailPage::Ready(post),
            state.blog.config.words_per_minute,
        )
    }
    .await;

    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => state.page_failure(e),
    }
}

#[derive(Debug, Deserialize)]
struct LoadMoreQuery {
    page: Option<String>,
}

/// Next listing page as JSON, for the "load more" button
async fn load_more_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LoadMoreQuery>,
) -> Result<Json<PostPagination>, ApiError> {
    let cursor = query
        .page
        .filter(|c| !c.trim().is_empty())
        .ok_or(ApiError::MissingCursor)?;
    let page = state.loader.load_page(&cursor).await?;
    Ok(Json(page))
}

/// Serve files from the public directory, or the 404 page
async fn fallback_handler(State(state): State<Arc<AppState>>, request: Request<Body>) -> Response {
    let mut service = ServeDir::new(&state.blog.public_dir);
    match service.try_call(request).await {
        Ok(response) if response.status() != StatusCode::NOT_FOUND => response.into_response(),
        Ok(_) => state.error_page(StatusCode::NOT_FOUND, "Página não encontrada"),
        Err(e) => {
            tracing::error!("Failed to serve static file: {}", e);
            state.error_page(StatusCode::INTERNAL_SERVER_ERROR, "Erro no servidor")
        }
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
