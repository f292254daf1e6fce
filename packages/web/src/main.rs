use dioxus::prelude::*;

use ui::AppProvider;
use views::{Login, Notes, Register};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Notes {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
}

fn main() {
    #[cfg(feature = "server")]
    {
        if let Err(e) = run_server() {
            eprintln!("Server failed: {e:#}");
            std::process::exit(1);
        }
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
fn run_server() -> anyhow::Result<()> {
    tokio::runtime::Runtime::new()?.block_on(launch_server())
}

#[cfg(feature = "server")]
async fn launch_server() -> anyhow::Result<()> {
    use std::sync::Arc;

    use anyhow::Context;
    use api::auth::Passwords;
    use api::db::{Database, MemoryDatabase, PgDatabase};
    use api::{ApiState, Settings};
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Settings::new().context("Failed to load settings")?;
    let tokens = settings.token_issuer().context("Invalid JWT settings")?;

    let db: Arc<dyn Database> = match settings.database_url() {
        Some(url) => Arc::new(
            PgDatabase::connect(url, settings.database_max_connections)
                .await
                .context("Failed to connect to database")?,
        ),
        None => {
            tracing::warn!("DATABASE_URL is not set, data is kept in memory only");
            Arc::new(MemoryDatabase::new())
        }
    };

    let state = ApiState::new(db, tokens, Passwords::default());

    // REST API under /api, the Dioxus application everywhere else
    let router = axum::Router::new()
        .nest("/api", api::router(state))
        .serve_dioxus_application(ServeConfig::new(), App);

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: ui::STICKIES_CSS }
        document::Title { "Sticky Notes" }

        AppProvider {
            Router::<Route> {}
        }
    }
}
