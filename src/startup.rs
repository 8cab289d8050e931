//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;

use crate::application::services::{LoanService, LoanServiceImpl};
use crate::config::Settings;
use crate::domain::LoanApplicationRepository;
use crate::infrastructure::database;
use crate::infrastructure::repositories::PgLoanApplicationRepository;
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::logging;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub loans: Arc<dyn LoanService>,
}

impl AppState {
    /// Build the state around a record store
    pub fn new(repository: Arc<dyn LoanApplicationRepository>) -> Self {
        Self {
            loans: Arc::new(LoanServiceImpl::new(repository)),
        }
    }
}

/// Build the router with middleware for the given state
pub fn build_router(state: AppState) -> Router {
    routes::create_router(state).layer(logging::create_trace_layer())
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    ///
    /// The database is connected on a background task, so a down database
    /// does not stop the listener from starting.
    pub async fn build(settings: Settings) -> Result<Self> {
        handlers::health::init_server_start();

        let pool = database::create_lazy_pool(&settings.database)?;
        database::connect_in_background(pool.clone());
        tracing::info!("Database connection pool created");

        let repository = Arc::new(PgLoanApplicationRepository::new(pool));
        let router = build_router(AppState::new(repository));

        let addr: SocketAddr = settings.server.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Server is running on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}
