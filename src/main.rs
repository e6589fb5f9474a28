use std::{future::IntoFuture, process, sync::Arc};

use arcadia::{
    application::{
        content::{ContentService, Loaded},
        error::AppError,
    },
    cache::CacheConfig,
    config,
    domain::documents::Document,
    infra::{
        error::InfraError,
        http::{self, HttpState},
        store::{DocumentStore, FileStore},
        telemetry,
    },
};
use tokio::{signal, sync::Notify, task::JoinError};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli().map_err(|err| {
        InfraError::configuration(format!("failed to load configuration: {err}"))
    })?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::CheckData(_) => run_check_data(settings).await,
    }
}

fn content_service(settings: &config::Settings) -> Arc<ContentService> {
    let store: Arc<dyn DocumentStore> = Arc::new(FileStore::new(&settings.data.directory));
    Arc::new(ContentService::new(
        store,
        &CacheConfig::from(&settings.cache),
    ))
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let content = content_service(&settings);
    let state = HttpState::new(content, &settings.data, &settings.admin);
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(InfraError::from)?;
    info!(
        addr = %settings.server.addr,
        data_directory = %settings.data.directory.display(),
        admin_enabled = settings.admin.enabled,
        "Arcadia listening"
    );

    let shutdown = Arc::new(Notify::new());
    let signalled = Arc::clone(&shutdown);
    let mut server = tokio::spawn(
        axum::serve(listener, router.into_make_service())
            .with_graceful_shutdown(async move { signalled.notified().await })
            .into_future(),
    );

    tokio::select! {
        result = &mut server => return server_outcome(result),
        () = shutdown_signal() => {}
    }

    info!(
        grace_seconds = settings.server.graceful_shutdown.as_secs(),
        "Shutdown requested; draining connections"
    );
    shutdown.notify_one();

    match tokio::time::timeout(settings.server.graceful_shutdown, server).await {
        Ok(result) => server_outcome(result),
        Err(_) => {
            warn!("Graceful shutdown window elapsed; exiting with requests in flight");
            Ok(())
        }
    }
}

fn server_outcome(result: Result<std::io::Result<()>, JoinError>) -> Result<(), AppError> {
    match result {
        Ok(outcome) => outcome.map_err(|err| InfraError::from(err).into()),
        Err(err) => Err(InfraError::from(std::io::Error::other(err)).into()),
    }
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

async fn run_check_data(settings: config::Settings) -> Result<(), AppError> {
    let content = content_service(&settings);
    let mut defaulted = 0usize;

    defaulted += check(Document::HomepageContent, &content.homepage_content().await);
    defaulted += check(Document::Ads, &content.ads().await);
    defaulted += check(Document::Games, &content.games().await);
    defaulted += check(Document::Categories, &content.categories().await);
    defaulted += check(Document::FeaturedGames, &content.featured_games().await);
    defaulted += check(Document::SeoSettings, &content.seo_settings().await);
    defaulted += check(Document::FooterContent, &content.footer_content().await);

    if defaulted > 0 {
        return Err(InfraError::configuration(format!(
            "{defaulted} of {} documents fell back to defaults under {}",
            Document::ALL.len(),
            settings.data.directory.display()
        ))
        .into());
    }

    info!(
        documents = Document::ALL.len(),
        data_directory = %settings.data.directory.display(),
        "All documents loaded"
    );
    Ok(())
}

fn check<T>(document: Document, loaded: &Loaded<T>) -> usize {
    match loaded.cause() {
        None => {
            info!(document = %document, "Loaded");
            0
        }
        Some(cause) => {
            warn!(document = %document, error = %cause, "Defaulted");
            1
        }
    }
}
