//! TidySub server binary.
//!
//! Loads configuration, wires adapters into the application handlers, and
//! serves the HTTP API until Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tidysub::adapters::clock::SystemClock;
use tidysub::adapters::http::middleware::CronAuth;
use tidysub::adapters::http::{api_router, ReminderAppState, SubscriptionAppState};
use tidysub::adapters::ledger::{InMemoryNotificationLedger, RedisNotificationLedger};
use tidysub::adapters::notifier::LoggingNotifier;
use tidysub::adapters::postgres::PostgresSubscriptionReader;
use tidysub::adapters::push::{VapidCredentials, WebPushConfig, WebPushTransport};
use tidysub::adapters::storage::{
    FileSubscriptionStore, InMemorySubscriptionStore, RedisSubscriptionStore, UnavailableStore,
};
use tidysub::application::handlers::reminders::{
    spawn_device_loop, CheckDeviceRemindersHandler, DeviceSettings, PushSetup,
    RunReminderSweepHandler, SendNotificationHandler, SweepSettings,
};
use tidysub::config::{AppConfig, PushConfig, ServerConfig, StoreBackend, StoreConfig};
use tidysub::ports::{Clock, NotificationLedger, SubscriptionReader, SubscriptionRepository};

const LEDGER_PREFIX: &str = "tidysub:notified";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    init_tracing(&config.server);
    tracing::info!(
        environment = ?config.server.environment,
        store = ?config.store.backend,
        "Starting TidySub"
    );

    let (reader, repository) = build_store(&config.store).await?;
    let push = build_push(&config.push)?;
    let ledger = build_ledger(&config.store).await?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(config.cron.tz()?));

    let sweep_handler = RunReminderSweepHandler::new(
        reader.clone(),
        push.clone(),
        SweepSettings {
            delivery_timeout: config.push.timeout(),
            max_concurrency: config.push.max_concurrency,
            dedupe_same_day: config.cron.dedupe_same_day,
        },
    )
    .with_ledger(ledger);

    let reminders = ReminderAppState {
        sweep_handler: Arc::new(sweep_handler),
        send_handler: Arc::new(SendNotificationHandler::new(push, config.push.timeout())),
        clock: clock.clone(),
        cron_auth: CronAuth::new(config.cron.secret.clone()),
    };
    let subscriptions = SubscriptionAppState {
        reader: reader.clone(),
        repository,
        clock: clock.clone(),
    };

    if config.cron.secret.is_none() {
        tracing::warn!("TIDYSUB__CRON__SECRET is not set; the cron trigger will refuse to run");
    }

    let device_loop = config.device.enabled.then(|| {
        let handler = Arc::new(CheckDeviceRemindersHandler::new(
            reader.clone(),
            Arc::new(LoggingNotifier::default()),
        ));
        let settings = DeviceSettings {
            reminders_enabled: config.device.reminders_enabled,
            notifications_enabled: config.device.notifications_enabled,
        };
        tracing::info!(every_secs = config.device.check_interval_secs, "Device reminder loop enabled");
        spawn_device_loop(handler, clock.clone(), settings, config.device.check_interval())
    });

    let app = api_router(subscriptions, reminders)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(handle) = device_loop {
        handle.abort();
    }
    tracing::info!("Shut down");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

async fn build_store(
    config: &StoreConfig,
) -> anyhow::Result<(Arc<dyn SubscriptionReader>, Arc<dyn SubscriptionRepository>)> {
    if let Some(missing) = config.missing_credential() {
        tracing::warn!(missing, "Store credentials absent; store requests will fail");
        let store = Arc::new(UnavailableStore::missing_configuration(missing));
        return Ok((store.clone(), store));
    }

    // missing_credential() guarantees the backend's setting is present.
    let setting = |value: &Option<String>| value.clone().unwrap_or_default();

    Ok(match config.backend {
        StoreBackend::Memory => {
            let store = Arc::new(InMemorySubscriptionStore::new());
            (store.clone(), store)
        }
        StoreBackend::File => {
            let store = Arc::new(FileSubscriptionStore::new(setting(&config.file_path)));
            (store.clone(), store)
        }
        StoreBackend::Redis => {
            let store = RedisSubscriptionStore::connect(&setting(&config.redis_url), &config.redis_key)
                .await
                .context("Failed to connect to Redis subscription store")?;
            let store = Arc::new(store);
            (store.clone(), store)
        }
        StoreBackend::Postgres => {
            let reader = PostgresSubscriptionReader::connect_lazy(
                &setting(&config.database_url),
                config.max_connections,
            )
            .context("Failed to configure PostgreSQL pool")?;
            (Arc::new(reader), Arc::new(UnavailableStore::read_only("postgres")))
        }
    })
}

fn build_push(config: &PushConfig) -> anyhow::Result<PushSetup> {
    let missing = config.missing_credentials();
    if !missing.is_empty() {
        tracing::warn!(?missing, "Push credentials absent; deliveries will fail");
        return Ok(PushSetup::missing(missing));
    }

    let (Some(subject), Some(public_key), Some(private_key)) = (
        config.vapid_subject.clone(),
        config.vapid_public_key.clone(),
        config.vapid_private_key.clone(),
    ) else {
        return Ok(PushSetup::missing(missing));
    };

    let transport = WebPushTransport::new(WebPushConfig {
        vapid: VapidCredentials {
            subject,
            public_key,
            private_key,
        },
        ttl_secs: config.ttl_secs,
    })
    .context("Failed to build Web Push client")?;

    Ok(PushSetup::ready(Arc::new(transport)))
}

/// Redis when a URL is configured so every instance shares one ledger.
async fn build_ledger(config: &StoreConfig) -> anyhow::Result<Arc<dyn NotificationLedger>> {
    match config.redis_url.as_deref().filter(|u| !u.trim().is_empty()) {
        Some(url) => {
            let conn = redis::Client::open(url)
                .context("Invalid Redis URL")?
                .get_multiplexed_async_connection()
                .await
                .context("Failed to connect to Redis notification ledger")?;
            Ok(Arc::new(RedisNotificationLedger::new(conn, LEDGER_PREFIX)))
        }
        None => Ok(Arc::new(InMemoryNotificationLedger::new())),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
