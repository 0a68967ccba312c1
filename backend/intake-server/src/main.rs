use intake_auth::{ClaimsAugmentor, SchemeSelector, TokenValidator};
use intake_server::{AppState, InMemoryCache, SqlitePermissionStore, build_router, error, logger};
use intake_tenant::{CorsPolicyProvider, TenantRegistry, TenantResolver, TenantScopedCache};

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = intake_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = intake_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting intake-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Tenant registry is immutable after startup
    let registry = Arc::new(TenantRegistry::from_config(config.tenants.clone())?);
    info!("Tenant registry loaded: {} tenant(s)", registry.len());

    let resolver = TenantResolver::new(registry.clone());
    let cors = Arc::new(CorsPolicyProvider::from_config(&config.cors));

    // Token validation pipelines
    let Some(ref secret) = config.auth.internal.secret else {
        unreachable!("validate() ensures the internal token secret is set")
    };
    let mut validator = TokenValidator::new(
        secret.as_bytes(),
        &config.auth.internal.issuer,
        &config.auth.internal.audience,
    );
    info!("Internal token pipeline enabled (HS256)");

    if let (Some(key_path), Some(issuer), Some(audience)) = (
        config.auth.external.public_key_path.as_ref(),
        config.auth.external.issuer.as_ref(),
        config.auth.external.audience.as_ref(),
    ) {
        let config_dir = intake_config::Config::config_dir()?;
        let full_path = config_dir.join(key_path);
        let public_key =
            std::fs::read_to_string(&full_path).map_err(|e| error::ServerError::IdpKeyFile {
                path: full_path.display().to_string(),
                source: e,
            })?;
        validator = validator.with_external(&public_key, issuer, audience)?;
        info!("External token pipeline enabled (RS256, issuer '{}')", issuer);
    } else {
        info!("External token pipeline disabled (no identity provider configured)");
    }

    let selector = Arc::new(SchemeSelector::new(config.auth.internal.issuer.clone()));

    // Permission store for claims augmentation
    let database_path = config.permissions_database_path()?;
    info!(
        "Connecting to permission store: {}",
        database_path.display()
    );
    let store = SqlitePermissionStore::connect(&database_path).await?;
    info!("Permission store connection established");

    let augmentor = Arc::new(ClaimsAugmentor::new(
        Arc::new(store),
        Duration::from_millis(config.permissions.query_timeout_ms),
    ));

    // Build application state
    let app_state = AppState {
        registry,
        resolver,
        cors,
        selector,
        validator: Arc::new(validator),
        augmentor,
        cache: TenantScopedCache::new(Arc::new(InMemoryCache::new())),
    };

    // Build router
    let app = build_router(app_state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Start server with graceful shutdown on Ctrl+C
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
                Err(e) => error!("Failed to listen for SIGINT: {}", e),
            }
        })
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}
