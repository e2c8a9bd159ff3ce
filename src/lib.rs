mod db;
pub mod model;
pub mod services;
pub mod utils;

use std::sync::Arc;
use dotenv::dotenv;
use db::store::Store;
use model::account::{Account, Role};
use model::algorithm;
use utils::config::{self, Configuration};
use utils::context::ServiceContext;
use utils::errors::WardenError;
use tracing_subscriber::{prelude::__tracing_subscriber_SubscriberExt, Registry, util::SubscriberInitExt};

const APP_NAME: &str = "Warden";

///
/// Build a ready-to-use service context from the environment: load any local dev
/// settings from a .env file, initialise tracing, then seed the store.
///
/// The embedding web layer calls this once at start-up and threads the returned context
/// into every core operation.
///
pub async fn initialise_from_env() -> Result<Arc<ServiceContext>, WardenError> {
    dotenv().ok();

    // Default log level to INFO if it's not specified.
    config::default_env("RUST_LOG", "INFO");
    init_tracing();

    let config = Configuration::from_env()?;
    tracing::info!("{} starting\n{}", APP_NAME, config.fmt_console()?);

    initialise(config).await
}

///
/// Build a service context around a fresh store, seeding the settings singleton and the
/// factory bootstrap super-admin account.
///
pub async fn initialise(config: Configuration) -> Result<Arc<ServiceContext>, WardenError> {
    let ctx = Arc::new(ServiceContext::new(config, Store::new()));
    seed(&ctx).await?;
    Ok(ctx)
}

///
/// Seed anything the store is missing: the settings singleton, and the bootstrap
/// super-admin holding the default password with its first-login flag set - the account
/// whose only purpose is to perform the one-time escalation into a real super-admin.
///
async fn seed(ctx: &Arc<ServiceContext>) -> Result<(), WardenError> {
    // Forces the settings singleton into existence with defaults.
    let settings = db::settings::load(ctx.store());

    let handle = ctx.config().bootstrap_handle.clone();
    if db::account::handle_in_use(&handle, ctx.store()) {
        return Ok(())
    }

    let default_password = settings.default_password;
    let phc = tokio::task::spawn_blocking(move || algorithm::hash_into_phc(&default_password))
        .await
        .map_err(WardenError::from)??;

    let account = Account {
        account_id: utils::generate_id(),
        handle: handle.clone(),
        display_name: ctx.config().bootstrap_display_name.clone(),
        phc,
        role: Role::SuperAdmin,
        active: true,
        locked: false,
        locked_until: None,
        failed_attempts: 0,
        first_login: true,
        password_changed_at: None,
        last_login: None,
        created_on: ctx.now(),
    };

    db::account::insert(account, ctx.store())?;
    tracing::info!("Seeded bootstrap account '{}' - escalate it to a named super-admin before normal use", handle);

    Ok(())
}

///
/// Initialise tracing for embedding binaries and tests.
///
pub fn init_tracing() {
    if let Err(err) = Registry::default()
        .with(tracing_subscriber::EnvFilter::from_default_env()) // Set the tracing level to match RUST_LOG env variable.
        .with(tracing_subscriber::fmt::layer().with_test_writer().with_ansi(true))
        .try_init() {
            tracing::info!("Tracing already initialised: {}", err.to_string()); // Allowed error here - tests call this fn repeatedly.
    }
}
