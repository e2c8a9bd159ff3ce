use parking_lot::RwLock;
use chrono::{DateTime, Utc};
use crate::db::store::Store;
use crate::utils::config::Configuration;
use crate::utils::time_provider::TimeProvider;

///
/// The context is available to every service operation and gives it access to the
/// store, the configuration and the clock.
///
pub struct ServiceContext {
    store: Store,
    config: Configuration,
    time_provider: RwLock<TimeProvider>,
}

impl ServiceContext {
    pub fn new(config: Configuration, store: Store) -> Self {
        ServiceContext {
            store,
            config,
            time_provider: RwLock::new(TimeProvider::default()),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.time_provider.read().now()
    }

    ///
    /// Set or clear the fixed time - tests use this to time-travel across lockout,
    /// idle-timeout and password-expiry windows.
    ///
    pub fn set_now(&self, now: Option<DateTime<Utc>>) {
        self.time_provider.write().fix(now);
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }
}
