use std::collections::HashMap;
use parking_lot::RwLock;
use crate::model::account::Account;
use crate::model::attempt::LoginAttempt;
use crate::model::session::SessionRecord;
use crate::model::settings::Settings;

///
/// The shared store - one keyed table per entity, guarded per-table.
///
/// The portal runs single-process, so the relational layout is held in memory: accounts
/// and sessions keyed by surrogate id, the settings singleton, and the append-only
/// login-attempt ledger. Each db-layer function takes one lock for the duration of its
/// mutation so a logical update is applied atomically.
///
pub struct Store {
    pub(crate) accounts: RwLock<HashMap<String, Account>>,
    pub(crate) settings: RwLock<Option<Settings>>,
    pub(crate) sessions: RwLock<HashMap<String, SessionRecord>>,
    pub(crate) attempts: RwLock<Vec<LoginAttempt>>,
}

impl Store {
    pub fn new() -> Self {
        Store {
            accounts: RwLock::new(HashMap::new()),
            settings: RwLock::new(None),
            sessions: RwLock::new(HashMap::new()),
            attempts: RwLock::new(Vec::new()),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::new()
    }
}
