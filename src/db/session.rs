use chrono::{DateTime, Utc};
use crate::db::store::Store;
use crate::model::session::SessionRecord;

pub fn insert(store: &Store, record: SessionRecord) {
    store.sessions.write().insert(record.session_id.clone(), record);
}

pub fn find(store: &Store, session_id: &str) -> Option<SessionRecord> {
    store.sessions.read().get(session_id).cloned()
}

///
/// Advance the session's last-activity stamp. Returns false if the record is gone.
///
/// Last-writer-wins under concurrent requests from the same session is fine here - the
/// idle-timeout invariant is monotonic and tolerates a slightly extended window.
///
pub fn touch(store: &Store, session_id: &str, now: DateTime<Utc>) -> bool {
    match store.sessions.write().get_mut(session_id) {
        Some(record) => {
            record.last_activity = now;
            true
        },
        None => false,
    }
}

///
/// Delete the session. Idempotent - deleting a token that isn't there is not an error.
///
pub fn delete(store: &Store, session_id: &str) -> bool {
    store.sessions.write().remove(session_id).is_some()
}

///
/// Delete every live session for the account, returning how many were evicted.
///
pub fn delete_for_account(store: &Store, account_id: &str) -> usize {
    let mut sessions = store.sessions.write();
    let doomed: Vec<String> = sessions.values()
        .filter(|record| record.account_id == account_id)
        .map(|record| record.session_id.clone())
        .collect();

    for session_id in &doomed {
        sessions.remove(session_id);
    }

    doomed.len()
}

pub fn for_account(store: &Store, account_id: &str) -> Vec<SessionRecord> {
    store.sessions.read()
        .values()
        .filter(|record| record.account_id == account_id)
        .cloned()
        .collect()
}
