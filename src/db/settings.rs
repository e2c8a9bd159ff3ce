use crate::db::store::Store;
use crate::model::settings::Settings;

///
/// Load the settings singleton, lazily creating it with defaults on first access.
///
/// Callers take a snapshot per logical operation - the snapshot is never held across
/// operations, so a settings change applies from the very next call.
///
pub fn load(store: &Store) -> Settings {
    let mut guard = store.settings.write();
    guard.get_or_insert_with(Settings::default).clone()
}

///
/// Replace the settings singleton.
///
pub fn save(store: &Store, settings: Settings) {
    *store.settings.write() = Some(settings);
}
