use gloo_storage::{LocalStorage, Storage};
use quorum_client::StateStore;

/// [`StateStore`] over the browser's LocalStorage.
///
/// Everything persisted stays a human-inspectable string; failures are logged
/// and otherwise ignored, the app keeps running on in-memory state.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserState;

impl StateStore for BrowserState {
    fn read(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = LocalStorage::raw().set_item(key, value) {
            tracing::warn!(key, "failed writing to LocalStorage: {:?}", e);
        }
    }

    fn remove(&mut self, key: &str) {
        if let Err(e) = LocalStorage::raw().remove_item(key) {
            tracing::warn!(key, "failed removing from LocalStorage: {:?}", e);
        }
    }
}
