use crate::modules::bookmarks::store::BookmarkStore;
use crate::shared::core::clock::Clock;
use crate::shared::infrastructure::key_value_store::KeyValueStore;
use std::sync::Arc;

pub type SharedStore = Arc<BookmarkStore<dyn KeyValueStore>>;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

impl AppState {
    pub fn new(storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Arc::new(BookmarkStore::new(storage, clock)),
        }
    }
}
