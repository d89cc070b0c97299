use crate::fetcher::StatFetcher;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub fetcher: StatFetcher,
}

impl AppState {
    pub fn new(store: Store, fetcher: StatFetcher) -> Self {
        Self { store, fetcher }
    }
}
