use std::time::Instant;

use crate::store::FaucetStore;

#[derive(Clone)]
pub struct AppState {
    pub store: FaucetStore,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: FaucetStore) -> Self {
        Self {
            store,
            start_time: Instant::now(),
        }
    }
}
