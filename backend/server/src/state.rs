use std::sync::Arc;

use super::{
    config::Config,
    database::{MongoStore, VisitStore},
};

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn VisitStore>,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        let store = Arc::new(MongoStore::new(&config));

        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Arc<dyn VisitStore>) -> Arc<Self> {
        Arc::new(Self { config, store })
    }
}
