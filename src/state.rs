use crate::config::Config;
use crate::storage::RecordStore;
use crate::weather::WeatherLookup;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: RecordStore,
    pub weather: Arc<dyn WeatherLookup>,
    /// Held for the whole of an edit so saves run one at a time.
    pub edit_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: Config, weather: Arc<dyn WeatherLookup>) -> Self {
        let store = RecordStore::new(config.data_path.clone());
        Self {
            config: Arc::new(config),
            store,
            weather,
            edit_lock: Arc::new(Mutex::new(())),
        }
    }
}
