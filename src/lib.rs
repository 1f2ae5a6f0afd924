pub mod app;
pub mod calendar;
pub mod config;
pub mod edit;
pub mod errors;
pub mod handlers;
pub mod holidays;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod weather;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::RecordStore;
