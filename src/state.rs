use std::sync::Mutex;

use crate::config::AppConfig;
use crate::ledger::Ledger;
use crate::notify::NotificationSink;
use crate::storage::StorageAdapter;

pub struct AppState {
    pub ledger: Mutex<Ledger>,
    pub store: Box<dyn StorageAdapter>,
    pub config: AppConfig,
    pub notifier: Box<dyn NotificationSink>,
}
