pub mod sqlite;

pub const KEY_BOOKINGS: &str = "bookings";
pub const KEY_WAITLIST: &str = "waitlist";
pub const KEY_CONTACTS: &str = "contacts";

/// Keyed JSON-text persistence. The ledger reads whole blobs at startup and
/// writes them back after each mutation; concurrent writers to the same
/// backing file are last-write-wins and not arbitrated here.
pub trait StorageAdapter: Send + Sync {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> anyhow::Result<()>;
}
