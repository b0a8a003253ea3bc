mod cache;
mod session;

pub use cache::{CacheStats, CacheStore, CachedResult, StoreError};
pub use session::{SESSION_COOKIE, SessionManager};
