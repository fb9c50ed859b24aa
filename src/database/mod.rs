pub mod manager;
pub mod scoped;

pub use manager::{DatabaseError, DatabaseManager};
pub use scoped::{QueryArgs, ScopedDb};

use crate::middleware::RequestIdentity;

/// Per-request scoped-handle factory: shared pool + extracted identity.
/// Called once per request by the protocol adapters.
pub async fn scoped_db(identity: RequestIdentity) -> Result<ScopedDb, DatabaseError> {
    let pool = DatabaseManager::shared_pool().await?;
    Ok(ScopedDb::new(pool, identity.0))
}
