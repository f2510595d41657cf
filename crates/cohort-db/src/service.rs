//! Service layer tying the database handle to engine policy.
//!
//! `CohortService` wraps `CohortDb` (raw database access) and the retry and
//! scan settings that the attendance engine and the backfill pass need. All
//! repository methods are implemented as `impl CohortService` blocks, so a
//! caller only ever passes one handle around.

use cohort_config::CohortConfig;

use crate::CohortDb;
use crate::error::DatabaseError;
use crate::retry::RetryConfig;

/// Default number of student ids fetched per backfill page.
const DEFAULT_PAGE_SIZE: u32 = 100;

pub struct CohortService {
    db: CohortDb,
    retry: RetryConfig,
    backfill_page_size: u32,
}

impl CohortService {
    /// Create a new service over a local database with default policy.
    ///
    /// # Arguments
    ///
    /// * `db_path`: Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = CohortDb::open_local(db_path).await?;
        Ok(Self::from_db(db, RetryConfig::default()))
    }

    /// Create a service from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the configured database cannot be opened.
    pub async fn from_config(config: &CohortConfig) -> Result<Self, DatabaseError> {
        let db = CohortDb::open_local(&config.database.path).await?;
        Ok(Self::from_db(db, RetryConfig::from(&config.attendance))
            .with_backfill_page_size(config.backfill.page_size))
    }

    /// Create from an existing `CohortDb` (for testing).
    #[must_use]
    pub const fn from_db(db: CohortDb, retry: RetryConfig) -> Self {
        Self {
            db,
            retry,
            backfill_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    #[must_use]
    pub fn with_backfill_page_size(mut self, page_size: u32) -> Self {
        self.backfill_page_size = page_size.max(1);
        self
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &CohortDb {
        &self.db
    }

    /// Retry policy for attendance conflicts and document compare-and-swap.
    #[must_use]
    pub const fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    #[must_use]
    pub const fn backfill_page_size(&self) -> u32 {
        self.backfill_page_size
    }
}
