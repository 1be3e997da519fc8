use tokio::sync::OnceCell;

use crate::domain::bootstrap::errors::BootstrapError;
use crate::domain::bootstrap::use_cases::initialize::InitializeDatabaseUseCase;
use crate::domain::database::repository::DatabaseHandle;

/// Initialize-once slot for the process-wide database handle.
///
/// The first successful initialization is kept for the lifetime of the slot
/// and every later caller receives the same instance. A failed attempt leaves
/// the slot empty.
#[derive(Default)]
pub struct SharedDatabase {
    cell: OnceCell<DatabaseHandle>,
}

impl SharedDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle if initialization already succeeded.
    pub fn get(&self) -> Option<DatabaseHandle> {
        self.cell.get().cloned()
    }

    pub async fn get_or_initialize(
        &self,
        use_case: &dyn InitializeDatabaseUseCase,
    ) -> Result<DatabaseHandle, BootstrapError> {
        let handle = self.cell.get_or_try_init(|| use_case.execute()).await?;
        Ok(handle.clone())
    }
}
