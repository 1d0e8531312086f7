//! Inbound port. The front-end adapter drives the application through this.

use crate::domain::DomainError;

/// Input port: interactive front-end loop.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run until the user quits. Recoverable failures are shown, not returned.
    async fn run(&self) -> Result<(), DomainError>;
}
