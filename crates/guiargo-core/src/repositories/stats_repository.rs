//! Dashboard counters (port)

use async_trait::async_trait;

use crate::domain::DashboardStats;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn dashboard_stats(&self) -> Result<DashboardStats, DomainError>;
}
