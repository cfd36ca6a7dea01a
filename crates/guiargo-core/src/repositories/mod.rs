//! Repository traits (ports)
//!
//! Implemented against PostgreSQL in `guiargo-infrastructure`; mocked with
//! `mockall` in service tests.

pub mod user_repository;
pub mod client_repository;
pub mod company_repository;
pub mod entity_directory;
pub mod follow_up_repository;
pub mod notification_repository;
pub mod stats_repository;

pub use user_repository::UserRepository;
pub use client_repository::ClientRepository;
pub use company_repository::CompanyRepository;
pub use entity_directory::EntityDirectory;
pub use follow_up_repository::FollowUpRepository;
pub use notification_repository::NotificationRepository;
pub use stats_repository::StatsRepository;

#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use client_repository::MockClientRepository;
#[cfg(test)]
pub use company_repository::MockCompanyRepository;
#[cfg(test)]
pub use entity_directory::MockEntityDirectory;
#[cfg(test)]
pub use follow_up_repository::MockFollowUpRepository;
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
#[cfg(test)]
pub use stats_repository::MockStatsRepository;
