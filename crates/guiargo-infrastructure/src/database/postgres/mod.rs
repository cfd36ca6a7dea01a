//! PostgreSQL repository implementations

pub mod user_repo_impl;
pub mod client_repo_impl;
pub mod company_repo_impl;
pub mod entity_directory_impl;
pub mod follow_up_repo_impl;
pub mod notification_repo_impl;
pub mod stats_repo_impl;

pub use user_repo_impl::PgUserRepository;
pub use client_repo_impl::PgClientRepository;
pub use company_repo_impl::PgCompanyRepository;
pub use entity_directory_impl::PgEntityDirectory;
pub use follow_up_repo_impl::PgFollowUpRepository;
pub use notification_repo_impl::PgNotificationRepository;
pub use stats_repo_impl::PgStatsRepository;
