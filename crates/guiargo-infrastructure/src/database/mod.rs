//! Database module (PostgreSQL adapters)

pub mod connection;
pub mod postgres;
mod query;

pub use connection::{create_pool, ping, run_migrations};
pub use postgres::{
    PgClientRepository, PgCompanyRepository, PgEntityDirectory, PgFollowUpRepository,
    PgNotificationRepository, PgStatsRepository, PgUserRepository,
};
