//! # Guiargo Infrastructure
//! 
//! PostgreSQL implementations (adapters) of the core repository traits.

pub mod database;

pub use database::{
    create_pool, ping, run_migrations, PgClientRepository, PgCompanyRepository, PgEntityDirectory,
    PgFollowUpRepository, PgNotificationRepository, PgStatsRepository, PgUserRepository,
};
