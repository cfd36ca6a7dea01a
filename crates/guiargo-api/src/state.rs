use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;
use tracing::warn;

use guiargo_core::services::{
    AuthService, ClientService, CompanyService, DashboardService, EscalationService,
    FollowUpService, NotificationService, UserService,
};
use guiargo_infrastructure::{
    PgClientRepository, PgCompanyRepository, PgEntityDirectory, PgFollowUpRepository,
    PgNotificationRepository, PgStatsRepository, PgUserRepository,
};
use guiargo_security::SessionService;
use guiargo_shared::config::AppConfig;

use crate::views::Views;

pub type Auth = AuthService<PgUserRepository>;
pub type Users = UserService<PgUserRepository>;
pub type Clients = ClientService<PgClientRepository>;
pub type Companies = CompanyService<PgCompanyRepository>;
pub type FollowUps = FollowUpService<PgFollowUpRepository, PgEntityDirectory, PgUserRepository>;
pub type Notifications =
    NotificationService<PgNotificationRepository, PgFollowUpRepository, PgEntityDirectory>;
pub type Escalation = EscalationService<PgNotificationRepository, PgFollowUpRepository>;
pub type Dashboard = DashboardService<PgStatsRepository, PgNotificationRepository, PgFollowUpRepository>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub views: Arc<Views>,
    pub auth: Arc<Auth>,
    pub users: Arc<Users>,
    pub clients: Arc<Clients>,
    pub companies: Arc<Companies>,
    pub follow_ups: Arc<FollowUps>,
    pub notifications: Arc<Notifications>,
    pub escalation: Arc<Escalation>,
    pub dashboard: Arc<Dashboard>,
    pub directory: Arc<PgEntityDirectory>,
}

impl AppState {
    /// Wires the PostgreSQL repositories into the domain services.
    pub fn new(db: PgPool, config: AppConfig, views: Views) -> Self {
        let sessions = if config.session.secret.is_empty() {
            warn!("session.secret is not set; sessions will not survive a restart");
            SessionService::with_ephemeral_secret(config.session.expiry_hours)
        } else {
            SessionService::new(&config.session.secret, config.session.expiry_hours)
        };

        let user_repo = Arc::new(PgUserRepository::new(db.clone()));
        let client_repo = Arc::new(PgClientRepository::new(db.clone()));
        let company_repo = Arc::new(PgCompanyRepository::new(db.clone()));
        let follow_up_repo = Arc::new(PgFollowUpRepository::new(db.clone()));
        let notification_repo = Arc::new(PgNotificationRepository::new(db.clone()));
        let stats_repo = Arc::new(PgStatsRepository::new(db.clone()));
        let directory = Arc::new(PgEntityDirectory::new(db.clone()));

        Self {
            auth: Arc::new(AuthService::new(user_repo.clone(), Arc::new(sessions))),
            users: Arc::new(UserService::new(user_repo.clone())),
            clients: Arc::new(ClientService::new(client_repo)),
            companies: Arc::new(CompanyService::new(company_repo)),
            follow_ups: Arc::new(FollowUpService::new(
                follow_up_repo.clone(),
                directory.clone(),
                user_repo,
            )),
            notifications: Arc::new(NotificationService::new(
                notification_repo.clone(),
                follow_up_repo.clone(),
                directory.clone(),
            )),
            escalation: Arc::new(EscalationService::new(
                notification_repo.clone(),
                follow_up_repo.clone(),
            )),
            dashboard: Arc::new(DashboardService::new(stats_repo, notification_repo, follow_up_repo)),
            directory,
            views: Arc::new(views),
            config: Arc::new(config),
            db,
        }
    }

    pub fn secure_cookies(&self) -> bool {
        self.config.session.secure_cookie
    }
}

impl FromRef<AppState> for PgPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
