//! Domain services (business logic)

pub mod auth_service;
pub mod user_service;
pub mod client_service;
pub mod company_service;
pub mod follow_up_service;
pub mod notification_service;
pub mod escalation_service;
pub mod dashboard_service;

pub use auth_service::{AuthService, LoginResult};
pub use user_service::UserService;
pub use client_service::ClientService;
pub use company_service::CompanyService;
pub use follow_up_service::{FollowUpPickLists, FollowUpService};
pub use notification_service::{CreationOutcome, NotificationService};
pub use escalation_service::{EscalationReport, EscalationService};
pub use dashboard_service::{DashboardOverview, DashboardService};
