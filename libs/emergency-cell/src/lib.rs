pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::*;
pub use handlers::EmergencyState;
pub use services::escalation::EscalationTracker;
pub use services::gate::ConfirmationGate;
pub use services::hub::ProgressHub;
