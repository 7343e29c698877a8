//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::account::AccountService;
use crate::infrastructure::advice::{AdviceService, ChatService};
use crate::infrastructure::appointment::AppointmentService;
use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::doctor::DoctorSearchService;

/// Shared services handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub jwt_service: Arc<dyn JwtGenerator>,
    pub appointments: Arc<AppointmentService>,
    pub doctor_search: Arc<DoctorSearchService>,
    pub health_advice: Arc<AdviceService>,
    pub medicine_advice: Arc<AdviceService>,
    pub chat: Arc<ChatService>,
    /// Radius used when a search gives a point but no radius
    pub default_radius_km: f64,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("default_radius_km", &self.default_radius_km)
            .finish_non_exhaustive()
    }
}
