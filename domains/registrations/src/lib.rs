//! Registrations domain: public submission workflow, teams and members,
//! registration status, payment tracking and statistics

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
// Re-export repository types
pub use repository::{
    submit_registration_tx, RegistrationRepository, RegistrationsRepositories, TeamRepository,
};

// Re-export API types
pub use api::routes;
pub use api::RegistrationsState;
