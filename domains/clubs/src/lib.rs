//! Clubs domain: users, sessions, club lifecycle and admin approval

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
// Re-export repository types
pub use repository::{
    approve_club_tx, create_admin_user_tx, set_user_role_tx, ClubRepository, ClubsRepositories,
    UserRepository,
};

// Re-export API types
pub use api::routes;
pub use api::ClubsState;
