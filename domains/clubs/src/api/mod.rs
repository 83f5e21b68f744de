pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::ClubsState;
pub use routes::routes;
