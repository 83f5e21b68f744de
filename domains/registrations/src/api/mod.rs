pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::RegistrationsState;
pub use routes::routes;
