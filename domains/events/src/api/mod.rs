pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::EventsState;
pub use routes::routes;
