pub mod events;
pub mod forms;

pub use events::EventRepository;
pub use forms::FormRepository;

use sqlx::PgPool;

/// Bundle of events-domain repositories sharing one pool
#[derive(Clone)]
pub struct EventsRepositories {
    pub events: EventRepository,
    pub forms: FormRepository,
    pool: PgPool,
}

impl EventsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            events: EventRepository::new(pool.clone()),
            forms: FormRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
