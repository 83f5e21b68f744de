pub mod registrations;
pub mod teams;
pub mod transactions;

pub use registrations::RegistrationRepository;
pub use teams::TeamRepository;
pub use transactions::submit_registration_tx;

use sqlx::{PgPool, Postgres, Transaction};

use clubhub_common::Result;

/// Bundle of registrations-domain repositories sharing one pool
#[derive(Clone)]
pub struct RegistrationsRepositories {
    pub teams: TeamRepository,
    pub registrations: RegistrationRepository,
    pool: PgPool,
}

impl RegistrationsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            teams: TeamRepository::new(pool.clone()),
            registrations: RegistrationRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a transaction for the submission workflow
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
        Ok(self
            .pool
            .begin()
            .await
            .map_err(clubhub_common::Error::Database)?)
    }
}
