pub mod clubs;
pub mod transactions;
pub mod users;

pub use clubs::ClubRepository;
pub use transactions::{approve_club_tx, create_admin_user_tx, set_user_role_tx};
pub use users::UserRepository;

use sqlx::{PgPool, Postgres, Transaction};

use clubhub_common::Result;

/// Bundle of clubs-domain repositories sharing one pool
#[derive(Clone)]
pub struct ClubsRepositories {
    pub users: UserRepository,
    pub clubs: ClubRepository,
    pool: PgPool,
}

impl ClubsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            clubs: ClubRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a transaction for multi-step writes
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
        Ok(self.pool.begin().await.map_err(clubhub_common::Error::Database)?)
    }
}
