mod entity;
pub mod error;
mod password;
mod repo;

use sqlx::PgPool;
use tracing::instrument;

pub use entity::*;
use error::*;
use repo::*;

/// Service for user accounts and credential checks.
#[derive(Clone)]
pub struct Users {
    repo: UserRepo,
    pool: PgPool,
}

impl Users {
    pub(crate) fn new(pool: &PgPool) -> Self {
        Self {
            repo: UserRepo::new(pool),
            pool: pool.clone(),
        }
    }

    #[instrument(name = "tasyir.users.create", skip(self, new_user))]
    pub async fn create(&self, new_user: NewUser) -> Result<User, UserError> {
        let mut tx = self.pool.begin().await?;
        let user = self.repo.create_in_tx(&mut tx, new_user).await?;
        tx.commit().await?;
        Ok(user)
    }

    #[instrument(name = "tasyir.users.update", skip(self, update))]
    pub async fn update(&self, user_id: UserId, update: UserUpdate) -> Result<User, UserError> {
        let mut user = self.repo.find_by_id(user_id).await?;
        user.update(update);
        let mut tx = self.pool.begin().await?;
        self.repo.persist_in_tx(&mut tx, &mut user).await?;
        tx.commit().await?;
        Ok(user)
    }

    #[instrument(name = "tasyir.users.set_inactivity_timeout", skip(self))]
    pub async fn set_inactivity_timeout(
        &self,
        user_id: UserId,
        secs: u32,
    ) -> Result<User, UserError> {
        let mut user = self.repo.find_by_id(user_id).await?;
        user.set_inactivity_timeout(secs)?;
        let mut tx = self.pool.begin().await?;
        self.repo.persist_in_tx(&mut tx, &mut user).await?;
        tx.commit().await?;
        Ok(user)
    }

    #[instrument(name = "tasyir.users.find_by_id", skip(self), err)]
    pub async fn find_by_id(&self, user_id: UserId) -> Result<User, UserError> {
        self.repo.find_by_id(user_id).await
    }

    #[instrument(name = "tasyir.users.find_by_username", skip(self))]
    pub async fn find_by_username(&self, username: &str) -> Result<User, UserError> {
        self.repo.find_by_username(username).await
    }

    /// Checks a username/password pair and returns the account on success.
    /// A wrong password and an unknown username are indistinguishable to
    /// the caller.
    #[instrument(name = "tasyir.users.verify_credentials", skip(self, password))]
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, UserError> {
        let credentials = match self.repo.find_credentials(username).await {
            Ok(credentials) => credentials,
            Err(UserError::UsernameNotFound(_)) => return Err(UserError::InvalidCredentials),
            Err(e) => return Err(e),
        };
        if !password::verify_password(
            &credentials.password_salt,
            &credentials.password_hash,
            password,
        ) {
            return Err(UserError::InvalidCredentials);
        }
        self.repo.find_by_id(UserId::from(credentials.id)).await
    }

    #[instrument(name = "tasyir.users.list", skip(self))]
    pub async fn list(&self) -> Result<Vec<User>, UserError> {
        self.repo.list().await
    }
}
