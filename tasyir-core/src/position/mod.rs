mod entity;
pub mod error;
mod repo;

use sqlx::PgPool;
use tracing::instrument;

pub use entity::*;
use error::*;
use repo::*;

#[derive(Clone)]
pub struct Positions {
    repo: PositionRepo,
    pool: PgPool,
}

impl Positions {
    pub(crate) fn new(pool: &PgPool) -> Self {
        Self {
            repo: PositionRepo::new(pool),
            pool: pool.clone(),
        }
    }

    #[instrument(name = "tasyir.positions.create", skip(self))]
    pub async fn create(&self, new_position: NewPosition) -> Result<Position, PositionError> {
        let mut tx = self.pool.begin().await?;
        let position = self.repo.create_in_tx(&mut tx, new_position).await?;
        tx.commit().await?;
        Ok(position)
    }

    #[instrument(name = "tasyir.positions.update", skip(self, update))]
    pub async fn update(
        &self,
        position_id: PositionId,
        update: PositionUpdate,
    ) -> Result<Position, PositionError> {
        let mut position = self.repo.find_by_id(position_id).await?;
        position.update(update);
        let mut tx = self.pool.begin().await?;
        self.repo.persist_in_tx(&mut tx, &mut position).await?;
        tx.commit().await?;
        Ok(position)
    }

    #[instrument(name = "tasyir.positions.find_by_id", skip(self), err)]
    pub async fn find_by_id(&self, position_id: PositionId) -> Result<Position, PositionError> {
        self.repo.find_by_id(position_id).await
    }

    #[instrument(name = "tasyir.positions.list", skip(self))]
    pub async fn list(&self) -> Result<Vec<Position>, PositionError> {
        self.repo.list().await
    }
}
