mod entity;
pub mod error;
mod repo;

use sqlx::PgPool;
use tracing::instrument;

pub use entity::*;
use error::*;
use repo::*;

/// Service for working with accounting `Period` entities.
#[derive(Clone)]
pub struct Periods {
    repo: PeriodRepo,
    pool: PgPool,
}

impl Periods {
    pub(crate) fn new(pool: &PgPool) -> Self {
        Self {
            repo: PeriodRepo::new(pool),
            pool: pool.clone(),
        }
    }

    #[instrument(name = "tasyir.periods.create", skip(self))]
    pub async fn create(&self, new_period: NewPeriod) -> Result<Period, PeriodError> {
        if new_period.end_date < new_period.start_date {
            return Err(PeriodError::InvalidDateRange);
        }
        let mut tx = self.pool.begin().await?;
        let period = self.repo.create_in_tx(&mut tx, new_period).await?;
        tx.commit().await?;
        Ok(period)
    }

    #[instrument(name = "tasyir.periods.find_by_id", skip(self), err)]
    pub async fn find_by_id(&self, period_id: PeriodId) -> Result<Period, PeriodError> {
        self.repo.find_by_id(period_id).await
    }

    #[instrument(name = "tasyir.periods.list", skip(self))]
    pub async fn list(&self) -> Result<Vec<Period>, PeriodError> {
        self.repo.list().await
    }

    /// Closes the period. Journal entries belonging to it become immutable.
    #[instrument(name = "tasyir.periods.close", skip(self))]
    pub async fn close(&self, period_id: PeriodId) -> Result<Period, PeriodError> {
        let mut period = self.repo.find_by_id(period_id).await?;
        period.close()?;
        let mut tx = self.pool.begin().await?;
        self.repo.persist_in_tx(&mut tx, &mut period).await?;
        tx.commit().await?;
        Ok(period)
    }
}
