use sqlx::{PgPool, Postgres, Transaction};

use super::{entity::*, error::*};
use crate::entity::*;

#[derive(Debug, Clone)]
pub(super) struct PeriodRepo {
    pool: PgPool,
}

impl PeriodRepo {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }

    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        new_period: NewPeriod,
    ) -> Result<Period, PeriodError> {
        let id = new_period.id;
        sqlx::query(
            r#"INSERT INTO tasyir_periods (id, name, start_date, end_date)
            VALUES ($1, $2, $3, $4)"#,
        )
        .bind(id)
        .bind(&new_period.name)
        .bind(new_period.start_date)
        .bind(new_period.end_date)
        .execute(&mut **tx)
        .await?;
        let mut events = new_period.initial_events();
        events.persist(tx).await?;
        let period = Period::try_from(events)?;
        Ok(period)
    }

    pub async fn persist_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        period: &mut Period,
    ) -> Result<(), PeriodError> {
        sqlx::query(r#"UPDATE tasyir_periods SET status = $2 WHERE id = $1"#)
            .bind(period.id())
            .bind(period.values().status)
            .execute(&mut **tx)
            .await?;
        period.events.persist(tx).await?;
        Ok(())
    }

    pub async fn find_by_id(&self, period_id: PeriodId) -> Result<Period, PeriodError> {
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT id, sequence, event, recorded_at
            FROM tasyir_period_events
            WHERE id = $1
            ORDER BY sequence"#,
        )
        .bind(period_id)
        .fetch_all(&self.pool)
        .await?;
        if rows.is_empty() {
            return Err(PeriodError::NotFound(period_id));
        }
        let period = Period::try_from(EntityEvents::load(rows)?)?;
        Ok(period)
    }

    pub async fn list(&self) -> Result<Vec<Period>, PeriodError> {
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT e.id, e.sequence, e.event, e.recorded_at
            FROM tasyir_period_events e
            JOIN tasyir_periods p ON p.id = e.id
            ORDER BY p.start_date DESC, e.id, e.sequence"#,
        )
        .fetch_all(&self.pool)
        .await?;
        EntityEvents::load_grouped(rows)?
            .into_iter()
            .map(|events| Period::try_from(events).map_err(PeriodError::from))
            .collect()
    }
}
