use sqlx::{PgPool, Postgres, Transaction};

use super::{entity::*, error::*};
use crate::entity::*;

#[derive(Debug, Clone)]
pub(super) struct PositionRepo {
    pool: PgPool,
}

impl PositionRepo {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }

    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        new_position: NewPosition,
    ) -> Result<Position, PositionError> {
        let id = new_position.id;
        sqlx::query(r#"INSERT INTO tasyir_positions (id, title, department_id) VALUES ($1, $2, $3)"#)
            .bind(id)
            .bind(&new_position.title)
            .bind(new_position.department_id)
            .execute(&mut **tx)
            .await?;
        let mut events = new_position.initial_events();
        events.persist(tx).await?;
        let position = Position::try_from(events)?;
        Ok(position)
    }

    pub async fn persist_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        position: &mut Position,
    ) -> Result<(), PositionError> {
        sqlx::query(r#"UPDATE tasyir_positions SET title = $2, department_id = $3 WHERE id = $1"#)
            .bind(position.id())
            .bind(&position.values().title)
            .bind(position.values().department_id)
            .execute(&mut **tx)
            .await?;
        position.events.persist(tx).await?;
        Ok(())
    }

    pub async fn find_by_id(&self, position_id: PositionId) -> Result<Position, PositionError> {
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT id, sequence, event, recorded_at
            FROM tasyir_position_events
            WHERE id = $1
            ORDER BY sequence"#,
        )
        .bind(position_id)
        .fetch_all(&self.pool)
        .await?;
        if rows.is_empty() {
            return Err(PositionError::NotFound(position_id));
        }
        let position = Position::try_from(EntityEvents::load(rows)?)?;
        Ok(position)
    }

    pub async fn list(&self) -> Result<Vec<Position>, PositionError> {
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT e.id, e.sequence, e.event, e.recorded_at
            FROM tasyir_position_events e
            JOIN tasyir_positions p ON p.id = e.id
            ORDER BY p.title, e.id, e.sequence"#,
        )
        .fetch_all(&self.pool)
        .await?;
        EntityEvents::load_grouped(rows)?
            .into_iter()
            .map(|events| Position::try_from(events).map_err(PositionError::from))
            .collect()
    }
}
