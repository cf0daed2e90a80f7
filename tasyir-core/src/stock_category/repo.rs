use sqlx::{PgPool, Postgres, Transaction};

use super::{entity::*, error::*};
use crate::entity::*;

#[derive(Debug, Clone)]
pub(super) struct StockCategoryRepo {
    pool: PgPool,
}

impl StockCategoryRepo {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }

    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        new_category: NewStockCategory,
    ) -> Result<StockCategory, StockCategoryError> {
        let id = new_category.id;
        sqlx::query(r#"INSERT INTO tasyir_stock_categories (id, name) VALUES ($1, $2)"#)
            .bind(id)
            .bind(&new_category.name)
            .execute(&mut **tx)
            .await?;
        let mut events = new_category.initial_events();
        events.persist(tx).await?;
        let category = StockCategory::try_from(events)?;
        Ok(category)
    }

    pub async fn persist_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: &mut StockCategory,
    ) -> Result<(), StockCategoryError> {
        sqlx::query(r#"UPDATE tasyir_stock_categories SET name = $2 WHERE id = $1"#)
            .bind(category.id())
            .bind(&category.values().name)
            .execute(&mut **tx)
            .await?;
        category.events.persist(tx).await?;
        Ok(())
    }

    pub async fn find_by_id(
        &self,
        category_id: StockCategoryId,
    ) -> Result<StockCategory, StockCategoryError> {
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT id, sequence, event, recorded_at
            FROM tasyir_stock_category_events
            WHERE id = $1
            ORDER BY sequence"#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        if rows.is_empty() {
            return Err(StockCategoryError::NotFound(category_id));
        }
        let category = StockCategory::try_from(EntityEvents::load(rows)?)?;
        Ok(category)
    }

    pub async fn list(&self) -> Result<Vec<StockCategory>, StockCategoryError> {
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT e.id, e.sequence, e.event, e.recorded_at
            FROM tasyir_stock_category_events e
            JOIN tasyir_stock_categories c ON c.id = e.id
            ORDER BY c.name, e.id, e.sequence"#,
        )
        .fetch_all(&self.pool)
        .await?;
        EntityEvents::load_grouped(rows)?
            .into_iter()
            .map(|events| StockCategory::try_from(events).map_err(StockCategoryError::from))
            .collect()
    }
}
