use sqlx::{PgPool, Postgres, Transaction};

use super::{entity::*, error::*};
use crate::entity::*;

#[derive(Debug, Clone)]
pub(super) struct StockItemRepo {
    pool: PgPool,
}

impl StockItemRepo {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }

    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        new_item: NewStockItem,
    ) -> Result<StockItem, StockItemError> {
        let id = new_item.id;
        sqlx::query(
            r#"INSERT INTO tasyir_stock_items
            (id, sku, category_id, supplier_id, quantity, alert_threshold)
            VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(id)
        .bind(&new_item.sku)
        .bind(new_item.category_id)
        .bind(new_item.supplier_id)
        .bind(new_item.quantity)
        .bind(new_item.alert_threshold)
        .execute(&mut **tx)
        .await?;
        let mut events = new_item.initial_events();
        events.persist(tx).await?;
        let item = StockItem::try_from(events)?;
        Ok(item)
    }

    pub async fn persist_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: &mut StockItem,
    ) -> Result<(), StockItemError> {
        sqlx::query(
            r#"UPDATE tasyir_stock_items
            SET category_id = $2, supplier_id = $3, quantity = $4, alert_threshold = $5
            WHERE id = $1"#,
        )
        .bind(item.id())
        .bind(item.values().category_id)
        .bind(item.values().supplier_id)
        .bind(item.values().quantity)
        .bind(item.values().alert_threshold)
        .execute(&mut **tx)
        .await?;
        item.events.persist(tx).await?;
        Ok(())
    }

    pub async fn find_by_id(&self, item_id: StockItemId) -> Result<StockItem, StockItemError> {
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT id, sequence, event, recorded_at
            FROM tasyir_stock_item_events
            WHERE id = $1
            ORDER BY sequence"#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;
        if rows.is_empty() {
            return Err(StockItemError::NotFound(item_id));
        }
        let item = StockItem::try_from(EntityEvents::load(rows)?)?;
        Ok(item)
    }

    pub async fn list(&self) -> Result<Vec<StockItem>, StockItemError> {
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT e.id, e.sequence, e.event, e.recorded_at
            FROM tasyir_stock_item_events e
            JOIN tasyir_stock_items i ON i.id = e.id
            ORDER BY i.sku, e.id, e.sequence"#,
        )
        .fetch_all(&self.pool)
        .await?;
        EntityEvents::load_grouped(rows)?
            .into_iter()
            .map(|events| StockItem::try_from(events).map_err(StockItemError::from))
            .collect()
    }

    pub async fn list_low_stock(&self) -> Result<Vec<StockItem>, StockItemError> {
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT e.id, e.sequence, e.event, e.recorded_at
            FROM tasyir_stock_item_events e
            JOIN tasyir_stock_items i ON i.id = e.id
            WHERE i.quantity <= i.alert_threshold
            ORDER BY i.sku, e.id, e.sequence"#,
        )
        .fetch_all(&self.pool)
        .await?;
        EntityEvents::load_grouped(rows)?
            .into_iter()
            .map(|events| StockItem::try_from(events).map_err(StockItemError::from))
            .collect()
    }
}
