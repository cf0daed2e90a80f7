mod entity;
pub mod error;
mod repo;

use sqlx::PgPool;
use tracing::instrument;

pub use entity::*;
use error::*;
use repo::*;

/// Service for stock items. Category and supplier references are checked
/// one level up, where the other services are in reach.
#[derive(Clone)]
pub struct StockItems {
    repo: StockItemRepo,
    pool: PgPool,
}

impl StockItems {
    pub(crate) fn new(pool: &PgPool) -> Self {
        Self {
            repo: StockItemRepo::new(pool),
            pool: pool.clone(),
        }
    }

    #[instrument(name = "tasyir.stock_items.create", skip(self))]
    pub async fn create(&self, new_item: NewStockItem) -> Result<StockItem, StockItemError> {
        let mut tx = self.pool.begin().await?;
        let item = self.repo.create_in_tx(&mut tx, new_item).await?;
        tx.commit().await?;
        Ok(item)
    }

    #[instrument(name = "tasyir.stock_items.update", skip(self, update))]
    pub async fn update(
        &self,
        item_id: StockItemId,
        update: StockItemUpdate,
    ) -> Result<StockItem, StockItemError> {
        let mut item = self.repo.find_by_id(item_id).await?;
        item.update(update);
        let mut tx = self.pool.begin().await?;
        self.repo.persist_in_tx(&mut tx, &mut item).await?;
        tx.commit().await?;
        Ok(item)
    }

    #[instrument(name = "tasyir.stock_items.adjust_quantity", skip(self))]
    pub async fn adjust_quantity(
        &self,
        item_id: StockItemId,
        delta: i64,
    ) -> Result<StockItem, StockItemError> {
        let mut item = self.repo.find_by_id(item_id).await?;
        item.adjust_quantity(delta)?;
        let mut tx = self.pool.begin().await?;
        self.repo.persist_in_tx(&mut tx, &mut item).await?;
        tx.commit().await?;
        Ok(item)
    }

    #[instrument(name = "tasyir.stock_items.find_by_id", skip(self), err)]
    pub async fn find_by_id(&self, item_id: StockItemId) -> Result<StockItem, StockItemError> {
        self.repo.find_by_id(item_id).await
    }

    #[instrument(name = "tasyir.stock_items.list", skip(self))]
    pub async fn list(&self) -> Result<Vec<StockItem>, StockItemError> {
        self.repo.list().await
    }

    /// Items whose quantity has dropped to or below their alert threshold.
    #[instrument(name = "tasyir.stock_items.list_low_stock", skip(self))]
    pub async fn list_low_stock(&self) -> Result<Vec<StockItem>, StockItemError> {
        self.repo.list_low_stock().await
    }
}
