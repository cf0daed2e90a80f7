mod entity;
pub mod error;
mod repo;

use sqlx::PgPool;
use tracing::instrument;

pub use entity::*;
use error::*;
use repo::*;

#[derive(Clone)]
pub struct StockCategories {
    repo: StockCategoryRepo,
    pool: PgPool,
}

impl StockCategories {
    pub(crate) fn new(pool: &PgPool) -> Self {
        Self {
            repo: StockCategoryRepo::new(pool),
            pool: pool.clone(),
        }
    }

    #[instrument(name = "tasyir.stock_categories.create", skip(self))]
    pub async fn create(
        &self,
        new_category: NewStockCategory,
    ) -> Result<StockCategory, StockCategoryError> {
        let mut tx = self.pool.begin().await?;
        let category = self.repo.create_in_tx(&mut tx, new_category).await?;
        tx.commit().await?;
        Ok(category)
    }

    #[instrument(name = "tasyir.stock_categories.update", skip(self, update))]
    pub async fn update(
        &self,
        category_id: StockCategoryId,
        update: StockCategoryUpdate,
    ) -> Result<StockCategory, StockCategoryError> {
        let mut category = self.repo.find_by_id(category_id).await?;
        category.update(update);
        let mut tx = self.pool.begin().await?;
        self.repo.persist_in_tx(&mut tx, &mut category).await?;
        tx.commit().await?;
        Ok(category)
    }

    #[instrument(name = "tasyir.stock_categories.find_by_id", skip(self), err)]
    pub async fn find_by_id(
        &self,
        category_id: StockCategoryId,
    ) -> Result<StockCategory, StockCategoryError> {
        self.repo.find_by_id(category_id).await
    }

    #[instrument(name = "tasyir.stock_categories.list", skip(self))]
    pub async fn list(&self) -> Result<Vec<StockCategory>, StockCategoryError> {
        self.repo.list().await
    }
}
