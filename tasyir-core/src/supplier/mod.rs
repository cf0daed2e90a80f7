mod entity;
pub mod error;
mod repo;

use sqlx::PgPool;
use tracing::instrument;

pub use entity::*;
use error::*;
use repo::*;

#[derive(Clone)]
pub struct Suppliers {
    repo: SupplierRepo,
    pool: PgPool,
}

impl Suppliers {
    pub(crate) fn new(pool: &PgPool) -> Self {
        Self {
            repo: SupplierRepo::new(pool),
            pool: pool.clone(),
        }
    }

    #[instrument(name = "tasyir.suppliers.create", skip(self))]
    pub async fn create(&self, new_supplier: NewSupplier) -> Result<Supplier, SupplierError> {
        let mut tx = self.pool.begin().await?;
        let supplier = self.repo.create_in_tx(&mut tx, new_supplier).await?;
        tx.commit().await?;
        Ok(supplier)
    }

    #[instrument(name = "tasyir.suppliers.update", skip(self, update))]
    pub async fn update(
        &self,
        supplier_id: SupplierId,
        update: SupplierUpdate,
    ) -> Result<Supplier, SupplierError> {
        let mut supplier = self.repo.find_by_id(supplier_id).await?;
        supplier.update(update);
        let mut tx = self.pool.begin().await?;
        self.repo.persist_in_tx(&mut tx, &mut supplier).await?;
        tx.commit().await?;
        Ok(supplier)
    }

    #[instrument(name = "tasyir.suppliers.find_by_id", skip(self), err)]
    pub async fn find_by_id(&self, supplier_id: SupplierId) -> Result<Supplier, SupplierError> {
        self.repo.find_by_id(supplier_id).await
    }

    #[instrument(name = "tasyir.suppliers.list", skip(self))]
    pub async fn list(&self) -> Result<Vec<Supplier>, SupplierError> {
        self.repo.list().await
    }
}
