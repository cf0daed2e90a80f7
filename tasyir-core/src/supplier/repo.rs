use sqlx::{PgPool, Postgres, Transaction};

use super::{entity::*, error::*};
use crate::entity::*;

#[derive(Debug, Clone)]
pub(super) struct SupplierRepo {
    pool: PgPool,
}

impl SupplierRepo {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }

    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        new_supplier: NewSupplier,
    ) -> Result<Supplier, SupplierError> {
        let id = new_supplier.id;
        sqlx::query(r#"INSERT INTO tasyir_suppliers (id, name) VALUES ($1, $2)"#)
            .bind(id)
            .bind(&new_supplier.name)
            .execute(&mut **tx)
            .await?;
        let mut events = new_supplier.initial_events();
        events.persist(tx).await?;
        let supplier = Supplier::try_from(events)?;
        Ok(supplier)
    }

    pub async fn persist_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        supplier: &mut Supplier,
    ) -> Result<(), SupplierError> {
        sqlx::query(r#"UPDATE tasyir_suppliers SET name = $2 WHERE id = $1"#)
            .bind(supplier.id())
            .bind(&supplier.values().name)
            .execute(&mut **tx)
            .await?;
        supplier.events.persist(tx).await?;
        Ok(())
    }

    pub async fn find_by_id(&self, supplier_id: SupplierId) -> Result<Supplier, SupplierError> {
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT id, sequence, event, recorded_at
            FROM tasyir_supplier_events
            WHERE id = $1
            ORDER BY sequence"#,
        )
        .bind(supplier_id)
        .fetch_all(&self.pool)
        .await?;
        if rows.is_empty() {
            return Err(SupplierError::NotFound(supplier_id));
        }
        let supplier = Supplier::try_from(EntityEvents::load(rows)?)?;
        Ok(supplier)
    }

    pub async fn list(&self) -> Result<Vec<Supplier>, SupplierError> {
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT e.id, e.sequence, e.event, e.recorded_at
            FROM tasyir_supplier_events e
            JOIN tasyir_suppliers s ON s.id = e.id
            ORDER BY s.name, e.id, e.sequence"#,
        )
        .fetch_all(&self.pool)
        .await?;
        EntityEvents::load_grouped(rows)?
            .into_iter()
            .map(|events| Supplier::try_from(events).map_err(SupplierError::from))
            .collect()
    }
}
