use sqlx::{PgPool, Postgres, Transaction};

use super::{entity::*, error::*};
use crate::entity::*;

#[derive(Debug, Clone)]
pub(super) struct DepartmentRepo {
    pool: PgPool,
}

impl DepartmentRepo {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }

    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        new_department: NewDepartment,
    ) -> Result<Department, DepartmentError> {
        let id = new_department.id;
        sqlx::query(r#"INSERT INTO tasyir_departments (id, name) VALUES ($1, $2)"#)
            .bind(id)
            .bind(&new_department.name)
            .execute(&mut **tx)
            .await?;
        let mut events = new_department.initial_events();
        events.persist(tx).await?;
        let department = Department::try_from(events)?;
        Ok(department)
    }

    pub async fn persist_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        department: &mut Department,
    ) -> Result<(), DepartmentError> {
        sqlx::query(r#"UPDATE tasyir_departments SET name = $2 WHERE id = $1"#)
            .bind(department.id())
            .bind(&department.values().name)
            .execute(&mut **tx)
            .await?;
        department.events.persist(tx).await?;
        Ok(())
    }

    pub async fn find_by_id(
        &self,
        department_id: DepartmentId,
    ) -> Result<Department, DepartmentError> {
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT id, sequence, event, recorded_at
            FROM tasyir_department_events
            WHERE id = $1
            ORDER BY sequence"#,
        )
        .bind(department_id)
        .fetch_all(&self.pool)
        .await?;
        if rows.is_empty() {
            return Err(DepartmentError::NotFound(department_id));
        }
        let department = Department::try_from(EntityEvents::load(rows)?)?;
        Ok(department)
    }

    pub async fn list(&self) -> Result<Vec<Department>, DepartmentError> {
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT e.id, e.sequence, e.event, e.recorded_at
            FROM tasyir_department_events e
            JOIN tasyir_departments d ON d.id = e.id
            ORDER BY d.name, e.id, e.sequence"#,
        )
        .fetch_all(&self.pool)
        .await?;
        EntityEvents::load_grouped(rows)?
            .into_iter()
            .map(|events| Department::try_from(events).map_err(DepartmentError::from))
            .collect()
    }
}
