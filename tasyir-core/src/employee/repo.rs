use sqlx::{PgPool, Postgres, Transaction};

use super::{entity::*, error::*};
use crate::entity::*;

#[derive(Debug, Clone)]
pub(super) struct EmployeeRepo {
    pool: PgPool,
}

impl EmployeeRepo {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }

    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        new_employee: NewEmployee,
    ) -> Result<Employee, EmployeeError> {
        let id = new_employee.id;
        sqlx::query(
            r#"INSERT INTO tasyir_employees (id, email, department_id, position_id)
            VALUES ($1, $2, $3, $4)"#,
        )
        .bind(id)
        .bind(&new_employee.email)
        .bind(new_employee.department_id)
        .bind(new_employee.position_id)
        .execute(&mut **tx)
        .await?;
        let mut events = new_employee.initial_events();
        events.persist(tx).await?;
        let employee = Employee::try_from(events)?;
        Ok(employee)
    }

    pub async fn persist_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        employee: &mut Employee,
    ) -> Result<(), EmployeeError> {
        sqlx::query(
            r#"UPDATE tasyir_employees
            SET email = $2, department_id = $3, position_id = $4, status = $5
            WHERE id = $1"#,
        )
        .bind(employee.id())
        .bind(&employee.values().email)
        .bind(employee.values().department_id)
        .bind(employee.values().position_id)
        .bind(employee.values().status)
        .execute(&mut **tx)
        .await?;
        employee.events.persist(tx).await?;
        Ok(())
    }

    pub async fn find_by_id(&self, employee_id: EmployeeId) -> Result<Employee, EmployeeError> {
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT id, sequence, event, recorded_at
            FROM tasyir_employee_events
            WHERE id = $1
            ORDER BY sequence"#,
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;
        if rows.is_empty() {
            return Err(EmployeeError::NotFound(employee_id));
        }
        let employee = Employee::try_from(EntityEvents::load(rows)?)?;
        Ok(employee)
    }

    pub async fn list(&self) -> Result<Vec<Employee>, EmployeeError> {
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT e.id, e.sequence, e.event, e.recorded_at
            FROM tasyir_employee_events e
            JOIN tasyir_employees emp ON emp.id = e.id
            ORDER BY emp.email, e.id, e.sequence"#,
        )
        .fetch_all(&self.pool)
        .await?;
        EntityEvents::load_grouped(rows)?
            .into_iter()
            .map(|events| Employee::try_from(events).map_err(EmployeeError::from))
            .collect()
    }
}
