mod entity;
pub mod error;
mod repo;

use sqlx::PgPool;
use tracing::instrument;

pub use entity::*;
use error::*;
use repo::*;

#[derive(Clone)]
pub struct Employees {
    repo: EmployeeRepo,
    pool: PgPool,
}

impl Employees {
    pub(crate) fn new(pool: &PgPool) -> Self {
        Self {
            repo: EmployeeRepo::new(pool),
            pool: pool.clone(),
        }
    }

    #[instrument(name = "tasyir.employees.create", skip(self))]
    pub async fn create(&self, new_employee: NewEmployee) -> Result<Employee, EmployeeError> {
        let mut tx = self.pool.begin().await?;
        let employee = self.repo.create_in_tx(&mut tx, new_employee).await?;
        tx.commit().await?;
        Ok(employee)
    }

    #[instrument(name = "tasyir.employees.update", skip(self, update))]
    pub async fn update(
        &self,
        employee_id: EmployeeId,
        update: EmployeeUpdate,
    ) -> Result<Employee, EmployeeError> {
        let mut employee = self.repo.find_by_id(employee_id).await?;
        employee.update(update);
        let mut tx = self.pool.begin().await?;
        self.repo.persist_in_tx(&mut tx, &mut employee).await?;
        tx.commit().await?;
        Ok(employee)
    }

    #[instrument(name = "tasyir.employees.deactivate", skip(self))]
    pub async fn deactivate(&self, employee_id: EmployeeId) -> Result<Employee, EmployeeError> {
        let mut employee = self.repo.find_by_id(employee_id).await?;
        employee.deactivate()?;
        let mut tx = self.pool.begin().await?;
        self.repo.persist_in_tx(&mut tx, &mut employee).await?;
        tx.commit().await?;
        Ok(employee)
    }

    #[instrument(name = "tasyir.employees.find_by_id", skip(self), err)]
    pub async fn find_by_id(&self, employee_id: EmployeeId) -> Result<Employee, EmployeeError> {
        self.repo.find_by_id(employee_id).await
    }

    #[instrument(name = "tasyir.employees.list", skip(self))]
    pub async fn list(&self) -> Result<Vec<Employee>, EmployeeError> {
        self.repo.list().await
    }
}
