mod entity;
pub mod error;
mod repo;

use sqlx::PgPool;
use tracing::instrument;

pub use entity::*;
use error::*;
use repo::*;

#[derive(Clone)]
pub struct Departments {
    repo: DepartmentRepo,
    pool: PgPool,
}

impl Departments {
    pub(crate) fn new(pool: &PgPool) -> Self {
        Self {
            repo: DepartmentRepo::new(pool),
            pool: pool.clone(),
        }
    }

    #[instrument(name = "tasyir.departments.create", skip(self))]
    pub async fn create(
        &self,
        new_department: NewDepartment,
    ) -> Result<Department, DepartmentError> {
        let mut tx = self.pool.begin().await?;
        let department = self.repo.create_in_tx(&mut tx, new_department).await?;
        tx.commit().await?;
        Ok(department)
    }

    #[instrument(name = "tasyir.departments.update", skip(self, update))]
    pub async fn update(
        &self,
        department_id: DepartmentId,
        update: DepartmentUpdate,
    ) -> Result<Department, DepartmentError> {
        let mut department = self.repo.find_by_id(department_id).await?;
        department.update(update);
        let mut tx = self.pool.begin().await?;
        self.repo.persist_in_tx(&mut tx, &mut department).await?;
        tx.commit().await?;
        Ok(department)
    }

    #[instrument(name = "tasyir.departments.find_by_id", skip(self), err)]
    pub async fn find_by_id(
        &self,
        department_id: DepartmentId,
    ) -> Result<Department, DepartmentError> {
        self.repo.find_by_id(department_id).await
    }

    #[instrument(name = "tasyir.departments.list", skip(self))]
    pub async fn list(&self) -> Result<Vec<Department>, DepartmentError> {
        self.repo.list().await
    }
}
