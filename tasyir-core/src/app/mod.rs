pub mod config;
pub mod error;

use sqlx::PgPool;
use tracing::instrument;

pub use config::*;
use error::*;

use crate::{
    account::Accounts,
    department::{error::DepartmentError, Departments},
    employee::{error::EmployeeError, EmployeeUpdate, Employees, NewEmployee},
    journal_entry::{
        error::JournalEntryError, JournalEntries, JournalEntry, JournalEntryDraft,
        JournalEntryUpdate, NewJournalEntry,
    },
    period::{Period, Periods},
    position::{error::PositionError, NewPosition, Position, PositionUpdate, Positions},
    session::{error::SessionError, Session, Sessions},
    stock_category::{error::StockCategoryError, StockCategories},
    stock_item::{error::StockItemError, NewStockItem, StockItem, StockItemUpdate, StockItems},
    supplier::{error::SupplierError, Suppliers},
    user::{error::UserError, NewUser, User, Users},
};
use tasyir_types::primitives::{EmployeeId, JournalEntryId, Role, StockItemId, UserId};

/// Top-level handle over the whole application. Owns the pool and the
/// per-module services, and hosts the operations that have to look across
/// module boundaries.
#[derive(Clone)]
pub struct Tasyir {
    pool: PgPool,
    periods: Periods,
    accounts: Accounts,
    journal_entries: JournalEntries,
    departments: Departments,
    positions: Positions,
    employees: Employees,
    stock_categories: StockCategories,
    suppliers: Suppliers,
    stock_items: StockItems,
    users: Users,
    sessions: Sessions,
}

impl Tasyir {
    pub async fn init(config: TasyirConfig) -> Result<Self, TasyirError> {
        let pool = match (config.pool, config.pg_con) {
            (Some(pool), None) => pool,
            (None, Some(pg_con)) => {
                let mut pool_opts = sqlx::postgres::PgPoolOptions::new();
                if let Some(max_connections) = config.max_connections {
                    pool_opts = pool_opts.max_connections(max_connections);
                }
                pool_opts.connect(&pg_con).await?
            }
            _ => {
                return Err(TasyirError::ConfigError(
                    "One of pg_con or pool must be set".to_string(),
                ))
            }
        };
        if config.exec_migrations {
            sqlx::migrate!().run(&pool).await?;
        }

        let app = Self {
            periods: Periods::new(&pool),
            accounts: Accounts::new(&pool),
            journal_entries: JournalEntries::new(&pool),
            departments: Departments::new(&pool),
            positions: Positions::new(&pool),
            employees: Employees::new(&pool),
            stock_categories: StockCategories::new(&pool),
            suppliers: Suppliers::new(&pool),
            stock_items: StockItems::new(&pool),
            users: Users::new(&pool),
            sessions: Sessions::new(&pool),
            pool,
        };
        // Sessions left idle past their timeout are only revoked when
        // their token comes back; clear out the leftovers on startup.
        let swept = app.sessions.sweep_expired().await?;
        if swept > 0 {
            tracing::info!(swept, "removed expired sessions");
        }
        Ok(app)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn periods(&self) -> &Periods {
        &self.periods
    }

    pub fn accounts(&self) -> &Accounts {
        &self.accounts
    }

    pub fn journal_entries(&self) -> &JournalEntries {
        &self.journal_entries
    }

    pub fn departments(&self) -> &Departments {
        &self.departments
    }

    pub fn positions(&self) -> &Positions {
        &self.positions
    }

    pub fn employees(&self) -> &Employees {
        &self.employees
    }

    pub fn stock_categories(&self) -> &StockCategories {
        &self.stock_categories
    }

    pub fn suppliers(&self) -> &Suppliers {
        &self.suppliers
    }

    pub fn stock_items(&self) -> &StockItems {
        &self.stock_items
    }

    pub fn users(&self) -> &Users {
        &self.users
    }

    pub fn sessions(&self) -> &Sessions {
        &self.sessions
    }

    /// Posts a draft journal entry. The period gate comes first: a draft
    /// aimed at a closed period is rejected no matter what its lines look
    /// like.
    #[instrument(name = "tasyir.create_journal_entry", skip(self, draft))]
    pub async fn create_journal_entry(
        &self,
        draft: JournalEntryDraft,
    ) -> Result<JournalEntry, JournalEntryError> {
        if let Some(period_id) = draft.period_id {
            let period = self.periods.find_by_id(period_id).await?;
            check_period_open(&period)?;
        }
        let new_entry = NewJournalEntry::from_draft(JournalEntryId::new(), draft)?;
        self.check_line_accounts(new_entry.lines.iter().map(|l| l.account_id))
            .await?;
        self.journal_entries.create(new_entry).await
    }

    /// Replaces an existing entry's contents. Both the period it currently
    /// sits in and the period it is moving to must be open.
    #[instrument(name = "tasyir.update_journal_entry", skip(self, draft))]
    pub async fn update_journal_entry(
        &self,
        entry_id: JournalEntryId,
        draft: JournalEntryDraft,
    ) -> Result<JournalEntry, JournalEntryError> {
        let mut entry = self.journal_entries.find_by_id(entry_id).await?;

        let current_period_id = entry.values().period_id;
        let current_period = self.periods.find_by_id(current_period_id).await?;
        check_period_open(&current_period)?;
        if let Some(period_id) = draft.period_id {
            if period_id != current_period_id {
                let period = self.periods.find_by_id(period_id).await?;
                check_period_open(&period)?;
            }
        }

        let update = JournalEntryUpdate::from_draft(draft)?;
        self.check_line_accounts(update.lines.iter().map(|l| l.account_id))
            .await?;
        self.journal_entries
            .persist_update(&mut entry, update)
            .await?;
        Ok(entry)
    }

    async fn check_line_accounts(
        &self,
        account_ids: impl Iterator<Item = tasyir_types::primitives::AccountId>,
    ) -> Result<(), JournalEntryError> {
        let account_ids: Vec<_> = account_ids.collect();
        let found = self.accounts.find_all(&account_ids).await?;
        for account_id in account_ids {
            if !found.contains_key(&account_id) {
                return Err(JournalEntryError::UnknownAccount(account_id));
            }
        }
        Ok(())
    }

    #[instrument(name = "tasyir.create_position", skip(self, new_position))]
    pub async fn create_position(
        &self,
        new_position: NewPosition,
    ) -> Result<Position, PositionError> {
        if let Some(department_id) = new_position.department_id {
            self.department_exists(department_id)
                .await
                .map_err(map_department_for_position)?;
        }
        self.positions.create(new_position).await
    }

    #[instrument(name = "tasyir.update_position", skip(self, update))]
    pub async fn update_position(
        &self,
        position_id: tasyir_types::primitives::PositionId,
        update: PositionUpdate,
    ) -> Result<Position, PositionError> {
        let values = update
            .clone()
            .build()
            .expect("PositionUpdateValues always exist");
        if let Some(Some(department_id)) = values.department_id {
            self.department_exists(department_id)
                .await
                .map_err(map_department_for_position)?;
        }
        self.positions.update(position_id, update).await
    }

    #[instrument(name = "tasyir.create_employee", skip(self, new_employee))]
    pub async fn create_employee(
        &self,
        new_employee: NewEmployee,
    ) -> Result<crate::employee::Employee, EmployeeError> {
        self.department_exists(new_employee.department_id)
            .await
            .map_err(map_department_for_employee)?;
        self.position_exists(new_employee.position_id)
            .await
            .map_err(map_position_for_employee)?;
        self.employees.create(new_employee).await
    }

    #[instrument(name = "tasyir.update_employee", skip(self, update))]
    pub async fn update_employee(
        &self,
        employee_id: EmployeeId,
        update: EmployeeUpdate,
    ) -> Result<crate::employee::Employee, EmployeeError> {
        let values = update
            .clone()
            .build()
            .expect("EmployeeUpdateValues always exist");
        if let Some(department_id) = values.department_id {
            self.department_exists(department_id)
                .await
                .map_err(map_department_for_employee)?;
        }
        if let Some(position_id) = values.position_id {
            self.position_exists(position_id)
                .await
                .map_err(map_position_for_employee)?;
        }
        self.employees.update(employee_id, update).await
    }

    #[instrument(name = "tasyir.create_stock_item", skip(self, new_item))]
    pub async fn create_stock_item(
        &self,
        new_item: NewStockItem,
    ) -> Result<StockItem, StockItemError> {
        self.stock_category_exists(new_item.category_id).await?;
        if let Some(supplier_id) = new_item.supplier_id {
            self.supplier_exists(supplier_id).await?;
        }
        self.stock_items.create(new_item).await
    }

    #[instrument(name = "tasyir.update_stock_item", skip(self, update))]
    pub async fn update_stock_item(
        &self,
        item_id: StockItemId,
        update: StockItemUpdate,
    ) -> Result<StockItem, StockItemError> {
        let values = update
            .clone()
            .build()
            .expect("StockItemUpdateValues always exist");
        if let Some(category_id) = values.category_id {
            self.stock_category_exists(category_id).await?;
        }
        if let Some(Some(supplier_id)) = values.supplier_id {
            self.supplier_exists(supplier_id).await?;
        }
        self.stock_items.update(item_id, update).await
    }

    async fn department_exists(
        &self,
        department_id: tasyir_types::primitives::DepartmentId,
    ) -> Result<(), DepartmentError> {
        self.departments.find_by_id(department_id).await?;
        Ok(())
    }

    async fn position_exists(
        &self,
        position_id: tasyir_types::primitives::PositionId,
    ) -> Result<(), PositionError> {
        self.positions.find_by_id(position_id).await?;
        Ok(())
    }

    async fn stock_category_exists(
        &self,
        category_id: tasyir_types::primitives::StockCategoryId,
    ) -> Result<(), StockItemError> {
        match self.stock_categories.find_by_id(category_id).await {
            Ok(_) => Ok(()),
            Err(StockCategoryError::NotFound(id)) => Err(StockItemError::UnknownCategory(id)),
            Err(StockCategoryError::Sqlx(e)) => Err(StockItemError::Sqlx(e)),
            Err(StockCategoryError::EntityError(e)) => Err(StockItemError::EntityError(e)),
            Err(StockCategoryError::DuplicateName) => {
                unreachable!("lookup cannot hit a unique constraint")
            }
        }
    }

    async fn supplier_exists(
        &self,
        supplier_id: tasyir_types::primitives::SupplierId,
    ) -> Result<(), StockItemError> {
        match self.suppliers.find_by_id(supplier_id).await {
            Ok(_) => Ok(()),
            Err(SupplierError::NotFound(id)) => Err(StockItemError::UnknownSupplier(id)),
            Err(SupplierError::Sqlx(e)) => Err(StockItemError::Sqlx(e)),
            Err(SupplierError::EntityError(e)) => Err(StockItemError::EntityError(e)),
        }
    }

    /// Seeds the initial admin account on an empty install so the first
    /// login is possible. A no-op once any user exists.
    #[instrument(name = "tasyir.bootstrap_admin", skip_all)]
    pub async fn bootstrap_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, UserError> {
        if !self.users.list().await?.is_empty() {
            return Ok(None);
        }
        let new_user = NewUser::builder()
            .id(UserId::new())
            .username(username)
            .role(Role::Admin)
            .password(password)
            .build()
            .expect("all mandatory fields set");
        let user = self.users.create(new_user).await?;
        tracing::warn!(username, "bootstrapped initial admin user");
        Ok(Some(user))
    }

    /// Verifies credentials and opens a fresh session carrying the user's
    /// inactivity timeout preference.
    #[instrument(name = "tasyir.login", skip_all)]
    pub async fn login(&self, username: &str, password: &str) -> Result<(Session, User), AuthError> {
        let user = self.users.verify_credentials(username, password).await?;
        if !user.is_active() {
            return Err(AuthError::UserInactive);
        }
        let session = self
            .sessions
            .create_for_user(user.id(), user.inactivity_timeout_secs())
            .await?;
        Ok((session, user))
    }

    /// Resolves a bearer token into a live session. An idle-expired session
    /// is revoked on the spot; an active one has its last-seen timestamp
    /// refreshed.
    #[instrument(name = "tasyir.authenticate", skip_all)]
    pub async fn authenticate(&self, token: &str) -> Result<(Session, User), AuthError> {
        let session = self.sessions.find_by_token(token).await?;
        if session.is_expired(chrono::Utc::now()) {
            self.sessions.revoke(session.id).await?;
            return Err(AuthError::SessionExpired);
        }
        let session = self.sessions.touch(session.id).await?;
        let user = self.users.find_by_id(session.user_id).await?;
        if !user.is_active() {
            return Err(AuthError::UserInactive);
        }
        Ok((session, user))
    }

    #[instrument(name = "tasyir.logout", skip_all)]
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        match self.sessions.find_by_token(token).await {
            Ok(session) => {
                self.sessions.revoke(session.id).await?;
                Ok(())
            }
            // Logging out an already-dead session is not an error.
            Err(SessionError::NotFound) => Ok(()),
            Err(e) => Err(AuthError::from(e)),
        }
    }

    /// Stores the user's inactivity timeout preference and applies it to
    /// any sessions already open.
    #[instrument(name = "tasyir.set_inactivity_timeout", skip(self))]
    pub async fn set_inactivity_timeout(
        &self,
        user_id: UserId,
        secs: u32,
    ) -> Result<User, UserError> {
        let user = self.users.set_inactivity_timeout(user_id, secs).await?;
        self.sessions
            .update_timeout_for_user(user_id, secs)
            .await
            .map_err(|e| match e {
                SessionError::Sqlx(e) => UserError::from(e),
                SessionError::NotFound => UserError::NotFound(user_id),
            })?;
        Ok(user)
    }
}

fn map_department_for_position(error: DepartmentError) -> PositionError {
    match error {
        DepartmentError::NotFound(id) => PositionError::UnknownDepartment(id),
        DepartmentError::Sqlx(e) => PositionError::Sqlx(e),
        DepartmentError::EntityError(e) => PositionError::EntityError(e),
        DepartmentError::DuplicateName => unreachable!("lookup cannot hit a unique constraint"),
    }
}

fn map_department_for_employee(error: DepartmentError) -> EmployeeError {
    match error {
        DepartmentError::NotFound(id) => EmployeeError::UnknownDepartment(id),
        DepartmentError::Sqlx(e) => EmployeeError::Sqlx(e),
        DepartmentError::EntityError(e) => EmployeeError::EntityError(e),
        DepartmentError::DuplicateName => unreachable!("lookup cannot hit a unique constraint"),
    }
}

fn map_position_for_employee(error: PositionError) -> EmployeeError {
    match error {
        PositionError::NotFound(id) => EmployeeError::UnknownPosition(id),
        PositionError::Sqlx(e) => EmployeeError::Sqlx(e),
        PositionError::EntityError(e) => EmployeeError::EntityError(e),
        PositionError::UnknownDepartment(_) => {
            unreachable!("lookup cannot cross into departments")
        }
    }
}

fn check_period_open(period: &Period) -> Result<(), JournalEntryError> {
    if !period.is_open() {
        return Err(JournalEntryError::PeriodClosed(period.id()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{entity::EntityEvents, period::PeriodEvent};
    use tasyir_types::{
        period::PeriodValues,
        primitives::{PeriodId, PeriodStatus},
    };

    fn period_with_status(status: PeriodStatus) -> Period {
        let id = PeriodId::new();
        let values = PeriodValues {
            id,
            version: 1,
            name: "2026-03".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            status,
        };
        Period::try_from(EntityEvents::init(id, [PeriodEvent::Initialized { values }])).unwrap()
    }

    #[test]
    fn open_period_passes_the_gate() {
        let period = period_with_status(PeriodStatus::Open);
        assert!(check_period_open(&period).is_ok());
    }

    #[test]
    fn closed_period_blocks_posting_and_updates() {
        let period = period_with_status(PeriodStatus::Closed);
        let err = check_period_open(&period).unwrap_err();
        assert!(matches!(err, JournalEntryError::PeriodClosed(id) if id == period.id()));
    }
}
