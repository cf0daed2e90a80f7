use chrono::NaiveDate;
use derive_builder::Builder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entity::*;
use tasyir_types::primitives::{DepartmentId, PositionId, Status};
pub use tasyir_types::{employee::*, primitives::EmployeeId};

use super::error::EmployeeError;

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EmployeeEvent {
    Initialized {
        values: EmployeeValues,
    },
    Updated {
        values: EmployeeValues,
        fields: Vec<String>,
    },
    Deactivated {
        values: EmployeeValues,
    },
}

impl EntityEvent for EmployeeEvent {
    type EntityId = EmployeeId;
    fn event_table_name() -> &'static str {
        "tasyir_employee_events"
    }
}

#[derive(Builder)]
#[builder(pattern = "owned", build_fn(error = "EntityError"))]
pub struct Employee {
    values: EmployeeValues,
    pub(super) events: EntityEvents<EmployeeEvent>,
}

impl Entity for Employee {
    type Event = EmployeeEvent;
}

impl Employee {
    pub fn id(&self) -> EmployeeId {
        self.values.id
    }

    pub fn values(&self) -> &EmployeeValues {
        &self.values
    }

    pub fn into_values(self) -> EmployeeValues {
        self.values
    }

    pub fn update(&mut self, builder: EmployeeUpdate) {
        let EmployeeUpdateValues {
            first_name,
            last_name,
            email,
            department_id,
            position_id,
            salary,
        } = builder.build().expect("EmployeeUpdateValues always exist");
        let mut updated_fields = Vec::new();

        if let Some(first_name) = first_name {
            if first_name != self.values.first_name {
                self.values.first_name = first_name;
                updated_fields.push("first_name".to_string());
            }
        }
        if let Some(last_name) = last_name {
            if last_name != self.values.last_name {
                self.values.last_name = last_name;
                updated_fields.push("last_name".to_string());
            }
        }
        if let Some(email) = email {
            if email != self.values.email {
                self.values.email = email;
                updated_fields.push("email".to_string());
            }
        }
        if let Some(department_id) = department_id {
            if department_id != self.values.department_id {
                self.values.department_id = department_id;
                updated_fields.push("department_id".to_string());
            }
        }
        if let Some(position_id) = position_id {
            if position_id != self.values.position_id {
                self.values.position_id = position_id;
                updated_fields.push("position_id".to_string());
            }
        }
        if let Some(salary) = salary {
            if salary != self.values.salary {
                self.values.salary = salary;
                updated_fields.push("salary".to_string());
            }
        }

        if !updated_fields.is_empty() {
            self.values.version += 1;
            self.events.push(EmployeeEvent::Updated {
                values: self.values.clone(),
                fields: updated_fields,
            });
        }
    }

    pub fn deactivate(&mut self) -> Result<(), EmployeeError> {
        if self.values.status == Status::Inactive {
            return Err(EmployeeError::AlreadyInactive(self.id()));
        }
        self.values.status = Status::Inactive;
        self.values.version += 1;
        self.events.push(EmployeeEvent::Deactivated {
            values: self.values.clone(),
        });
        Ok(())
    }

    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.events
            .entity_first_persisted_at
            .expect("No events for employee")
    }

    pub fn modified_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.events
            .latest_event_persisted_at
            .expect("No events for employee")
    }
}

#[derive(Builder, Debug, Default)]
#[builder(name = "EmployeeUpdate", default)]
pub struct EmployeeUpdateValues {
    #[builder(setter(into, strip_option))]
    pub first_name: Option<String>,
    #[builder(setter(into, strip_option))]
    pub last_name: Option<String>,
    #[builder(setter(into, strip_option))]
    pub email: Option<String>,
    #[builder(setter(strip_option))]
    pub department_id: Option<DepartmentId>,
    #[builder(setter(strip_option))]
    pub position_id: Option<PositionId>,
    #[builder(setter(strip_option))]
    pub salary: Option<Decimal>,
}

impl TryFrom<EntityEvents<EmployeeEvent>> for Employee {
    type Error = EntityError;

    fn try_from(events: EntityEvents<EmployeeEvent>) -> Result<Self, Self::Error> {
        let mut builder = EmployeeBuilder::default();
        for event in events.iter() {
            match event {
                EmployeeEvent::Initialized { values } => {
                    builder = builder.values(values.clone());
                }
                EmployeeEvent::Updated { values, .. } => {
                    builder = builder.values(values.clone());
                }
                EmployeeEvent::Deactivated { values } => {
                    builder = builder.values(values.clone());
                }
            }
        }
        builder.events(events).build()
    }
}

#[derive(Debug, Builder)]
pub struct NewEmployee {
    #[builder(setter(into))]
    pub id: EmployeeId,
    #[builder(setter(into))]
    pub(super) first_name: String,
    #[builder(setter(into))]
    pub(super) last_name: String,
    #[builder(setter(into))]
    pub(super) email: String,
    pub(super) hire_date: NaiveDate,
    pub department_id: DepartmentId,
    pub position_id: PositionId,
    pub(super) salary: Decimal,
}

impl NewEmployee {
    pub fn builder() -> NewEmployeeBuilder {
        NewEmployeeBuilder::default()
    }

    pub(super) fn initial_events(self) -> EntityEvents<EmployeeEvent> {
        EntityEvents::init(
            self.id,
            [EmployeeEvent::Initialized {
                values: EmployeeValues {
                    id: self.id,
                    version: 1,
                    first_name: self.first_name,
                    last_name: self.last_name,
                    email: self.email,
                    hire_date: self.hire_date,
                    department_id: self.department_id,
                    position_id: self.position_id,
                    salary: self.salary,
                    status: Status::Active,
                },
            }],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn new_employee() -> NewEmployee {
        NewEmployee::builder()
            .id(EmployeeId::new())
            .first_name("Amina")
            .last_name("Bouaziz")
            .email("a.bouaziz@example.dz")
            .hire_date("2023-09-01".parse::<NaiveDate>().unwrap())
            .department_id(DepartmentId::new())
            .position_id(PositionId::new())
            .salary(dec!(95000))
            .build()
            .unwrap()
    }

    #[test]
    fn it_builds() {
        let new_employee = new_employee();
        assert_eq!(new_employee.first_name, "Amina");
    }

    #[test]
    fn fails_when_mandatory_fields_are_missing() {
        let new_employee = NewEmployee::builder().build();
        assert!(new_employee.is_err());
    }

    #[test]
    fn deactivate_twice_is_an_error() {
        let mut employee = Employee::try_from(new_employee().initial_events()).unwrap();
        employee.deactivate().unwrap();
        assert!(matches!(
            employee.deactivate(),
            Err(EmployeeError::AlreadyInactive(_))
        ));
    }
}
