use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::entity::*;
use tasyir_types::primitives::{AccountCode, Status};
pub use tasyir_types::{account::*, primitives::AccountId};

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccountEvent {
    Initialized {
        values: AccountValues,
    },
    Updated {
        values: AccountValues,
        fields: Vec<String>,
    },
}

impl EntityEvent for AccountEvent {
    type EntityId = AccountId;
    fn event_table_name() -> &'static str {
        "tasyir_account_events"
    }
}

#[derive(Builder)]
#[builder(pattern = "owned", build_fn(error = "EntityError"))]
pub struct Account {
    values: AccountValues,
    pub(super) events: EntityEvents<AccountEvent>,
}

impl Entity for Account {
    type Event = AccountEvent;
}

impl Account {
    pub fn id(&self) -> AccountId {
        self.values.id
    }

    pub fn code(&self) -> &AccountCode {
        &self.values.code
    }

    pub fn values(&self) -> &AccountValues {
        &self.values
    }

    pub fn into_values(self) -> AccountValues {
        self.values
    }

    pub fn update(&mut self, builder: AccountUpdate) {
        let AccountUpdateValues {
            name,
            description,
            status,
        } = builder.build().expect("AccountUpdateValues always exist");
        let mut updated_fields = Vec::new();

        if let Some(name) = name {
            if name != self.values.name {
                self.values.name = name;
                updated_fields.push("name".to_string());
            }
        }
        if let Some(description) = description {
            if description != self.values.description {
                self.values.description = description;
                updated_fields.push("description".to_string());
            }
        }
        if let Some(status) = status {
            if status != self.values.status {
                self.values.status = status;
                updated_fields.push("status".to_string());
            }
        }

        if !updated_fields.is_empty() {
            self.values.version += 1;
            self.events.push(AccountEvent::Updated {
                values: self.values.clone(),
                fields: updated_fields,
            });
        }
    }

    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.events
            .entity_first_persisted_at
            .expect("No events for account")
    }

    pub fn modified_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.events
            .latest_event_persisted_at
            .expect("No events for account")
    }
}

#[derive(Builder, Debug, Default)]
#[builder(name = "AccountUpdate", default)]
pub struct AccountUpdateValues {
    #[builder(setter(into, strip_option))]
    pub name: Option<String>,
    #[builder(setter(into, strip_option))]
    pub description: Option<Option<String>>,
    #[builder(setter(strip_option))]
    pub status: Option<Status>,
}

impl TryFrom<EntityEvents<AccountEvent>> for Account {
    type Error = EntityError;

    fn try_from(events: EntityEvents<AccountEvent>) -> Result<Self, Self::Error> {
        let mut builder = AccountBuilder::default();
        for event in events.iter() {
            match event {
                AccountEvent::Initialized { values } => {
                    builder = builder.values(values.clone());
                }
                AccountEvent::Updated { values, .. } => {
                    builder = builder.values(values.clone());
                }
            }
        }
        builder.events(events).build()
    }
}

/// Representation of a new chart-of-accounts entry with required/optional
/// properties and a builder.
#[derive(Debug, Builder)]
pub struct NewAccount {
    #[builder(setter(into))]
    pub id: AccountId,
    #[builder(setter(into))]
    pub(super) code: AccountCode,
    #[builder(setter(into))]
    pub(super) name: String,
    #[builder(setter(strip_option, into), default)]
    pub(super) description: Option<String>,
    #[builder(setter(strip_option, into), default)]
    pub(super) parent_id: Option<AccountId>,
    #[builder(setter(into), default)]
    pub(super) status: Status,
}

impl NewAccount {
    pub fn builder() -> NewAccountBuilder {
        NewAccountBuilder::default()
    }

    pub fn code(&self) -> &AccountCode {
        &self.code
    }

    pub fn parent_id(&self) -> Option<AccountId> {
        self.parent_id
    }

    pub(super) fn initial_events(self) -> EntityEvents<AccountEvent> {
        EntityEvents::init(
            self.id,
            [AccountEvent::Initialized {
                values: AccountValues {
                    id: self.id,
                    version: 1,
                    code: self.code,
                    name: self.name,
                    description: self.description,
                    parent_id: self.parent_id,
                    status: self.status,
                },
            }],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasyir_types::primitives::AccountClass;

    #[test]
    fn it_builds() {
        let new_account = NewAccount::builder()
            .id(AccountId::new())
            .code("512".parse::<AccountCode>().unwrap())
            .name("Banques")
            .build()
            .unwrap();
        assert_eq!(new_account.name, "Banques");
        assert_eq!(new_account.status, Status::Active);
        assert_eq!(new_account.code.class(), AccountClass::Financier);
    }

    #[test]
    fn fails_when_mandatory_fields_are_missing() {
        let new_account = NewAccount::builder().build();
        assert!(new_account.is_err());
    }
}
