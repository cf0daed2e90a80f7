use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::entity::*;
use tasyir_types::primitives::{Role, Status};
pub use tasyir_types::{primitives::UserId, user::*};

use super::error::UserError;

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserEvent {
    Initialized {
        values: UserValues,
    },
    Updated {
        values: UserValues,
        fields: Vec<String>,
    },
}

impl EntityEvent for UserEvent {
    type EntityId = UserId;
    fn event_table_name() -> &'static str {
        "tasyir_user_events"
    }
}

#[derive(Builder)]
#[builder(pattern = "owned", build_fn(error = "EntityError"))]
pub struct User {
    values: UserValues,
    pub(super) events: EntityEvents<UserEvent>,
}

impl Entity for User {
    type Event = UserEvent;
}

impl User {
    pub fn id(&self) -> UserId {
        self.values.id
    }

    pub fn role(&self) -> Role {
        self.values.role
    }

    pub fn is_active(&self) -> bool {
        self.values.status == Status::Active
    }

    pub fn inactivity_timeout_secs(&self) -> u32 {
        self.values.inactivity_timeout_secs
    }

    pub fn values(&self) -> &UserValues {
        &self.values
    }

    pub fn into_values(self) -> UserValues {
        self.values
    }

    /// The preference is clamped to a sane range before it ever drives a
    /// session expiry.
    pub fn set_inactivity_timeout(&mut self, secs: u32) -> Result<(), UserError> {
        if !inactivity_timeout_in_range(secs) {
            return Err(UserError::InvalidInactivityTimeout(secs));
        }
        if secs != self.values.inactivity_timeout_secs {
            self.values.inactivity_timeout_secs = secs;
            self.values.version += 1;
            self.events.push(UserEvent::Updated {
                values: self.values.clone(),
                fields: vec!["inactivity_timeout_secs".to_string()],
            });
        }
        Ok(())
    }

    pub fn update(&mut self, builder: UserUpdate) {
        let UserUpdateValues { role, status } =
            builder.build().expect("UserUpdateValues always exist");
        let mut updated_fields = Vec::new();

        if let Some(role) = role {
            if role != self.values.role {
                self.values.role = role;
                updated_fields.push("role".to_string());
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
            self.events.push(UserEvent::Updated {
                values: self.values.clone(),
                fields: updated_fields,
            });
        }
    }
}

#[derive(Builder, Debug, Default)]
#[builder(name = "UserUpdate", default)]
pub struct UserUpdateValues {
    #[builder(setter(strip_option))]
    pub role: Option<Role>,
    #[builder(setter(strip_option))]
    pub status: Option<Status>,
}

impl TryFrom<EntityEvents<UserEvent>> for User {
    type Error = EntityError;

    fn try_from(events: EntityEvents<UserEvent>) -> Result<Self, Self::Error> {
        let mut builder = UserBuilder::default();
        for event in events.iter() {
            match event {
                UserEvent::Initialized { values } => {
                    builder = builder.values(values.clone());
                }
                UserEvent::Updated { values, .. } => {
                    builder = builder.values(values.clone());
                }
            }
        }
        builder.events(events).build()
    }
}

/// A new user account. The password never enters the event stream; the
/// repo turns it into salt and digest columns on the index table.
#[derive(Debug, Builder)]
pub struct NewUser {
    #[builder(setter(into))]
    pub id: UserId,
    #[builder(setter(into))]
    pub(super) username: String,
    pub(super) role: Role,
    #[builder(setter(into))]
    pub(super) password: String,
    #[builder(default = "INACTIVITY_TIMEOUT_DEFAULT_SECS")]
    pub(super) inactivity_timeout_secs: u32,
}

impl NewUser {
    pub fn builder() -> NewUserBuilder {
        NewUserBuilder::default()
    }

    pub(super) fn initial_events(self) -> (String, EntityEvents<UserEvent>) {
        let password = self.password;
        let events = EntityEvents::init(
            self.id,
            [UserEvent::Initialized {
                values: UserValues {
                    id: self.id,
                    version: 1,
                    username: self.username,
                    role: self.role,
                    status: Status::Active,
                    inactivity_timeout_secs: self.inactivity_timeout_secs,
                },
            }],
        );
        (password, events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let new_user = NewUser::builder()
            .id(UserId::new())
            .username("k.meziane")
            .role(Role::Accountant)
            .password("s3cret")
            .build()
            .unwrap();
        let (_, events) = new_user.initial_events();
        User::try_from(events).unwrap()
    }

    #[test]
    fn it_builds() {
        let new_user = NewUser::builder()
            .id(UserId::new())
            .username("k.meziane")
            .role(Role::Accountant)
            .password("s3cret")
            .build()
            .unwrap();
        assert_eq!(new_user.username, "k.meziane");
        assert_eq!(new_user.inactivity_timeout_secs, 300);
    }

    #[test]
    fn fails_when_mandatory_fields_are_missing() {
        let new_user = NewUser::builder().build();
        assert!(new_user.is_err());
    }

    #[test]
    fn timeout_out_of_range_is_rejected() {
        let mut user = user();
        assert!(matches!(
            user.set_inactivity_timeout(5),
            Err(UserError::InvalidInactivityTimeout(5))
        ));
        assert!(matches!(
            user.set_inactivity_timeout(601),
            Err(UserError::InvalidInactivityTimeout(601))
        ));
        user.set_inactivity_timeout(10).unwrap();
        assert_eq!(user.inactivity_timeout_secs(), 10);
        user.set_inactivity_timeout(600).unwrap();
        assert_eq!(user.inactivity_timeout_secs(), 600);
    }

    #[test]
    fn password_never_enters_the_event_stream() {
        let new_user = NewUser::builder()
            .id(UserId::new())
            .username("k.meziane")
            .role(Role::Admin)
            .password("s3cret")
            .build()
            .unwrap();
        let (_, events) = new_user.initial_events();
        for event in events.iter() {
            let json = serde_json::to_string(event).unwrap();
            assert!(!json.contains("s3cret"));
        }
    }
}
