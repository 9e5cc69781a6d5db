//! User records and submission data.

use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::db::schema::users;

/// User model mapping to the database schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Queryable, Insertable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub name: String,
    pub login: String,
}

/// New user for database insertion.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub name: String,
    pub login: String,
}

/// Raw registration submission, bound from the request body.
///
/// Fields default to empty strings so a missing field becomes a validation
/// error instead of a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub login: String,
}

impl UserForm {
    /// Converts a validated submission into an insertable record.
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            name: self.name,
            login: self.login,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_form_fields_bind_as_empty_strings() {
        let form: UserForm = serde_json::from_str("{}").unwrap();
        assert_eq!(form.name, "");
        assert_eq!(form.login, "");
    }

    #[test]
    fn form_converts_into_new_user() {
        let form: UserForm = serde_json::from_str(r#"{"name":"Nico","login":"555555"}"#).unwrap();
        let new_user = form.into_new_user();
        assert_eq!(new_user.name, "Nico");
        assert_eq!(new_user.login, "555555");
    }
}
