//! The user store collaborator.
//!
//! Handlers depend on the `UserStore` trait rather than on diesel directly,
//! so the registration flow can be exercised against an in-memory store in
//! tests. `PgUserStore` is the production implementation backed by the
//! r2d2/diesel pool.

use diesel::prelude::*;
use tracing::{error, info};

use crate::config::database::{get_connection, DbPool};
use crate::db::users::{NewUser, User};
use crate::utils::errors::ServiceError;

/// Lookup, existence-check, insert, list, and refresh operations over users.
///
/// `list_all` returns `None` when the backend reports absence; callers must
/// default to an empty list. All failures are infrastructure errors, never
/// validation results.
pub trait UserStore: Send + Sync {
    /// Reloads the record from the backing store.
    fn refresh(&self, user: &mut User) -> Result<(), ServiceError>;

    /// Returns all users, or `None` when the backend reports absence.
    fn list_all(&self) -> Result<Option<Vec<User>>, ServiceError>;

    /// Checks whether a user with the given login exists.
    fn contains_login(&self, login: &str) -> Result<bool, ServiceError>;

    /// Inserts a new user and returns the stored record.
    fn add(&self, new_user: NewUser) -> Result<User, ServiceError>;

    /// Finds a user by login.
    fn find(&self, login: &str) -> Result<Option<User>, ServiceError>;
}

/// PostgreSQL-backed store.
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        PgUserStore { pool }
    }
}

impl UserStore for PgUserStore {
    fn refresh(&self, user: &mut User) -> Result<(), ServiceError> {
        use crate::db::schema::users::dsl::*;

        let mut conn = get_connection(&self.pool)?;
        let fresh = users
            .filter(id.eq(user.id))
            .first::<User>(&mut conn)
            .map_err(|e| {
                error!(login = %user.login, error = %e, "Failed to refresh user");
                ServiceError::database("Failed to refresh user")
            })?;
        *user = fresh;
        Ok(())
    }

    fn list_all(&self) -> Result<Option<Vec<User>>, ServiceError> {
        use crate::db::schema::users::dsl::*;

        let mut conn = get_connection(&self.pool)?;
        let rows = users.order(login.asc()).load::<User>(&mut conn).map_err(|e| {
            error!(error = %e, "Failed to list users");
            ServiceError::database("Failed to list users")
        })?;

        // The collaborator contract is list-or-absent; callers default the
        // absent case to an empty list.
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows))
        }
    }

    fn contains_login(&self, login_str: &str) -> Result<bool, ServiceError> {
        use crate::db::schema::users::dsl::*;

        let mut conn = get_connection(&self.pool)?;
        diesel::select(diesel::dsl::exists(users.filter(login.eq(login_str))))
            .get_result::<bool>(&mut conn)
            .map_err(|e| {
                error!(error = %e, "Failed to check login existence");
                ServiceError::database("Failed to check login existence")
            })
    }

    fn add(&self, new_user: NewUser) -> Result<User, ServiceError> {
        use crate::db::schema::users;

        let mut conn = get_connection(&self.pool)?;
        let stored = diesel::insert_into(users::table)
            .values(&new_user)
            .get_result::<User>(&mut conn)
            .map_err(|e| {
                error!(login = %new_user.login, error = %e, "Failed to insert user");
                // The uniqueness constraint is the backstop for the
                // check-then-insert race in the registration flow.
                if let diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    _,
                ) = &e
                {
                    return ServiceError::database("Login already taken");
                }
                ServiceError::database("Failed to insert user")
            })?;

        info!(login = %stored.login, "User created");
        Ok(stored)
    }

    fn find(&self, login_str: &str) -> Result<Option<User>, ServiceError> {
        use crate::db::schema::users::dsl::*;

        let mut conn = get_connection(&self.pool)?;
        users
            .filter(login.eq(login_str))
            .first::<User>(&mut conn)
            .optional()
            .map_err(|e| {
                error!(login = login_str, error = %e, "Failed to find user");
                ServiceError::database("Failed to find user")
            })
    }
}
