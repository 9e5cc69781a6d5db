//! Business logic for user registration.
//!
//! The flow validates a submission and decides the response disposition:
//! failure carries every accumulated field error and designates the fallback
//! page to render; success persists the user and designates a redirect
//! target with a flash notice. Invalid input never aborts the request; only
//! store failures escape as `ServiceError`.

use tracing::{info, warn};

use crate::db::store::UserStore;
use crate::db::users::UserForm;
use crate::utils::errors::ServiceError;
use crate::utils::validators::{registration_rules, structural_rules, FieldError};

/// Page rendered in place when registration fails.
pub const LOGIN_PAGE: &str = "login";

/// Redirect target after a successful registration.
pub const LOGIN_REDIRECT: &str = "/login";

/// Outcome of the registration flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// The user was persisted; redirect and show the notice on the next page.
    Success {
        redirect_to: &'static str,
        notice: String,
    },
    /// Validation failed; render the fallback page with the field errors.
    Failure {
        page: &'static str,
        errors: Vec<FieldError>,
    },
}

/// Runs the registration flow for a submitted user.
///
/// Structural rules run first, then both domain rules unconditionally, so
/// simultaneous violations on the same field all surface. The store is
/// mutated exactly once, and only when no errors were recorded.
pub fn process_registration(
    store: &dyn UserStore,
    form: UserForm,
) -> Result<Disposition, ServiceError> {
    let mut errors = structural_rules(&form);
    errors.extend(registration_rules(&form, store)?);

    if !errors.is_empty() {
        warn!(login = %form.login, ?errors, "User registration rejected");
        return Ok(Disposition::Failure {
            page: LOGIN_PAGE,
            errors,
        });
    }

    let user = store.add(form.into_new_user())?;
    info!(login = %user.login, "User registered");

    Ok(Disposition::Success {
        redirect_to: LOGIN_REDIRECT,
        notice: format!("User {} successfully added", user.name),
    })
}
