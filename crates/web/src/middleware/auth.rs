//! Authentication extractors.
//!
//! Handlers declare their access requirement by taking one of these
//! extractors; rejected requests are redirected rather than rendered as
//! errors, matching the site's navigation-driven flows.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use orderdesk_core::Role;

use crate::models::{CurrentUser, session_keys};

/// The landing page for a signed-in user of the given role.
#[must_use]
pub const fn role_home(role: Role) -> &'static str {
    match role {
        Role::Admin => "/",
        Role::Customer => "/user",
    }
}

async fn current_user(parts: &Parts) -> Option<CurrentUser> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

/// Extractor that requires a signed-in admin.
///
/// Anonymous visitors are sent to the login page; signed-in customers are
/// sent to their own portal instead of seeing a staff page.
pub struct RequireAdmin(pub CurrentUser);

/// Rejection for [`RequireAdmin`].
pub enum AdminRejection {
    /// Not signed in at all.
    RedirectToLogin,
    /// Signed in, but as a customer.
    RedirectToCustomerHome,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::RedirectToCustomerHome => {
                Redirect::to(role_home(Role::Customer)).into_response()
            }
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts)
            .await
            .ok_or(AdminRejection::RedirectToLogin)?;

        if user.role != Role::Admin {
            return Err(AdminRejection::RedirectToCustomerHome);
        }

        Ok(Self(user))
    }
}

/// Extractor that requires a signed-in customer.
pub struct RequireCustomer(pub CurrentUser);

/// Rejection for [`RequireCustomer`].
pub enum CustomerRejection {
    /// Not signed in at all.
    RedirectToLogin,
    /// Signed in, but as an admin.
    RedirectToAdminHome,
}

impl IntoResponse for CustomerRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::RedirectToAdminHome => Redirect::to(role_home(Role::Admin)).into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireCustomer
where
    S: Send + Sync,
{
    type Rejection = CustomerRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts)
            .await
            .ok_or(CustomerRejection::RedirectToLogin)?;

        if user.role != Role::Customer {
            return Err(CustomerRejection::RedirectToAdminHome);
        }

        Ok(Self(user))
    }
}

/// Extractor that requires the visitor to be signed out.
///
/// The login and registration pages use this; a signed-in user landing on
/// them is bounced to their role's home page.
pub struct RequireAnonymous;

/// Rejection for [`RequireAnonymous`]: redirect to the signed-in home.
pub struct AnonymousRejection(Role);

impl IntoResponse for AnonymousRejection {
    fn into_response(self) -> Response {
        Redirect::to(role_home(self.0)).into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAnonymous
where
    S: Send + Sync,
{
    type Rejection = AnonymousRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match current_user(parts).await {
            Some(user) => Err(AnonymousRejection(user.role)),
            None => Ok(Self),
        }
    }
}

/// Helper to store the signed-in user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the signed-in user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admins_land_on_the_dashboard() {
        assert_eq!(role_home(Role::Admin), "/");
    }

    #[test]
    fn customers_land_on_their_portal() {
        assert_eq!(role_home(Role::Customer), "/user");
    }
}
