//! Authentication route handlers.
//!
//! Login, customer self-registration, and logout. Failures redirect back to
//! the form with an `?error=` code so a refresh never resubmits the form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::filters;
use crate::middleware::{RequireAnonymous, clear_current_user, role_home, set_current_user};
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Turn an `?error=` code into display text.
fn error_message(code: &str) -> String {
    match code {
        "credentials" => "Invalid email or password.".to_owned(),
        "email_taken" => "An account with this email already exists.".to_owned(),
        "invalid_email" => "Please enter a valid email address.".to_owned(),
        "password_mismatch" => "The passwords do not match.".to_owned(),
        "password_too_short" => "Password must be at least 8 characters.".to_owned(),
        "session" => "Could not start a session. Please try again.".to_owned(),
        _ => "Something went wrong. Please try again.".to_owned(),
    }
}

/// Turn a `?success=` code into display text.
fn success_message(code: &str) -> String {
    match code {
        "registered" => "Account created. You can sign in now.".to_owned(),
        "logged_out" => "You have been signed out.".to_owned(),
        _ => "Done.".to_owned(),
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page.
pub async fn login_page(
    _: RequireAnonymous,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    LoginTemplate {
        error: query.error.as_deref().map(error_message),
        success: query.success.as_deref().map(success_message),
    }
}

/// Handle login form submission.
pub async fn login(
    _: RequireAnonymous,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth = AuthService::new(state.pool());

    match auth.login(&form.email, &form.password).await {
        Ok(user) => {
            let home = role_home(user.role);
            if let Err(e) = set_current_user(&session, &user).await {
                tracing::error!("Failed to set session: {e}");
                return Redirect::to("/login?error=session").into_response();
            }
            Redirect::to(home).into_response()
        }
        Err(AuthError::Repository(e)) => {
            tracing::error!("Login failed: {e}");
            Redirect::to("/login?error=failed").into_response()
        }
        Err(e) => {
            tracing::warn!("Login rejected: {e}");
            Redirect::to("/login?error=credentials").into_response()
        }
    }
}

/// Display the registration page.
pub async fn register_page(
    _: RequireAnonymous,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    RegisterTemplate {
        error: query.error.as_deref().map(error_message),
    }
}

/// Handle registration form submission.
///
/// Creates the login account and its paired customer profile, then sends
/// the visitor to the login page.
pub async fn register(
    _: RequireAnonymous,
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.password != form.password_confirm {
        return Redirect::to("/register?error=password_mismatch").into_response();
    }

    let auth = AuthService::new(state.pool());

    match auth
        .register_customer(&form.email, &form.password, form.name.trim())
        .await
    {
        Ok(_) => Redirect::to("/login?success=registered").into_response(),
        Err(AuthError::UserAlreadyExists) => {
            Redirect::to("/register?error=email_taken").into_response()
        }
        Err(AuthError::InvalidEmail(_)) => {
            Redirect::to("/register?error=invalid_email").into_response()
        }
        Err(AuthError::WeakPassword(_)) => {
            Redirect::to("/register?error=password_too_short").into_response()
        }
        Err(e) => {
            tracing::error!("Registration failed: {e}");
            Redirect::to("/register?error=failed").into_response()
        }
    }
}

/// Handle logout.
///
/// Clears the session identity and destroys the session itself.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    Redirect::to("/login?success=logged_out").into_response()
}
