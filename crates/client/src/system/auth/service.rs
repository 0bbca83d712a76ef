use contracts::system::auth::LoginRequest;

use super::session::{Session, SessionHandle};
use crate::shared::error::ConsoleError;
use crate::shared::gateway::Gateway;

/// Login with email and password; the new session replaces any previous one
///
/// When the login reply has no cédula it is taken from token validation.
pub async fn login(
    gateway: &dyn Gateway,
    session: &SessionHandle,
    email: &str,
    password: &str,
) -> Result<Session, ConsoleError> {
    let request = LoginRequest {
        email: email.trim().to_string(),
        contrasena: password.to_string(),
    };

    let response = gateway.login(&request).await.map_err(|e| {
        tracing::warn!("Login failed for {}: {}", request.email, e);
        e
    })?;

    // The login reply may omit the cédula; token validation always carries it.
    let cedula = match response.cedula {
        Some(cedula) => Some(cedula),
        None => match gateway.validate_token(&response.token).await {
            Ok(info) => info.cedula,
            Err(e) => {
                tracing::warn!("Could not resolve cédula for {}: {}", request.email, e);
                None
            }
        },
    };

    let new_session = Session::new(response.token, response.nombre, response.perfil, cedula);
    tracing::info!(
        "Logged in as {} ({:?})",
        new_session.nombre,
        new_session.role
    );
    session.set(new_session.clone());
    Ok(new_session)
}

/// Rebuild the session from a persisted token
///
/// On failure the handle is left empty.
pub async fn restore(
    gateway: &dyn Gateway,
    session: &SessionHandle,
    token: &str,
) -> Result<Session, ConsoleError> {
    match gateway.validate_token(token).await {
        Ok(info) => {
            let restored = Session::new(token.to_string(), info.nombre, info.perfil, info.cedula);
            tracing::info!("Session restored for {}", restored.nombre);
            session.set(restored.clone());
            Ok(restored)
        }
        Err(e) => {
            tracing::warn!("Stored token rejected: {}", e);
            session.clear();
            Err(e)
        }
    }
}

/// The backend keeps no server-side session, so logout is local only
pub fn logout(session: &SessionHandle) {
    session.clear();
    tracing::info!("Logged out");
}
