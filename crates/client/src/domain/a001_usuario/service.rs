use contracts::domain::a001_usuario::aggregate::{Cedula, Usuario, UsuarioDto};
use contracts::shared::options::SelectOption;

use crate::domain::{check_email, require_fields};
use crate::shared::error::{ConsoleError, ValidationError};
use crate::shared::gateway::Gateway;
use crate::system::auth::SessionHandle;

/// Validate a user form
///
/// Every displayed field is required. The password is required on create and
/// optional on update, where it is only sent when provided.
pub fn validate(dto: &UsuarioDto, is_new: bool) -> Result<(), ValidationError> {
    let usuario = &dto.usuario;
    let password = dto.contrasena.as_deref().unwrap_or("");

    let mut fields = vec![("cedula", usuario.cedula.as_str())];
    fields.extend(usuario.text_fields());
    if is_new {
        fields.push(("contraseña", password));
    }
    require_fields(fields)?;

    check_email("email", &usuario.email)
}

pub async fn list(
    gateway: &dyn Gateway,
    session: &SessionHandle,
) -> Result<Vec<Usuario>, ConsoleError> {
    session.require()?;
    gateway.list_usuarios().await
}

/// `{value: cedula, label: full name}` pairs for selectors
pub async fn options(
    gateway: &dyn Gateway,
    session: &SessionHandle,
) -> Result<Vec<SelectOption<Cedula>>, ConsoleError> {
    session.require()?;
    gateway.usuario_options().await
}

/// Create a new user
pub async fn create(
    gateway: &dyn Gateway,
    session: &SessionHandle,
    dto: &UsuarioDto,
) -> Result<(), ConsoleError> {
    session.require_admin()?;
    validate(dto, true)?;

    gateway.create_usuario(dto).await?;
    tracing::info!("Created user {}", dto.usuario.cedula);
    Ok(())
}

/// Update user; a blank password is not sent
pub async fn update(
    gateway: &dyn Gateway,
    session: &SessionHandle,
    dto: &UsuarioDto,
) -> Result<(), ConsoleError> {
    session.require_admin()?;
    validate(dto, false)?;

    let mut body = dto.clone();
    if body.contrasena.as_deref().map_or(true, |p| p.trim().is_empty()) {
        body.contrasena = None;
    }

    gateway.update_usuario(&dto.usuario.cedula, &body).await?;
    tracing::info!("Updated user {}", dto.usuario.cedula);
    Ok(())
}

/// Delete user
pub async fn delete(
    gateway: &dyn Gateway,
    session: &SessionHandle,
    cedula: &Cedula,
) -> Result<(), ConsoleError> {
    session.require_admin()?;
    gateway.delete_usuario(cedula).await?;
    tracing::info!("Deleted user {}", cedula);
    Ok(())
}
