use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use contracts::domain::a001_usuario::aggregate::Cedula;
use contracts::system::auth::PERFIL_ADMINISTRADOR;

use crate::shared::error::{ConsoleError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Administrador,
    Prestador,
}

impl Role {
    /// Anything other than the administrator profile is a prestador
    pub fn from_perfil(perfil: &str) -> Self {
        if perfil.trim().eq_ignore_ascii_case(PERFIL_ADMINISTRADOR) {
            Role::Administrador
        } else {
            Role::Prestador
        }
    }
}

/// Logged-in user: bearer token plus basic profile
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub nombre: String,
    pub perfil: String,
    pub role: Role,
    pub cedula: Option<Cedula>,
}

impl Session {
    pub fn new(token: String, nombre: String, perfil: String, cedula: Option<Cedula>) -> Self {
        let role = Role::from_perfil(&perfil);
        Self {
            token,
            nombre,
            perfil,
            role,
            cedula,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Administrador
    }
}

/// Shared handle to the current session
///
/// Cloned into every component that needs the token or the role. The session
/// is set at login (or token restore) and cleared at logout.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        let handle = Self::new();
        handle.set(session);
        handle
    }

    pub fn set(&self, session: Session) {
        *self.write() = Some(session);
    }

    pub fn clear(&self) {
        *self.write() = None;
    }

    pub fn current(&self) -> Option<Session> {
        self.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.read().as_ref().map(Session::is_admin).unwrap_or(false)
    }

    pub fn require(&self) -> Result<Session, ConsoleError> {
        self.current().ok_or(ConsoleError::Unauthorized)
    }

    /// Gate for the administrator screens
    pub fn require_admin(&self) -> Result<Session, ConsoleError> {
        let session = self.require()?;
        if !session.is_admin() {
            return Err(ConsoleError::Forbidden);
        }
        Ok(session)
    }

    pub fn require_cedula(&self) -> Result<Cedula, ConsoleError> {
        self.require()?
            .cedula
            .ok_or_else(|| ValidationError::MissingCedula.into())
    }

    // A poisoned lock only means a panic elsewhere; the Option inside is still valid.
    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}
