//! Backend gateway: one typed call per REST resource action

use async_trait::async_trait;
use contracts::domain::a001_usuario::aggregate::{Cedula, Usuario, UsuarioDto};
use contracts::domain::a002_empresa::aggregate::{Empresa, EmpresaAsignada, EmpresaId};
use contracts::domain::a003_tarea::aggregate::{Catalogos, Tarea, TareaDto, TareaId};
use contracts::domain::a004_gestion::aggregate::{GestionPayload, GestionRow};
use contracts::domain::a004_gestion::historial::HistorialEntry;
use contracts::relations::empresa_tarea::EmpresaTareaRow;
use contracts::relations::usuario_empresa::UsuarioEmpresaRow;
use contracts::shared::options::SelectOption;
use contracts::system::auth::{LoginRequest, LoginResponse, ValidateTokenResponse};

use crate::shared::error::ConsoleError;

#[cfg(test)]
pub mod fake;
pub mod http;

pub use http::HttpGateway;

pub type GatewayResult<T> = Result<T, ConsoleError>;

/// Every backend operation the console consumes
///
/// Implementations attach the session token themselves; a missing token is
/// reported as [`ConsoleError::Unauthorized`].
#[async_trait]
pub trait Gateway: Send + Sync {
    // auth
    async fn login(&self, request: &LoginRequest) -> GatewayResult<LoginResponse>;
    async fn validate_token(&self, token: &str) -> GatewayResult<ValidateTokenResponse>;

    // usuarios
    async fn list_usuarios(&self) -> GatewayResult<Vec<Usuario>>;
    async fn create_usuario(&self, dto: &UsuarioDto) -> GatewayResult<()>;
    async fn update_usuario(&self, cedula: &Cedula, dto: &UsuarioDto) -> GatewayResult<()>;
    async fn delete_usuario(&self, cedula: &Cedula) -> GatewayResult<()>;

    // empresas
    async fn list_empresas(&self) -> GatewayResult<Vec<Empresa>>;
    async fn create_empresa(&self, empresa: &Empresa) -> GatewayResult<()>;
    async fn update_empresa(&self, nit: &str, empresa: &Empresa) -> GatewayResult<()>;
    async fn delete_empresa(&self, nit: &str) -> GatewayResult<()>;

    // tareas
    async fn list_tareas(&self) -> GatewayResult<Vec<Tarea>>;
    async fn catalogos(&self) -> GatewayResult<Catalogos>;
    async fn create_tarea(&self, dto: &TareaDto) -> GatewayResult<()>;
    async fn update_tarea(&self, id: TareaId, dto: &TareaDto) -> GatewayResult<()>;
    async fn delete_tarea(&self, id: TareaId) -> GatewayResult<()>;

    // option lists
    async fn usuario_options(&self) -> GatewayResult<Vec<SelectOption<Cedula>>>;
    async fn empresa_options(&self) -> GatewayResult<Vec<SelectOption<EmpresaId>>>;

    // usuario ↔ empresa
    async fn list_usuarios_empresa(&self) -> GatewayResult<Vec<UsuarioEmpresaRow>>;
    async fn create_usuario_empresa(&self, cedula: &Cedula, empresa: EmpresaId)
        -> GatewayResult<()>;
    async fn delete_usuario_empresa(&self, cedula: &Cedula, empresa: EmpresaId)
        -> GatewayResult<()>;
    async fn empresas_by_usuario(&self, cedula: &Cedula) -> GatewayResult<Vec<EmpresaAsignada>>;

    // empresa ↔ tarea
    async fn list_empresa_tareas(&self) -> GatewayResult<Vec<EmpresaTareaRow>>;
    async fn assign_tarea(&self, empresa: EmpresaId, tarea: TareaId) -> GatewayResult<()>;
    async fn unassign_tarea(&self, empresa: EmpresaId, tarea: TareaId) -> GatewayResult<()>;

    // gestión
    async fn list_gestion(&self, empresa: EmpresaId) -> GatewayResult<Vec<GestionRow>>;
    async fn create_gestion(&self, payload: &GestionPayload) -> GatewayResult<()>;
    async fn update_gestion(&self, payload: &GestionPayload) -> GatewayResult<()>;
    async fn delete_gestion(&self, empresa: EmpresaId, tarea: TareaId) -> GatewayResult<()>;
    async fn historial(&self, empresa: EmpresaId, tarea: TareaId)
        -> GatewayResult<Vec<HistorialEntry>>;
}
