use contracts::domain::a002_empresa::aggregate::EmpresaAsignada;

use crate::shared::error::ConsoleError;
use crate::shared::gateway::Gateway;
use crate::system::auth::SessionHandle;

/// Companies assigned to the logged-in prestador
pub async fn mis_empresas(
    gateway: &dyn Gateway,
    session: &SessionHandle,
) -> Result<Vec<EmpresaAsignada>, ConsoleError> {
    let cedula = session.require_cedula()?;
    let empresas = gateway.empresas_by_usuario(&cedula).await?;
    tracing::debug!("{} companies assigned to {}", empresas.len(), cedula);
    Ok(empresas)
}
