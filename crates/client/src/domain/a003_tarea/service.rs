use contracts::domain::a003_tarea::aggregate::{Catalogos, Tarea, TareaDto, TareaId};
use contracts::shared::options::SelectOption;

use crate::domain::require_fields;
use crate::shared::error::{ConsoleError, ValidationError};
use crate::shared::gateway::Gateway;
use crate::system::auth::SessionHandle;

pub fn validate(dto: &TareaDto) -> Result<(), ValidationError> {
    require_fields([
        ("codigo_tarea", dto.codigo_tarea.as_str()),
        ("descripcion_tarea", dto.tarea.as_str()),
    ])
}

/// Full task list, catalogue columns included
pub async fn list(
    gateway: &dyn Gateway,
    session: &SessionHandle,
) -> Result<Vec<Tarea>, ConsoleError> {
    session.require()?;
    gateway.list_tareas().await
}

/// Reference catalogues for the task form selectors
pub async fn catalogos(
    gateway: &dyn Gateway,
    session: &SessionHandle,
) -> Result<Catalogos, ConsoleError> {
    session.require()?;
    gateway.catalogos().await
}

/// Label shown for a task in selection lists
pub fn option_label(tarea: &Tarea) -> String {
    if tarea.codigo_tarea.trim().is_empty() {
        tarea.descripcion_tarea.clone()
    } else {
        format!("{} – {}", tarea.codigo_tarea, tarea.descripcion_tarea)
    }
}

/// Task options; the backend has no option endpoint for tasks, so they are built from the list
pub async fn options(
    gateway: &dyn Gateway,
    session: &SessionHandle,
) -> Result<Vec<SelectOption<TareaId>>, ConsoleError> {
    Ok(list(gateway, session)
        .await?
        .iter()
        .map(|t| SelectOption::new(t.id_tarea, option_label(t)))
        .collect())
}

pub async fn create(
    gateway: &dyn Gateway,
    session: &SessionHandle,
    dto: &TareaDto,
) -> Result<(), ConsoleError> {
    session.require_admin()?;
    validate(dto)?;

    gateway.create_tarea(dto).await?;
    tracing::info!("Created task {}", dto.codigo_tarea);
    Ok(())
}

pub async fn update(
    gateway: &dyn Gateway,
    session: &SessionHandle,
    id: TareaId,
    dto: &TareaDto,
) -> Result<(), ConsoleError> {
    session.require_admin()?;
    validate(dto)?;

    gateway.update_tarea(id, dto).await?;
    tracing::info!("Updated task {}", id);
    Ok(())
}

pub async fn delete(
    gateway: &dyn Gateway,
    session: &SessionHandle,
    id: TareaId,
) -> Result<(), ConsoleError> {
    session.require_admin()?;
    gateway.delete_tarea(id).await?;
    tracing::info!("Deleted task {}", id);
    Ok(())
}
