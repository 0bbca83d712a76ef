use serde::{Deserialize, Serialize};

use crate::domain::a002_empresa::aggregate::EmpresaId;
use crate::domain::a003_tarea::aggregate::TareaId;

/// Row of `GET /empresa-tareas`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmpresaTareaRow {
    pub id_empresa: EmpresaId,
    pub id_tarea: TareaId,
}

/// Body of `POST /empresa-tareas`; also the query of the delete call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmpresaTareaRequest {
    pub id_empresa: EmpresaId,
    pub id_tarea: TareaId,
}
