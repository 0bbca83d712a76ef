use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::a001_usuario::aggregate::Cedula;
use crate::domain::a002_empresa::aggregate::EmpresaId;
use crate::domain::a003_tarea::aggregate::TareaId;
use crate::domain::common::wire_datetime;

/// Audit row written by the backend on every gestión create/update
///
/// Rows are immutable and may predate the current schema, so `avance` is kept
/// as the raw number instead of the validated ordinal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorialEntry {
    #[serde(alias = "id")]
    pub id_historial: i64,
    #[serde(alias = "empresa_id")]
    pub id_empresa: EmpresaId,
    #[serde(alias = "tarea_id")]
    pub id_tarea: TareaId,
    #[serde(default, with = "wire_datetime::option")]
    pub fecha_ejecucion: Option<NaiveDateTime>,
    #[serde(default)]
    pub usuario_responsable: Option<Cedula>,
    #[serde(default)]
    pub observacion: Option<String>,
    #[serde(default)]
    pub avance: Option<i64>,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(
        alias = "fecha_modificacion",
        alias = "created_at",
        with = "wire_datetime::required"
    )]
    pub fecha_registro: NaiveDateTime,
}
