use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::a001_usuario::aggregate::Cedula;
use crate::domain::a002_empresa::aggregate::EmpresaId;
use crate::domain::a003_tarea::aggregate::TareaId;
use crate::domain::common::wire_datetime;

/// Canonical gestión schema: one execution date, progress ordinal and evidence link.
///
/// Version 1 tracked a start/end date range with a 0..100 percentage; it is not
/// accepted by this client.
pub const GESTION_SCHEMA_VERSION: u32 = 2;

/// Progress ordinal of a gestión
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Avance {
    NoRealizado,
    Pendiente,
    Realizado,
}

impl Avance {
    pub const ALL: [Avance; 3] = [Avance::NoRealizado, Avance::Pendiente, Avance::Realizado];

    pub fn ordinal(self) -> i64 {
        match self {
            Avance::NoRealizado => 0,
            Avance::Pendiente => 3,
            Avance::Realizado => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Avance::NoRealizado => "No realizado",
            Avance::Pendiente => "Pendiente",
            Avance::Realizado => "Realizado",
        }
    }
}

impl TryFrom<i64> for Avance {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Avance::NoRealizado),
            3 => Ok(Avance::Pendiente),
            5 => Ok(Avance::Realizado),
            other => Err(format!("invalid avance {}, expected one of 0, 3, 5", other)),
        }
    }
}

impl From<Avance> for i64 {
    fn from(value: Avance) -> Self {
        value.ordinal()
    }
}

/// Row of `GET /gestion-prestador-tareas?empresaId=`
///
/// One row per task assigned to the company; the tracked columns are all null
/// when no gestión has been recorded yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestionRow {
    #[serde(alias = "empresa_id")]
    pub id_empresa: EmpresaId,
    #[serde(alias = "tarea_id")]
    pub id_tarea: TareaId,
    #[serde(default)]
    pub descripcion_tarea: String,
    #[serde(default, with = "wire_datetime::option")]
    pub fecha_ejecucion: Option<NaiveDateTime>,
    #[serde(default)]
    pub usuario_responsable: Option<Cedula>,
    #[serde(default)]
    pub observacion: Option<String>,
    #[serde(default)]
    pub avance: Option<Avance>,
    #[serde(default)]
    pub link_url: Option<String>,
}

/// Body of the create (`POST`) and update (`PUT`) gestión calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestionPayload {
    pub empresa_id: EmpresaId,
    pub tarea_id: TareaId,
    #[serde(with = "wire_datetime::option")]
    pub fecha_ejecucion: Option<NaiveDateTime>,
    pub usuario_responsable: Option<Cedula>,
    pub observacion: Option<String>,
    pub avance: Option<Avance>,
    pub link_url: Option<String>,
}
