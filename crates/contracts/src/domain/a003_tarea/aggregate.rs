use serde::{Deserialize, Serialize};

crate::numeric_id!(
    /// Compliance task id
    TareaId
);

/// Standard compliance task as returned by `/tareas/completo`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tarea {
    pub id_tarea: TareaId,
    #[serde(default)]
    pub codigo_tarea: String,
    #[serde(default)]
    pub descripcion_tarea: String,
    pub plan_accion_especifico: Option<String>,
    pub fundamentos_y_soporte: Option<String>,
    pub id_estandar: Option<i64>,
    pub id_categoria_estandar: Option<i64>,
    pub id_phva: Option<i64>,
    pub id_metas_estandar: Option<i64>,
    pub id_recurso_administrativo: Option<i64>,
    pub id_responsable_actividad: Option<i64>,
    pub id_proceso: Option<i64>,
    pub id_requisito_1072: Option<i64>,
    pub id_requisito_4501: Option<i64>,
    /// Applicability markers, kept as the backend sends them
    #[serde(rename = "7_estandares", default)]
    pub estandares_7: Option<serde_json::Value>,
    #[serde(rename = "21_estandares", default)]
    pub estandares_21: Option<serde_json::Value>,
    #[serde(rename = "60_estandares", default)]
    pub estandares_60: Option<serde_json::Value>,
}

/// Create/update payload; the description travels as `tarea`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TareaDto {
    pub codigo_tarea: String,
    pub tarea: String,
    pub plan_accion_especifico: Option<String>,
    pub fundamentos_y_soporte: Option<String>,
    pub id_estandar: Option<i64>,
    pub id_categoria_estandar: Option<i64>,
    pub id_phva: Option<i64>,
    pub id_metas_estandar: Option<i64>,
    pub id_recurso_administrativo: Option<i64>,
    pub id_responsable_actividad: Option<i64>,
    pub id_proceso: Option<i64>,
    pub id_requisito_1072: Option<i64>,
    pub id_requisito_4501: Option<i64>,
    #[serde(rename = "7_estandares")]
    pub estandares_7: Option<serde_json::Value>,
    #[serde(rename = "21_estandares")]
    pub estandares_21: Option<serde_json::Value>,
    #[serde(rename = "60_estandares")]
    pub estandares_60: Option<serde_json::Value>,
}

impl From<&Tarea> for TareaDto {
    fn from(t: &Tarea) -> Self {
        Self {
            codigo_tarea: t.codigo_tarea.clone(),
            tarea: t.descripcion_tarea.clone(),
            plan_accion_especifico: t.plan_accion_especifico.clone(),
            fundamentos_y_soporte: t.fundamentos_y_soporte.clone(),
            id_estandar: t.id_estandar,
            id_categoria_estandar: t.id_categoria_estandar,
            id_phva: t.id_phva,
            id_metas_estandar: t.id_metas_estandar,
            id_recurso_administrativo: t.id_recurso_administrativo,
            id_responsable_actividad: t.id_responsable_actividad,
            id_proceso: t.id_proceso,
            id_requisito_1072: t.id_requisito_1072,
            id_requisito_4501: t.id_requisito_4501,
            estandares_7: t.estandares_7.clone(),
            estandares_21: t.estandares_21.clone(),
            estandares_60: t.estandares_60.clone(),
        }
    }
}

// ============================================================================
// Catalogues (`/tareas/catalogos`)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estandar {
    pub id_estandar: i64,
    pub estandar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoriaEstandar {
    pub id_categoria_estandar: i64,
    pub categoria_estandar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phva {
    pub id_phva: i64,
    pub ciclo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaEstandar {
    pub id_metas_estandar: i64,
    pub metas: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecursoAdministrativo {
    pub id_recurso_administrativo: i64,
    pub tipo_recurso: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsableActividad {
    pub id_responsable_actividad: i64,
    pub responsable: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proceso {
    pub id_proceso: i64,
    pub codigo_proceso: String,
    pub proceso: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requisito1072 {
    pub id_requisito_1072: i64,
    pub requisito_1072: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requisito4501 {
    pub id_requisito_4501: i64,
    pub requisito_4501: String,
}

/// Reference catalogues used by the task form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalogos {
    pub estandares: Vec<Estandar>,
    pub categorias: Vec<CategoriaEstandar>,
    pub phva: Vec<Phva>,
    pub metas: Vec<MetaEstandar>,
    pub recursos: Vec<RecursoAdministrativo>,
    pub responsables: Vec<ResponsableActividad>,
    pub procesos: Vec<Proceso>,
    pub requisito1072: Vec<Requisito1072>,
    pub requisito4501: Vec<Requisito4501>,
}

impl Catalogos {
    pub fn estandar(&self, id: i64) -> Option<&str> {
        self.estandares
            .iter()
            .find(|e| e.id_estandar == id)
            .map(|e| e.estandar.as_str())
    }

    pub fn ciclo_phva(&self, id: i64) -> Option<&str> {
        self.phva
            .iter()
            .find(|p| p.id_phva == id)
            .map(|p| p.ciclo.as_str())
    }

    pub fn responsable(&self, id: i64) -> Option<&str> {
        self.responsables
            .iter()
            .find(|r| r.id_responsable_actividad == id)
            .map(|r| r.responsable.as_str())
    }

    /// "CODE – name" label of a process
    pub fn proceso(&self, id: i64) -> Option<String> {
        self.procesos
            .iter()
            .find(|p| p.id_proceso == id)
            .map(|p| format!("{} – {}", p.codigo_proceso, p.proceso))
    }
}
