use chrono::NaiveDateTime;
use contracts::domain::a001_usuario::aggregate::Cedula;
use contracts::domain::a002_empresa::aggregate::EmpresaId;
use contracts::domain::a003_tarea::aggregate::TareaId;
use contracts::domain::a004_gestion::aggregate::{Avance, GestionPayload, GestionRow};

use crate::shared::error::ValidationError;
use crate::shared::list_utils::Searchable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestionStatus {
    /// Nothing recorded yet; saving creates the row
    Absent,
    /// Saving updates the row
    Present,
}

/// One tracked field with its new value; `None` blanks it
#[derive(Debug, Clone, PartialEq)]
pub enum GestionField {
    FechaEjecucion(Option<NaiveDateTime>),
    Responsable(Option<Cedula>),
    Observacion(Option<String>),
    /// Raw ordinal, validated against 0, 3 and 5
    Avance(Option<i64>),
    LinkUrl(Option<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GestionRecord {
    pub empresa_id: EmpresaId,
    pub tarea_id: TareaId,
    pub descripcion_tarea: String,
    pub fecha_ejecucion: Option<NaiveDateTime>,
    pub usuario_responsable: Option<Cedula>,
    pub observacion: Option<String>,
    pub avance: Option<Avance>,
    pub link_url: Option<String>,
    exists: bool,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl GestionRecord {
    /// Build from a backend row; `exists` is inferred from the tracked fields
    pub fn from_row(row: GestionRow) -> Self {
        let mut record = Self {
            empresa_id: row.id_empresa,
            tarea_id: row.id_tarea,
            descripcion_tarea: row.descripcion_tarea,
            fecha_ejecucion: row.fecha_ejecucion,
            usuario_responsable: row.usuario_responsable.filter(|c| !c.as_str().trim().is_empty()),
            observacion: non_blank(row.observacion),
            avance: row.avance,
            link_url: non_blank(row.link_url),
            exists: false,
        };
        record.exists = record.has_tracked_values();
        record
    }

    /// True if any tracked field holds a value
    pub fn has_tracked_values(&self) -> bool {
        self.fecha_ejecucion.is_some()
            || self.usuario_responsable.is_some()
            || self.observacion.is_some()
            || self.avance.is_some()
            || self.link_url.is_some()
    }

    /// Whether the backend holds a live row for this pair
    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn status(&self) -> GestionStatus {
        if self.exists {
            GestionStatus::Present
        } else {
            GestionStatus::Absent
        }
    }

    pub(crate) fn mark_saved(&mut self) {
        self.exists = true;
    }

    pub(crate) fn mark_cleared(&mut self) {
        self.fecha_ejecucion = None;
        self.usuario_responsable = None;
        self.observacion = None;
        self.avance = None;
        self.link_url = None;
        self.exists = false;
    }

    /// Local edit of one field; never touches `exists`
    pub fn apply(&mut self, field: GestionField) -> Result<(), ValidationError> {
        match field {
            GestionField::FechaEjecucion(value) => self.fecha_ejecucion = value,
            GestionField::Responsable(value) => {
                self.usuario_responsable = value.filter(|c| !c.as_str().trim().is_empty())
            }
            GestionField::Observacion(value) => self.observacion = non_blank(value),
            GestionField::Avance(value) => {
                self.avance = value
                    .map(|v| Avance::try_from(v).map_err(|_| ValidationError::InvalidAvance(v)))
                    .transpose()?
            }
            GestionField::LinkUrl(value) => {
                let value = non_blank(value).map(|v| v.trim().to_string());
                if let Some(link) = &value {
                    validate_link(link)?;
                }
                self.link_url = value;
            }
        }
        Ok(())
    }

    pub fn to_payload(&self) -> GestionPayload {
        GestionPayload {
            empresa_id: self.empresa_id,
            tarea_id: self.tarea_id,
            fecha_ejecucion: self.fecha_ejecucion,
            usuario_responsable: self.usuario_responsable.clone(),
            observacion: self.observacion.clone(),
            avance: self.avance,
            link_url: self.link_url.clone(),
        }
    }
}

/// Evidence links must be absolute http(s) URLs
pub fn validate_link(link: &str) -> Result<(), ValidationError> {
    let lower = link.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.contains(char::is_whitespace) => Ok(()),
        _ => Err(ValidationError::InvalidLink(link.to_string())),
    }
}

impl Searchable for GestionRecord {
    fn matches_filter(&self, filter: &str) -> bool {
        self.descripcion_tarea.to_lowercase().contains(filter)
    }
}
