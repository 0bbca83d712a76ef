use std::sync::Arc;

use contracts::domain::a001_usuario::aggregate::Cedula;
use contracts::domain::a002_empresa::aggregate::EmpresaId;
use contracts::domain::a003_tarea::aggregate::TareaId;
use contracts::domain::a004_gestion::historial::HistorialEntry;
use contracts::shared::options::{label_of, SelectOption};

use super::record::{GestionField, GestionRecord, GestionStatus};
use crate::shared::error::{ConsoleError, ValidationError};
use crate::shared::gateway::Gateway;
use crate::shared::list_utils::filter_list;
use crate::system::auth::SessionHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// Gestión records of one company, with the selectors needed to edit them
pub struct GestionBoard {
    gateway: Arc<dyn Gateway>,
    session: SessionHandle,
    empresa_id: EmpresaId,
    empresa_nombre: String,
    usuarios: Vec<SelectOption<Cedula>>,
    records: Vec<GestionRecord>,
}

impl GestionBoard {
    /// Fetch the company's task rows together with the user and company options
    pub async fn load(
        gateway: Arc<dyn Gateway>,
        session: SessionHandle,
        empresa_id: EmpresaId,
    ) -> Result<Self, ConsoleError> {
        session.require()?;

        let (rows, usuarios, empresas) = {
            let gw = gateway.as_ref();
            tokio::try_join!(gw.list_gestion(empresa_id), gw.usuario_options(), gw.empresa_options())
        }
        .map_err(|e| {
            tracing::error!("Failed to load gestión for company {}: {}", empresa_id, e);
            e
        })?;

        let empresa_nombre = label_of(&empresas, &empresa_id)
            .map(str::to_string)
            .unwrap_or_else(|| empresa_id.to_string());
        let records: Vec<GestionRecord> = rows.into_iter().map(GestionRecord::from_row).collect();

        tracing::info!(
            "Loaded {} gestión records for {} ({})",
            records.len(),
            empresa_nombre,
            empresa_id
        );

        Ok(Self {
            gateway,
            session,
            empresa_id,
            empresa_nombre,
            usuarios,
            records,
        })
    }

    pub fn empresa_id(&self) -> EmpresaId {
        self.empresa_id
    }

    pub fn empresa_nombre(&self) -> &str {
        &self.empresa_nombre
    }

    /// Options for the responsible-user selector
    pub fn usuarios(&self) -> &[SelectOption<Cedula>] {
        &self.usuarios
    }

    pub fn records(&self) -> &[GestionRecord] {
        &self.records
    }

    pub fn record(&self, tarea_id: TareaId) -> Option<&GestionRecord> {
        self.records.iter().find(|r| r.tarea_id == tarea_id)
    }

    fn record_mut(&mut self, tarea_id: TareaId) -> Result<&mut GestionRecord, ValidationError> {
        self.records
            .iter_mut()
            .find(|r| r.tarea_id == tarea_id)
            .ok_or_else(|| ValidationError::UnknownRecord(tarea_id.to_string()))
    }

    /// `(present, absent)` record counts
    pub fn counts(&self) -> (usize, usize) {
        let present = self
            .records
            .iter()
            .filter(|r| r.status() == GestionStatus::Present)
            .count();
        (present, self.records.len() - present)
    }

    pub fn filtered(&self, term: &str) -> Vec<GestionRecord> {
        filter_list(&self.records, term)
    }

    /// Edit one field locally; nothing is sent until `save`
    pub fn mutate_field(&mut self, tarea_id: TareaId, field: GestionField) -> Result<(), ValidationError> {
        if let GestionField::Responsable(Some(cedula)) = &field {
            if !self.usuarios.is_empty() && !self.usuarios.iter().any(|u| &u.value == cedula) {
                return Err(ValidationError::UnknownResponsable(cedula.to_string()));
            }
        }
        self.record_mut(tarea_id)?.apply(field)
    }

    /// Persist the record: create when absent, update when present
    ///
    /// A record with every tracked field blank is rejected with `EmptyGestion`,
    /// even when present; blanking a live row goes through [`Self::clear`].
    pub async fn save(&mut self, tarea_id: TareaId) -> Result<SaveOutcome, ConsoleError> {
        self.session.require()?;
        let empresa_id = self.empresa_id;
        let gateway = Arc::clone(&self.gateway);
        let record = self.record_mut(tarea_id)?;

        if !record.has_tracked_values() {
            return Err(ValidationError::EmptyGestion.into());
        }

        let payload = record.to_payload();
        let (outcome, result) = if record.exists() {
            (SaveOutcome::Updated, gateway.update_gestion(&payload).await)
        } else {
            (SaveOutcome::Created, gateway.create_gestion(&payload).await)
        };

        if let Err(e) = result {
            tracing::error!(
                "Saving gestión {}/{} failed: {}",
                empresa_id,
                tarea_id,
                e
            );
            return Err(e);
        }

        record.mark_saved();
        tracing::info!("Gestión {}/{} {:?}", empresa_id, tarea_id, outcome);
        Ok(outcome)
    }

    /// Clear the live row; the audit trail stays on the backend
    pub async fn clear(&mut self, tarea_id: TareaId) -> Result<(), ConsoleError> {
        self.session.require()?;
        let empresa_id = self.empresa_id;
        let gateway = Arc::clone(&self.gateway);
        let record = self.record_mut(tarea_id)?;

        if let Err(e) = gateway.delete_gestion(empresa_id, tarea_id).await {
            tracing::error!(
                "Clearing gestión {}/{} failed: {}",
                empresa_id,
                tarea_id,
                e
            );
            return Err(e);
        }

        record.mark_cleared();
        tracing::info!("Gestión {}/{} cleared", empresa_id, tarea_id);
        Ok(())
    }

    /// Audit trail of one task, newest first
    pub async fn historial(&self, tarea_id: TareaId) -> Result<Vec<HistorialEntry>, ConsoleError> {
        self.session.require()?;
        if self.record(tarea_id).is_none() {
            return Err(ValidationError::UnknownRecord(tarea_id.to_string()).into());
        }

        let mut entries = self.gateway.historial(self.empresa_id, tarea_id).await?;
        entries.sort_by(|a, b| {
            b.fecha_registro
                .cmp(&a.fecha_registro)
                .then(b.id_historial.cmp(&a.id_historial))
        });
        Ok(entries)
    }
}
