//! In-memory backend for tests: records every call, injects failures

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tokio::sync::Notify;
use contracts::domain::a001_usuario::aggregate::{Cedula, Usuario, UsuarioDto};
use contracts::domain::a002_empresa::aggregate::{Empresa, EmpresaAsignada, EmpresaId};
use contracts::domain::a003_tarea::aggregate::{Catalogos, Tarea, TareaDto, TareaId};
use contracts::domain::a004_gestion::aggregate::{GestionPayload, GestionRow};
use contracts::domain::a004_gestion::historial::HistorialEntry;
use contracts::relations::empresa_tarea::EmpresaTareaRow;
use contracts::relations::usuario_empresa::UsuarioEmpresaRow;
use contracts::shared::options::SelectOption;
use contracts::system::auth::{LoginRequest, LoginResponse, ValidateTokenResponse};

use super::{Gateway, GatewayResult};
use crate::shared::error::ConsoleError;
use crate::system::auth::{Session, SessionHandle};

#[derive(Debug, Default, Clone)]
pub struct FakeState {
    pub usuarios: Vec<Usuario>,
    pub empresas: Vec<Empresa>,
    pub tareas: Vec<Tarea>,
    pub catalogos: Catalogos,
    pub usuario_options: Vec<SelectOption<Cedula>>,
    pub empresa_options: Vec<SelectOption<EmpresaId>>,
    pub usuarios_empresa: Vec<UsuarioEmpresaRow>,
    pub empresa_tareas: Vec<EmpresaTareaRow>,
    pub mis_empresas: Vec<EmpresaAsignada>,
    pub gestion: Vec<GestionRow>,
    pub historial: Vec<HistorialEntry>,
    pub login: Option<LoginResponse>,
    pub validate: Option<ValidateTokenResponse>,
}

struct FailRule {
    op: &'static str,
    key: Option<String>,
    error: ConsoleError,
}

#[derive(Default)]
pub struct FakeGateway {
    state: Mutex<FakeState>,
    calls: Mutex<Vec<(&'static str, String)>>,
    failures: Mutex<Vec<FailRule>>,
    holds: Mutex<Vec<(&'static str, String, Arc<Notify>)>>,
}

impl FakeGateway {
    pub fn new(state: FakeState) -> Self {
        Self {
            state: Mutex::new(state),
            ..Default::default()
        }
    }

    /// Make `op` fail with HTTP 500; `key` narrows it to one call key
    pub fn fail(&self, op: &'static str, key: Option<&str>) {
        self.fail_with(
            op,
            key,
            ConsoleError::Http {
                status: 500,
                message: "simulated failure".into(),
            },
        );
    }

    pub fn fail_with(&self, op: &'static str, key: Option<&str>, error: ConsoleError) {
        self.failures.lock().unwrap().push(FailRule {
            op,
            key: key.map(str::to_string),
            error,
        });
    }

    /// Park the `op` call for `key` until the returned `Notify` fires
    pub fn hold(&self, op: &'static str, key: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.holds
            .lock()
            .unwrap()
            .push((op, key.to_string(), Arc::clone(&gate)));
        gate
    }

    pub fn calls(&self, op: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|(o, _)| *o == op).count()
    }

    pub fn call_keys(&self, op: &str) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(o, _)| *o == op)
            .map(|(_, k)| k.clone())
            .collect()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    async fn enter(&self, op: &'static str, key: impl Into<String>) -> GatewayResult<()> {
        let key = key.into();
        self.calls.lock().unwrap().push((op, key.clone()));
        let gate = self
            .holds
            .lock()
            .unwrap()
            .iter()
            .find(|(o, k, _)| *o == op && *k == key)
            .map(|(_, _, gate)| Arc::clone(gate));
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let failures = self.failures.lock().unwrap();
        match failures
            .iter()
            .find(|r| r.op == op && r.key.as_deref().map_or(true, |k| k == key))
        {
            Some(rule) => Err(rule.error.clone()),
            None => Ok(()),
        }
    }

    fn record_historial(&self, payload: &GestionPayload) {
        let mut state = self.state();
        let id = state.historial.len() as i64 + 1;
        state.historial.push(HistorialEntry {
            id_historial: id,
            id_empresa: payload.empresa_id,
            id_tarea: payload.tarea_id,
            fecha_ejecucion: payload.fecha_ejecucion,
            usuario_responsable: payload.usuario_responsable.clone(),
            observacion: payload.observacion.clone(),
            avance: payload.avance.map(i64::from),
            link_url: payload.link_url.clone(),
            fecha_registro: base_time() + Duration::minutes(id),
        });
    }

    fn write_gestion(&self, payload: &GestionPayload) {
        let mut state = self.state();
        let position = state
            .gestion
            .iter()
            .position(|r| r.id_empresa == payload.empresa_id && r.id_tarea == payload.tarea_id);
        let row = match position {
            Some(i) => &mut state.gestion[i],
            None => {
                state.gestion.push(blank_row(payload.empresa_id, payload.tarea_id, ""));
                let last = state.gestion.len() - 1;
                &mut state.gestion[last]
            }
        };
        row.fecha_ejecucion = payload.fecha_ejecucion;
        row.usuario_responsable = payload.usuario_responsable.clone();
        row.observacion = payload.observacion.clone();
        row.avance = payload.avance;
        row.link_url = payload.link_url.clone();
    }
}

fn pair(a: impl std::fmt::Display, b: impl std::fmt::Display) -> String {
    format!("{}/{}", a, b)
}

pub fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

pub fn blank_row(empresa: EmpresaId, tarea: TareaId, descripcion: &str) -> GestionRow {
    GestionRow {
        id_empresa: empresa,
        id_tarea: tarea,
        descripcion_tarea: descripcion.to_string(),
        fecha_ejecucion: None,
        usuario_responsable: None,
        observacion: None,
        avance: None,
        link_url: None,
    }
}

pub fn admin_session() -> SessionHandle {
    SessionHandle::with_session(Session::new(
        "admin-token".into(),
        "Admin".into(),
        "administrador".into(),
        Some(Cedula::new("1")),
    ))
}

pub fn prestador_session() -> SessionHandle {
    SessionHandle::with_session(Session::new(
        "prestador-token".into(),
        "Ana".into(),
        "prestador".into(),
        Some(Cedula::new("1001")),
    ))
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn login(&self, request: &LoginRequest) -> GatewayResult<LoginResponse> {
        self.enter("login", request.email.clone()).await?;
        self.state().login.clone().ok_or(ConsoleError::Unauthorized)
    }

    async fn validate_token(&self, token: &str) -> GatewayResult<ValidateTokenResponse> {
        self.enter("validate_token", token).await?;
        self.state().validate.clone().ok_or(ConsoleError::Unauthorized)
    }

    async fn list_usuarios(&self) -> GatewayResult<Vec<Usuario>> {
        self.enter("list_usuarios", "").await?;
        Ok(self.state().usuarios.clone())
    }

    async fn create_usuario(&self, dto: &UsuarioDto) -> GatewayResult<()> {
        self.enter("create_usuario", dto.usuario.cedula.to_string()).await?;
        self.state().usuarios.push(dto.usuario.clone());
        Ok(())
    }

    async fn update_usuario(&self, cedula: &Cedula, dto: &UsuarioDto) -> GatewayResult<()> {
        self.enter("update_usuario", cedula.to_string()).await?;
        let mut state = self.state();
        if let Some(u) = state.usuarios.iter_mut().find(|u| &u.cedula == cedula) {
            *u = dto.usuario.clone();
        }
        Ok(())
    }

    async fn delete_usuario(&self, cedula: &Cedula) -> GatewayResult<()> {
        self.enter("delete_usuario", cedula.to_string()).await?;
        self.state().usuarios.retain(|u| &u.cedula != cedula);
        Ok(())
    }

    async fn list_empresas(&self) -> GatewayResult<Vec<Empresa>> {
        self.enter("list_empresas", "").await?;
        Ok(self.state().empresas.clone())
    }

    async fn create_empresa(&self, empresa: &Empresa) -> GatewayResult<()> {
        self.enter("create_empresa", empresa.nit.clone()).await?;
        self.state().empresas.push(empresa.clone());
        Ok(())
    }

    async fn update_empresa(&self, nit: &str, empresa: &Empresa) -> GatewayResult<()> {
        self.enter("update_empresa", nit).await?;
        let mut state = self.state();
        if let Some(e) = state.empresas.iter_mut().find(|e| e.nit == nit) {
            *e = empresa.clone();
        }
        Ok(())
    }

    async fn delete_empresa(&self, nit: &str) -> GatewayResult<()> {
        self.enter("delete_empresa", nit).await?;
        self.state().empresas.retain(|e| e.nit != nit);
        Ok(())
    }

    async fn list_tareas(&self) -> GatewayResult<Vec<Tarea>> {
        self.enter("list_tareas", "").await?;
        Ok(self.state().tareas.clone())
    }

    async fn catalogos(&self) -> GatewayResult<Catalogos> {
        self.enter("catalogos", "").await?;
        Ok(self.state().catalogos.clone())
    }

    async fn create_tarea(&self, dto: &TareaDto) -> GatewayResult<()> {
        self.enter("create_tarea", dto.codigo_tarea.clone()).await?;
        let mut state = self.state();
        let id = TareaId(state.tareas.len() as i64 + 1);
        state.tareas.push(Tarea {
            id_tarea: id,
            codigo_tarea: dto.codigo_tarea.clone(),
            descripcion_tarea: dto.tarea.clone(),
            ..Default::default()
        });
        Ok(())
    }

    async fn update_tarea(&self, id: TareaId, dto: &TareaDto) -> GatewayResult<()> {
        self.enter("update_tarea", id.to_string()).await?;
        let mut state = self.state();
        if let Some(t) = state.tareas.iter_mut().find(|t| t.id_tarea == id) {
            t.codigo_tarea = dto.codigo_tarea.clone();
            t.descripcion_tarea = dto.tarea.clone();
        }
        Ok(())
    }

    async fn delete_tarea(&self, id: TareaId) -> GatewayResult<()> {
        self.enter("delete_tarea", id.to_string()).await?;
        self.state().tareas.retain(|t| t.id_tarea != id);
        Ok(())
    }

    async fn usuario_options(&self) -> GatewayResult<Vec<SelectOption<Cedula>>> {
        self.enter("usuario_options", "").await?;
        Ok(self.state().usuario_options.clone())
    }

    async fn empresa_options(&self) -> GatewayResult<Vec<SelectOption<EmpresaId>>> {
        self.enter("empresa_options", "").await?;
        Ok(self.state().empresa_options.clone())
    }

    async fn list_usuarios_empresa(&self) -> GatewayResult<Vec<UsuarioEmpresaRow>> {
        self.enter("list_usuarios_empresa", "").await?;
        Ok(self.state().usuarios_empresa.clone())
    }

    async fn create_usuario_empresa(
        &self,
        cedula: &Cedula,
        empresa: EmpresaId,
    ) -> GatewayResult<()> {
        self.enter("create_usuario_empresa", pair(cedula, empresa)).await?;
        let row = UsuarioEmpresaRow {
            usuario_cedula: cedula.clone(),
            id_empresa: empresa,
        };
        let mut state = self.state();
        if !state.usuarios_empresa.contains(&row) {
            state.usuarios_empresa.push(row);
        }
        Ok(())
    }

    async fn delete_usuario_empresa(
        &self,
        cedula: &Cedula,
        empresa: EmpresaId,
    ) -> GatewayResult<()> {
        self.enter("delete_usuario_empresa", pair(cedula, empresa)).await?;
        self.state()
            .usuarios_empresa
            .retain(|r| !(&r.usuario_cedula == cedula && r.id_empresa == empresa));
        Ok(())
    }

    async fn empresas_by_usuario(&self, cedula: &Cedula) -> GatewayResult<Vec<EmpresaAsignada>> {
        self.enter("empresas_by_usuario", cedula.to_string()).await?;
        Ok(self.state().mis_empresas.clone())
    }

    async fn list_empresa_tareas(&self) -> GatewayResult<Vec<EmpresaTareaRow>> {
        self.enter("list_empresa_tareas", "").await?;
        Ok(self.state().empresa_tareas.clone())
    }

    async fn assign_tarea(&self, empresa: EmpresaId, tarea: TareaId) -> GatewayResult<()> {
        self.enter("assign_tarea", pair(empresa, tarea)).await?;
        let row = EmpresaTareaRow {
            id_empresa: empresa,
            id_tarea: tarea,
        };
        let mut state = self.state();
        if !state.empresa_tareas.contains(&row) {
            state.empresa_tareas.push(row);
        }
        Ok(())
    }

    async fn unassign_tarea(&self, empresa: EmpresaId, tarea: TareaId) -> GatewayResult<()> {
        self.enter("unassign_tarea", pair(empresa, tarea)).await?;
        self.state()
            .empresa_tareas
            .retain(|r| !(r.id_empresa == empresa && r.id_tarea == tarea));
        Ok(())
    }

    async fn list_gestion(&self, empresa: EmpresaId) -> GatewayResult<Vec<GestionRow>> {
        self.enter("list_gestion", empresa.to_string()).await?;
        Ok(self
            .state()
            .gestion
            .iter()
            .filter(|r| r.id_empresa == empresa)
            .cloned()
            .collect())
    }

    async fn create_gestion(&self, payload: &GestionPayload) -> GatewayResult<()> {
        self.enter("create_gestion", pair(payload.empresa_id, payload.tarea_id)).await?;
        self.write_gestion(payload);
        self.record_historial(payload);
        Ok(())
    }

    async fn update_gestion(&self, payload: &GestionPayload) -> GatewayResult<()> {
        self.enter("update_gestion", pair(payload.empresa_id, payload.tarea_id)).await?;
        self.write_gestion(payload);
        self.record_historial(payload);
        Ok(())
    }

    async fn delete_gestion(&self, empresa: EmpresaId, tarea: TareaId) -> GatewayResult<()> {
        self.enter("delete_gestion", pair(empresa, tarea)).await?;
        let mut state = self.state();
        if let Some(row) = state
            .gestion
            .iter_mut()
            .find(|r| r.id_empresa == empresa && r.id_tarea == tarea)
        {
            let descripcion = std::mem::take(&mut row.descripcion_tarea);
            *row = blank_row(empresa, tarea, &descripcion);
        }
        Ok(())
    }

    async fn historial(
        &self,
        empresa: EmpresaId,
        tarea: TareaId,
    ) -> GatewayResult<Vec<HistorialEntry>> {
        self.enter("historial", pair(empresa, tarea)).await?;
        Ok(self
            .state()
            .historial
            .iter()
            .filter(|h| h.id_empresa == empresa && h.id_tarea == tarea)
            .cloned()
            .collect())
    }
}
