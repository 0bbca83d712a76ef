use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use contracts::domain::a001_usuario::aggregate::{Cedula, Usuario, UsuarioDto};
use contracts::domain::a002_empresa::aggregate::{Empresa, EmpresaAsignada, EmpresaId};
use contracts::domain::a003_tarea::aggregate::{Catalogos, Tarea, TareaDto, TareaId};
use contracts::domain::a004_gestion::aggregate::{GestionPayload, GestionRow};
use contracts::domain::a004_gestion::historial::HistorialEntry;
use contracts::relations::empresa_tarea::{EmpresaTareaRequest, EmpresaTareaRow};
use contracts::relations::usuario_empresa::UsuarioEmpresaRow;
use contracts::shared::options::SelectOption;
use contracts::system::auth::{
    LoginRequest, LoginResponse, ValidateTokenRequest, ValidateTokenResponse,
};

use super::{Gateway, GatewayResult};
use crate::shared::config::ApiConfig;
use crate::shared::error::ConsoleError;
use crate::system::auth::SessionHandle;

const GESTION_PATH: &str = "/gestion-prestador-tareas";

/// REST client for the SG-SST backend
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    session: SessionHandle,
}

impl HttpGateway {
    pub fn new(config: &ApiConfig, session: SessionHandle) -> Result<Self, ConsoleError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConsoleError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request with the session bearer token; fails before sending without one
    fn authorized(&self, method: Method, path: &str) -> GatewayResult<RequestBuilder> {
        let token = self.session.token().ok_or(ConsoleError::Unauthorized)?;
        tracing::debug!("{} {}", method, path);
        Ok(self.client.request(method, self.url(path)).bearer_auth(token))
    }

    async fn execute(&self, request: RequestBuilder) -> GatewayResult<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!("Backend rejected credentials (HTTP {})", status.as_u16());
            return Err(ConsoleError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = backend_message(&body);
            tracing::error!("Backend request failed with HTTP {}: {}", status.as_u16(), message);
            return Err(ConsoleError::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> GatewayResult<T> {
        let response = self.execute(request).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse backend response: {}", e);
            ConsoleError::Decode(e.to_string())
        })
    }

    async fn send(&self, request: RequestBuilder) -> GatewayResult<()> {
        self.execute(request).await.map(|_| ())
    }
}

/// `{"message": ...}` when the backend sends one, else a prefix of the raw body
fn backend_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    let preview: String = body.chars().take(200).collect();
    if preview.len() < body.len() {
        format!("{}...", preview)
    } else {
        preview
    }
}

fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn login(&self, request: &LoginRequest) -> GatewayResult<LoginResponse> {
        self.fetch(self.client.post(self.url("/auth/login")).json(request))
            .await
    }

    async fn validate_token(&self, token: &str) -> GatewayResult<ValidateTokenResponse> {
        let body = ValidateTokenRequest {
            token: token.to_string(),
        };
        self.fetch(
            self.client
                .post(self.url("/auth/validate-token"))
                .bearer_auth(token)
                .json(&body),
        )
        .await
    }

    async fn list_usuarios(&self) -> GatewayResult<Vec<Usuario>> {
        self.fetch(self.authorized(Method::GET, "/users/usuarios")?)
            .await
    }

    async fn create_usuario(&self, dto: &UsuarioDto) -> GatewayResult<()> {
        self.send(self.authorized(Method::POST, "/users/create")?.json(dto))
            .await
    }

    async fn update_usuario(&self, cedula: &Cedula, dto: &UsuarioDto) -> GatewayResult<()> {
        let path = format!("/users/update/{}", segment(cedula.as_str()));
        self.send(self.authorized(Method::PUT, &path)?.json(dto)).await
    }

    async fn delete_usuario(&self, cedula: &Cedula) -> GatewayResult<()> {
        let path = format!("/users/delete/{}", segment(cedula.as_str()));
        self.send(self.authorized(Method::DELETE, &path)?).await
    }

    async fn list_empresas(&self) -> GatewayResult<Vec<Empresa>> {
        self.fetch(self.authorized(Method::GET, "/empresas/empresas")?)
            .await
    }

    async fn create_empresa(&self, empresa: &Empresa) -> GatewayResult<()> {
        self.send(self.authorized(Method::POST, "/empresas/create")?.json(empresa))
            .await
    }

    async fn update_empresa(&self, nit: &str, empresa: &Empresa) -> GatewayResult<()> {
        let path = format!("/empresas/update/{}", segment(nit));
        self.send(self.authorized(Method::PUT, &path)?.json(empresa))
            .await
    }

    async fn delete_empresa(&self, nit: &str) -> GatewayResult<()> {
        let path = format!("/empresas/delete/{}", segment(nit));
        self.send(self.authorized(Method::DELETE, &path)?).await
    }

    async fn list_tareas(&self) -> GatewayResult<Vec<Tarea>> {
        self.fetch(self.authorized(Method::GET, "/tareas/completo")?)
            .await
    }

    async fn catalogos(&self) -> GatewayResult<Catalogos> {
        self.fetch(self.authorized(Method::GET, "/tareas/catalogos")?)
            .await
    }

    async fn create_tarea(&self, dto: &TareaDto) -> GatewayResult<()> {
        self.send(self.authorized(Method::POST, "/tareas")?.json(dto))
            .await
    }

    async fn update_tarea(&self, id: TareaId, dto: &TareaDto) -> GatewayResult<()> {
        let path = format!("/tareas/{}", id);
        self.send(self.authorized(Method::PUT, &path)?.json(dto)).await
    }

    async fn delete_tarea(&self, id: TareaId) -> GatewayResult<()> {
        let path = format!("/tareas/{}", id);
        self.send(self.authorized(Method::DELETE, &path)?).await
    }

    async fn usuario_options(&self) -> GatewayResult<Vec<SelectOption<Cedula>>> {
        self.fetch(self.authorized(Method::GET, "/usuarios_empresa/options/usuarios")?)
            .await
    }

    async fn empresa_options(&self) -> GatewayResult<Vec<SelectOption<EmpresaId>>> {
        self.fetch(self.authorized(Method::GET, "/usuarios_empresa/options/empresas")?)
            .await
    }

    async fn list_usuarios_empresa(&self) -> GatewayResult<Vec<UsuarioEmpresaRow>> {
        self.fetch(self.authorized(Method::GET, "/usuarios_empresa/list")?)
            .await
    }

    async fn create_usuario_empresa(
        &self,
        cedula: &Cedula,
        empresa: EmpresaId,
    ) -> GatewayResult<()> {
        let body = UsuarioEmpresaRow {
            usuario_cedula: cedula.clone(),
            id_empresa: empresa,
        };
        self.send(
            self.authorized(Method::POST, "/usuarios_empresa/create")?
                .json(&body),
        )
        .await
    }

    async fn delete_usuario_empresa(
        &self,
        cedula: &Cedula,
        empresa: EmpresaId,
    ) -> GatewayResult<()> {
        let path = format!(
            "/usuarios_empresa/delete/{}/{}",
            segment(cedula.as_str()),
            empresa
        );
        self.send(self.authorized(Method::DELETE, &path)?).await
    }

    async fn empresas_by_usuario(&self, cedula: &Cedula) -> GatewayResult<Vec<EmpresaAsignada>> {
        let path = format!("/usuarios_empresa/mis-empresas/{}", segment(cedula.as_str()));
        self.fetch(self.authorized(Method::GET, &path)?).await
    }

    async fn list_empresa_tareas(&self) -> GatewayResult<Vec<EmpresaTareaRow>> {
        self.fetch(self.authorized(Method::GET, "/empresa-tareas")?)
            .await
    }

    async fn assign_tarea(&self, empresa: EmpresaId, tarea: TareaId) -> GatewayResult<()> {
        let body = EmpresaTareaRequest {
            id_empresa: empresa,
            id_tarea: tarea,
        };
        self.send(self.authorized(Method::POST, "/empresa-tareas")?.json(&body))
            .await
    }

    async fn unassign_tarea(&self, empresa: EmpresaId, tarea: TareaId) -> GatewayResult<()> {
        let query = EmpresaTareaRequest {
            id_empresa: empresa,
            id_tarea: tarea,
        };
        self.send(self.authorized(Method::DELETE, "/empresa-tareas")?.query(&query))
            .await
    }

    async fn list_gestion(&self, empresa: EmpresaId) -> GatewayResult<Vec<GestionRow>> {
        self.fetch(
            self.authorized(Method::GET, GESTION_PATH)?
                .query(&[("empresaId", empresa.value())]),
        )
        .await
    }

    async fn create_gestion(&self, payload: &GestionPayload) -> GatewayResult<()> {
        self.send(self.authorized(Method::POST, GESTION_PATH)?.json(payload))
            .await
    }

    async fn update_gestion(&self, payload: &GestionPayload) -> GatewayResult<()> {
        self.send(self.authorized(Method::PUT, GESTION_PATH)?.json(payload))
            .await
    }

    async fn delete_gestion(&self, empresa: EmpresaId, tarea: TareaId) -> GatewayResult<()> {
        self.send(
            self.authorized(Method::DELETE, GESTION_PATH)?
                .query(&[("empresaId", empresa.value()), ("tareaId", tarea.value())]),
        )
        .await
    }

    async fn historial(
        &self,
        empresa: EmpresaId,
        tarea: TareaId,
    ) -> GatewayResult<Vec<HistorialEntry>> {
        let path = format!("{}/historial", GESTION_PATH);
        self.fetch(
            self.authorized(Method::GET, &path)?
                .query(&[("empresaId", empresa.value()), ("tareaId", tarea.value())]),
        )
        .await
    }
}
