use serde::{Deserialize, Serialize};

use crate::domain::a001_usuario::aggregate::Cedula;

/// Profile string the backend assigns to administrators
pub const PERFIL_ADMINISTRADOR: &str = "administrador";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(rename = "contraseña")]
    pub contrasena: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub perfil: String,
    #[serde(default)]
    pub cedula: Option<Cedula>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateTokenRequest {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateTokenResponse {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub perfil: String,
    #[serde(default)]
    pub cedula: Option<Cedula>,
}
