use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::common::AggregateId;

// ============================================================================
// ID Type
// ============================================================================

/// Cédula: national id number, the user identifier
///
/// The backend returns it either as a JSON number or as a string, so decoding
/// accepts both and normalises to the string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Cedula(pub String);

impl Cedula {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cedula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Cedula {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Ok(Cedula(s)),
            Raw::Number(n) => Ok(Cedula(n.to_string())),
        }
    }
}

impl AggregateId for Cedula {
    fn as_string(&self) -> String {
        self.0.clone()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Cédula cannot be empty".into());
        }
        Ok(Cedula(trimmed.to_string()))
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Usuario (administrator or prestador)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usuario {
    #[serde(default)]
    pub cedula: Cedula,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub direccion: String,
    #[serde(default)]
    pub licencia: String,
    #[serde(default)]
    pub profesion: String,
    #[serde(default)]
    pub perfil: String,
    #[serde(default)]
    pub formacion: String,
    #[serde(default)]
    pub especialidad: String,
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub competencia_tecnica: String,
    #[serde(default)]
    pub curso_sst: String,
    #[serde(default)]
    pub activo_inactivo: String,
}

impl Usuario {
    /// Displayed text fields in form order (cédula excluded)
    pub fn text_fields(&self) -> [(&'static str, &str); 14] {
        [
            ("nombre", &self.nombre),
            ("apellido", &self.apellido),
            ("telefono", &self.telefono),
            ("email", &self.email),
            ("direccion", &self.direccion),
            ("licencia", &self.licencia),
            ("profesion", &self.profesion),
            ("perfil", &self.perfil),
            ("formacion", &self.formacion),
            ("especialidad", &self.especialidad),
            ("titulo", &self.titulo),
            ("competencia_tecnica", &self.competencia_tecnica),
            ("curso_sst", &self.curso_sst),
            ("activo_inactivo", &self.activo_inactivo),
        ]
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido).trim().to_string()
    }
}

/// Create/update payload; the password is only sent when present
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsuarioDto {
    #[serde(flatten)]
    pub usuario: Usuario,
    #[serde(
        rename = "contraseña",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub contrasena: Option<String>,
}
