use serde::{Deserialize, Serialize};

crate::numeric_id!(
    /// Surrogate company id used by the assignment and gestión endpoints
    EmpresaId
);

/// Empresa under SG-SST follow-up
///
/// Update and delete endpoints are keyed by `nit`; relations use `id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Empresa {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EmpresaId>,
    #[serde(default)]
    pub nit: String,
    #[serde(default)]
    pub nombre_empresa: String,
    pub ciudad: Option<String>,
    pub departamento: Option<String>,
    pub direccion_principal: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub representante_legal: Option<String>,
    pub email_representante_legal: Option<String>,
    pub contacto_sst: Option<String>,
    pub email_contactosst: Option<String>,
    pub fecha_inicio: Option<String>,
    pub visitas_mensual: Option<i64>,
    pub visitas_emergencias: Option<i64>,
    pub cantidad_trabajadores: Option<i64>,
    pub clase_riesgo: Option<String>,
    pub arl: Option<String>,
    pub actividad_economica: Option<String>,
    pub descripcion_actividad: Option<String>,
    pub numero_sedes: Option<i64>,
}

impl Empresa {
    /// All displayed columns rendered as text, in grid order
    pub fn display_fields(&self) -> Vec<(&'static str, String)> {
        fn text(v: &Option<String>) -> String {
            v.clone().unwrap_or_default()
        }
        fn number(v: &Option<i64>) -> String {
            v.map(|n| n.to_string()).unwrap_or_default()
        }

        vec![
            ("nit", self.nit.clone()),
            ("nombre_empresa", self.nombre_empresa.clone()),
            ("ciudad", text(&self.ciudad)),
            ("departamento", text(&self.departamento)),
            ("direccion_principal", text(&self.direccion_principal)),
            ("telefono", text(&self.telefono)),
            ("email", text(&self.email)),
            ("representante_legal", text(&self.representante_legal)),
            ("email_representante_legal", text(&self.email_representante_legal)),
            ("contacto_sst", text(&self.contacto_sst)),
            ("email_contactosst", text(&self.email_contactosst)),
            ("fecha_inicio", text(&self.fecha_inicio)),
            ("visitas_mensual", number(&self.visitas_mensual)),
            ("visitas_emergencias", number(&self.visitas_emergencias)),
            ("cantidad_trabajadores", number(&self.cantidad_trabajadores)),
            ("clase_riesgo", text(&self.clase_riesgo)),
            ("arl", text(&self.arl)),
            ("actividad_economica", text(&self.actividad_economica)),
            ("descripcion_actividad", text(&self.descripcion_actividad)),
            ("numero_sedes", number(&self.numero_sedes)),
        ]
    }

    /// Email columns that must look like an address when filled in
    pub fn email_fields(&self) -> [(&'static str, Option<&str>); 3] {
        [
            ("email", self.email.as_deref()),
            ("email_representante_legal", self.email_representante_legal.as_deref()),
            ("email_contactosst", self.email_contactosst.as_deref()),
        ]
    }
}

/// Company assigned to a prestador (`mis-empresas` endpoint)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmpresaAsignada {
    #[serde(alias = "id")]
    pub id_empresa: EmpresaId,
    #[serde(default)]
    pub nombre_empresa: String,
}
