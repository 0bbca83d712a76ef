use serde::{Deserialize, Serialize};

use crate::domain::a001_usuario::aggregate::Cedula;
use crate::domain::a002_empresa::aggregate::EmpresaId;

/// Row of `/usuarios_empresa/list`; also the create body
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UsuarioEmpresaRow {
    pub usuario_cedula: Cedula,
    pub id_empresa: EmpresaId,
}
