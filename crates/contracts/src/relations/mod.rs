//! Many-to-many assignment rows

pub mod empresa_tarea;
pub mod usuario_empresa;
