pub mod a001_usuario;
pub mod a002_empresa;
pub mod a003_tarea;
pub mod a004_gestion;
pub mod common;
