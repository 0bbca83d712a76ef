pub mod aggregate;
pub mod historial;
