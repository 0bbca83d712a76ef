//! Many-to-many assignments: users ↔ companies, companies ↔ tasks

pub mod mis_empresas;
pub mod relation;
pub mod store;

pub use mis_empresas::mis_empresas;
pub use relation::{EmpresaTarea, Relation, RelationKey, UsuarioEmpresa};
pub use store::{BulkReport, RelationStore};
