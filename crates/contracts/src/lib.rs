pub mod domain;
pub mod relations;
pub mod shared;
pub mod system;
