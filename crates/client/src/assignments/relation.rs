use std::fmt::Display;

use async_trait::async_trait;
use contracts::domain::a001_usuario::aggregate::Cedula;
use contracts::domain::a002_empresa::aggregate::EmpresaId;
use contracts::domain::a003_tarea::aggregate::TareaId;
use contracts::domain::common::AggregateId;
use contracts::shared::options::SelectOption;

use crate::domain::a003_tarea::service::option_label;
use crate::shared::gateway::{Gateway, GatewayResult};

/// Typed `(owner, member)` pair
///
/// Compared field by field, so ids containing separators never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationKey<O, M> {
    pub owner: O,
    pub member: M,
}

impl<O, M> RelationKey<O, M> {
    pub fn new(owner: O, member: M) -> Self {
        Self { owner, member }
    }
}

/// Identifier usable on either side of a relation
pub trait RelationId: AggregateId + Ord + Display + Send + Sync + 'static {}

impl<T: AggregateId + Ord + Display + Send + Sync + 'static> RelationId for T {}

/// A many-to-many relationship exposed by the backend
///
/// Implementations are stateless markers; every call goes through the gateway.
#[async_trait]
pub trait Relation: Send + Sync + 'static {
    type Owner: RelationId;
    type Member: RelationId;

    /// Name used in logs
    const NAME: &'static str;

    async fn list(
        gateway: &dyn Gateway,
    ) -> GatewayResult<Vec<RelationKey<Self::Owner, Self::Member>>>;

    async fn owners(gateway: &dyn Gateway) -> GatewayResult<Vec<SelectOption<Self::Owner>>>;

    async fn members(gateway: &dyn Gateway) -> GatewayResult<Vec<SelectOption<Self::Member>>>;

    async fn create(
        gateway: &dyn Gateway,
        owner: &Self::Owner,
        member: &Self::Member,
    ) -> GatewayResult<()>;

    async fn delete(
        gateway: &dyn Gateway,
        owner: &Self::Owner,
        member: &Self::Member,
    ) -> GatewayResult<()>;
}

/// User (by cédula) assigned to companies
pub struct UsuarioEmpresa;

#[async_trait]
impl Relation for UsuarioEmpresa {
    type Owner = Cedula;
    type Member = EmpresaId;

    const NAME: &'static str = "usuario-empresa";

    async fn list(gateway: &dyn Gateway) -> GatewayResult<Vec<RelationKey<Cedula, EmpresaId>>> {
        Ok(gateway
            .list_usuarios_empresa()
            .await?
            .into_iter()
            .map(|row| RelationKey::new(row.usuario_cedula, row.id_empresa))
            .collect())
    }

    async fn owners(gateway: &dyn Gateway) -> GatewayResult<Vec<SelectOption<Cedula>>> {
        gateway.usuario_options().await
    }

    async fn members(gateway: &dyn Gateway) -> GatewayResult<Vec<SelectOption<EmpresaId>>> {
        gateway.empresa_options().await
    }

    async fn create(
        gateway: &dyn Gateway,
        owner: &Cedula,
        member: &EmpresaId,
    ) -> GatewayResult<()> {
        gateway.create_usuario_empresa(owner, *member).await
    }

    async fn delete(
        gateway: &dyn Gateway,
        owner: &Cedula,
        member: &EmpresaId,
    ) -> GatewayResult<()> {
        gateway.delete_usuario_empresa(owner, *member).await
    }
}

/// Company assigned to tasks
pub struct EmpresaTarea;

#[async_trait]
impl Relation for EmpresaTarea {
    type Owner = EmpresaId;
    type Member = TareaId;

    const NAME: &'static str = "empresa-tarea";

    async fn list(gateway: &dyn Gateway) -> GatewayResult<Vec<RelationKey<EmpresaId, TareaId>>> {
        Ok(gateway
            .list_empresa_tareas()
            .await?
            .into_iter()
            .map(|row| RelationKey::new(row.id_empresa, row.id_tarea))
            .collect())
    }

    async fn owners(gateway: &dyn Gateway) -> GatewayResult<Vec<SelectOption<EmpresaId>>> {
        gateway.empresa_options().await
    }

    async fn members(gateway: &dyn Gateway) -> GatewayResult<Vec<SelectOption<TareaId>>> {
        Ok(gateway
            .list_tareas()
            .await?
            .iter()
            .map(|t| SelectOption::new(t.id_tarea, option_label(t)))
            .collect())
    }

    async fn create(
        gateway: &dyn Gateway,
        owner: &EmpresaId,
        member: &TareaId,
    ) -> GatewayResult<()> {
        gateway.assign_tarea(*owner, *member).await
    }

    async fn delete(
        gateway: &dyn Gateway,
        owner: &EmpresaId,
        member: &TareaId,
    ) -> GatewayResult<()> {
        gateway.unassign_tarea(*owner, *member).await
    }
}
