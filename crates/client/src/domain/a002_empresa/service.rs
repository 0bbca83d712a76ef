use contracts::domain::a002_empresa::aggregate::{Empresa, EmpresaId};
use contracts::shared::options::SelectOption;

use crate::domain::{check_email, require_fields};
use crate::shared::error::{ConsoleError, ValidationError};
use crate::shared::gateway::Gateway;
use crate::system::auth::SessionHandle;

/// `nit` and `nombre_empresa` are required; emails are checked when present
pub fn validate(empresa: &Empresa) -> Result<(), ValidationError> {
    require_fields([
        ("nit", empresa.nit.as_str()),
        ("nombre_empresa", empresa.nombre_empresa.as_str()),
    ])?;

    for (field, value) in empresa.email_fields() {
        if let Some(value) = value {
            check_email(field, value)?;
        }
    }
    Ok(())
}

pub async fn list(
    gateway: &dyn Gateway,
    session: &SessionHandle,
) -> Result<Vec<Empresa>, ConsoleError> {
    session.require()?;
    gateway.list_empresas().await
}

pub async fn options(
    gateway: &dyn Gateway,
    session: &SessionHandle,
) -> Result<Vec<SelectOption<EmpresaId>>, ConsoleError> {
    session.require()?;
    gateway.empresa_options().await
}

pub async fn create(
    gateway: &dyn Gateway,
    session: &SessionHandle,
    empresa: &Empresa,
) -> Result<(), ConsoleError> {
    session.require_admin()?;
    validate(empresa)?;

    gateway.create_empresa(empresa).await?;
    tracing::info!("Created company {} ({})", empresa.nombre_empresa, empresa.nit);
    Ok(())
}

/// Update the company identified by `nit`
///
/// `nit` is the key the company was loaded with; the body may carry a new one.
pub async fn update(
    gateway: &dyn Gateway,
    session: &SessionHandle,
    nit: &str,
    empresa: &Empresa,
) -> Result<(), ConsoleError> {
    session.require_admin()?;
    validate(empresa)?;

    gateway.update_empresa(nit, empresa).await?;
    tracing::info!("Updated company {}", nit);
    Ok(())
}

pub async fn delete(
    gateway: &dyn Gateway,
    session: &SessionHandle,
    nit: &str,
) -> Result<(), ConsoleError> {
    session.require_admin()?;
    gateway.delete_empresa(nit).await?;
    tracing::info!("Deleted company {}", nit);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::gateway::fake::{admin_session, prestador_session, FakeGateway};

    fn acme() -> Empresa {
        Empresa {
            nit: "900123456-7".into(),
            nombre_empresa: "Acme SAS".into(),
            email: Some("info@acme.co".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_required_and_emails() {
        assert_eq!(validate(&acme()), Ok(()));

        let blank = Empresa::default();
        assert_eq!(
            validate(&blank),
            Err(ValidationError::MissingFields(vec![
                "nit".into(),
                "nombre_empresa".into()
            ]))
        );

        let mut bad = acme();
        bad.email_contactosst = Some("contacto".into());
        assert_eq!(
            validate(&bad),
            Err(ValidationError::InvalidEmail {
                field: "email_contactosst".into(),
                value: "contacto".into()
            })
        );

        let mut empty_email = acme();
        empty_email.email = Some(String::new());
        assert_eq!(validate(&empty_email), Ok(()));
    }

    #[tokio::test]
    async fn test_update_and_delete_by_nit() {
        let gateway = FakeGateway::default();
        let session = admin_session();
        create(&gateway, &session, &acme()).await.unwrap();

        let mut renamed = acme();
        renamed.nombre_empresa = "Acme Colombia SAS".into();
        update(&gateway, &session, "900123456-7", &renamed).await.unwrap();
        assert_eq!(gateway.call_keys("update_empresa"), vec!["900123456-7"]);
        assert_eq!(
            list(&gateway, &session).await.unwrap()[0].nombre_empresa,
            "Acme Colombia SAS"
        );

        delete(&gateway, &session, "900123456-7").await.unwrap();
        assert!(gateway.state().empresas.is_empty());
    }

    #[tokio::test]
    async fn test_prestador_cannot_delete() {
        let gateway = FakeGateway::default();
        let err = delete(&gateway, &prestador_session(), "1").await.unwrap_err();
        assert_eq!(err, ConsoleError::Forbidden);
        assert_eq!(gateway.calls("delete_empresa"), 0);
    }
}
