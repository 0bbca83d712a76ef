use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use client::assignments::{mis_empresas, EmpresaTarea, RelationStore, UsuarioEmpresa};
use client::gestion::GestionBoard;
use client::shared::config::{load_config, resolve_path};
use client::shared::gateway::{Gateway, HttpGateway};
use client::system::auth::{service, storage, SessionHandle};

const EMAIL_ENV: &str = "SGSST_EMAIL";
const PASSWORD_ENV: &str = "SGSST_PASSWORD";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("Failed to load configuration")?;
    client::system::tracing::initialize(&config.logging)?;

    let session = SessionHandle::new();
    let gateway: Arc<dyn Gateway> = Arc::new(HttpGateway::new(&config.api, session.clone())?);
    let token_path = resolve_path(&config.session.token_file);

    if std::env::args().nth(1).as_deref() == Some("logout") {
        service::logout(&session);
        storage::clear_token(&token_path)?;
        println!("Session closed");
        return Ok(());
    }

    authenticate(gateway.as_ref(), &session, &token_path).await?;
    let current = session.require()?;
    println!("Connected to {} as {} ({:?})", config.api.base_url, current.nombre, current.role);

    if current.is_admin() {
        admin_summary(gateway, session).await
    } else {
        prestador_summary(gateway, session).await
    }
}

/// Reuse the stored token when the backend still accepts it, else log in from the environment
async fn authenticate(
    gateway: &dyn Gateway,
    session: &SessionHandle,
    token_path: &Path,
) -> anyhow::Result<()> {
    if let Some(token) = storage::load_token(token_path)? {
        match service::restore(gateway, session, &token).await {
            Ok(_) => return Ok(()),
            Err(_) => storage::clear_token(token_path)?,
        }
    }

    let (email, password) = match (std::env::var(EMAIL_ENV), std::env::var(PASSWORD_ENV)) {
        (Ok(email), Ok(password)) => (email, password),
        _ => anyhow::bail!("No valid session: set {} and {}", EMAIL_ENV, PASSWORD_ENV),
    };

    let new_session = service::login(gateway, session, &email, &password)
        .await
        .context("Login failed")?;
    storage::save_token(token_path, &new_session.token)
        .with_context(|| format!("Cannot store token in {}", token_path.display()))?;
    Ok(())
}

async fn admin_summary(gateway: Arc<dyn Gateway>, session: SessionHandle) -> anyhow::Result<()> {
    let mut usuarios = RelationStore::<UsuarioEmpresa>::new(gateway.clone(), session.clone());
    usuarios.load().await.context("Loading user assignments")?;

    let mut tareas = RelationStore::<EmpresaTarea>::new(gateway, session);
    tareas.load().await.context("Loading task assignments")?;

    println!("\nCompanies per user:");
    for owner in usuarios.owners().to_vec() {
        usuarios.select_owner(owner.value.clone())?;
        println!("  {:<40} {}", owner.label, usuarios.assigned_members().len());
    }

    println!("\nTasks per company:");
    for owner in tareas.owners().to_vec() {
        tareas.select_owner(owner.value)?;
        println!("  {:<40} {}", owner.label, tareas.assigned_members().len());
    }

    Ok(())
}

async fn prestador_summary(gateway: Arc<dyn Gateway>, session: SessionHandle) -> anyhow::Result<()> {
    let empresas = mis_empresas(gateway.as_ref(), &session).await?;
    if empresas.is_empty() {
        println!("No companies assigned");
        return Ok(());
    }

    println!("\n{:<40} {:>9} {:>9}", "Company", "Recorded", "Pending");
    for empresa in empresas {
        let board = GestionBoard::load(gateway.clone(), session.clone(), empresa.id_empresa)
            .await
            .with_context(|| format!("Loading gestión for {}", empresa.nombre_empresa))?;
        let (present, absent) = board.counts();
        println!("{:<40} {:>9} {:>9}", board.empresa_nombre(), present, absent);
    }

    Ok(())
}
