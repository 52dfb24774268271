use super::prompt::{read_identifier, DialoguerInput, UserInput};
use vsplugin_helper::core::{ExtensionIdentifier, HelperResult};
use vsplugin_helper::di::ServiceContainer;
use vsplugin_helper::remote::detect_remote_host;
use vsplugin_helper::workflow;

pub async fn run(id: Option<String>) -> HelperResult<()> {
    run_with_input(id, &DialoguerInput).await
}

pub async fn run_with_input(id: Option<String>, input: &dyn UserInput) -> HelperResult<()> {
    let Some(identifier) = read_identifier(id, input)? else {
        tracing::info!("No extension given, nothing to install");
        return Ok(());
    };

    // A connected remote host changes how the local install is invoked
    let remote_host = detect_remote_host(None);
    let services = ServiceContainer::new(remote_host)?;
    execute(&services, &identifier).await
}

pub async fn execute(services: &ServiceContainer, identifier: &ExtensionIdentifier) -> HelperResult<()> {
    let progress = super::spinner();
    let result = workflow::install_local(services, identifier, &progress).await;
    progress.finish_and_clear();

    result?.into_result()?;
    println!("✓ Installed {}", identifier);
    Ok(())
}
