use super::prompt::{read_identifier, DialoguerInput, UserInput};
use vsplugin_helper::core::{ExtensionIdentifier, HelperError, HelperResult};
use vsplugin_helper::di::ServiceContainer;
use vsplugin_helper::remote::detect_remote_host;
use vsplugin_helper::workflow;

pub async fn run(id: Option<String>, host: Option<String>) -> HelperResult<()> {
    run_with_input(id, host, &DialoguerInput).await
}

pub async fn run_with_input(
    id: Option<String>,
    host: Option<String>,
    input: &dyn UserInput,
) -> HelperResult<()> {
    // Checked before prompting so a missing host never costs a network call
    let host = detect_remote_host(host.as_deref()).ok_or(HelperError::RemoteUnsupported)?;

    let Some(identifier) = read_identifier(id, input)? else {
        tracing::info!("No extension given, nothing to install");
        return Ok(());
    };

    let services = ServiceContainer::new(Some(host))?;
    execute(&services, &identifier).await
}

pub async fn execute(services: &ServiceContainer, identifier: &ExtensionIdentifier) -> HelperResult<()> {
    let host = services
        .remote()
        .map(|h| h.name().to_string())
        .ok_or(HelperError::RemoteUnsupported)?;

    let progress = super::spinner();
    let result = workflow::install_remote(services, identifier, &progress).await;
    progress.finish_and_clear();

    result?.into_result()?;
    println!("✓ Installed {} on {}", identifier, host);
    Ok(())
}
