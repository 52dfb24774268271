use dialoguer::Input;
use vsplugin_helper::core::{ExtensionIdentifier, HelperError, HelperResult};

pub const IDENTIFIER_PROMPT: &str = "Extension to install (publisher.name)";

// Trait for user input (for dependency injection in tests)
pub trait UserInput {
    fn prompt_string(&self, prompt: &str) -> HelperResult<String>;
}

// Real implementation using dialoguer
pub struct DialoguerInput;

impl UserInput for DialoguerInput {
    fn prompt_string(&self, prompt: &str) -> HelperResult<String> {
        Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| HelperError::Config(format!("Failed to read input: {}", e)))
    }
}

/// Identifier from the argument, or from a prompt when none was given
///
/// A blank answer yields `None`. Malformed input fails here, before any
/// network call.
pub fn read_identifier(
    arg: Option<String>,
    input: &dyn UserInput,
) -> HelperResult<Option<ExtensionIdentifier>> {
    let raw = match arg {
        Some(raw) => raw,
        None => input.prompt_string(IDENTIFIER_PROMPT)?,
    };

    if raw.trim().is_empty() {
        return Ok(None);
    }

    ExtensionIdentifier::parse(&raw).map(Some)
}
