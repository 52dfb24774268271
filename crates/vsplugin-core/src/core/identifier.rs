use super::error::{HelperError, HelperResult};
use std::fmt;
use std::str::FromStr;

/// A marketplace extension ID, `publisher.name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtensionIdentifier {
    pub publisher: String,
    pub name: String,
}

impl ExtensionIdentifier {
    /// Parse `publisher.name`, splitting on the first `.` only.
    ///
    /// `foo.bar.baz` parses as publisher `foo`, name `bar.baz`.
    pub fn parse(input: &str) -> HelperResult<Self> {
        let trimmed = input.trim();
        let (publisher, name) = trimmed
            .split_once('.')
            .ok_or_else(|| HelperError::MalformedIdentifier(trimmed.to_string()))?;

        if publisher.is_empty() || name.is_empty() {
            return Err(HelperError::MalformedIdentifier(trimmed.to_string()));
        }

        Ok(Self {
            publisher: publisher.to_string(),
            name: name.to_string(),
        })
    }

    /// File name used when staging the package (`publisher.name.vsix`).
    pub fn package_file_name(&self) -> String {
        format!("{}.vsix", self)
    }
}

impl fmt::Display for ExtensionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.publisher, self.name)
    }
}

impl FromStr for ExtensionIdentifier {
    type Err = HelperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
