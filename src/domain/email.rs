use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Address identifying a camp's owner or one of the members it is shared with.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Email(String);

impl Email {
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if !validator::validate_email(trimmed) {
            return Err(ValidationError::new(format!(
                "Invalid email address: {trimmed}"
            )));
        }

        Ok(Self(trimmed.to_lowercase()))
    }
}

impl AsRef<String> for Email {
    fn as_ref(&self) -> &String {
        &self.0
    }
}
