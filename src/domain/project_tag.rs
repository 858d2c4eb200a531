use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-text label (usually a construction site) used to group rooms and
/// workers in reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectTag(String);

impl ProjectTag {
    pub fn parse(tag: &str) -> Result<Self, ValidationError> {
        let tag = tag.trim();
        match tag.chars().count() {
            x if x < 1 => Err(ValidationError::new(
                "Project cannot be empty".to_string(),
            )),
            x if x > 255 => Err(ValidationError::new(
                "Max project length is 255 characters".to_string(),
            )),
            _ => Ok(Self(tag.to_owned())),
        }
    }
}

impl AsRef<String> for ProjectTag {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

impl fmt::Display for ProjectTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[test]
fn test_project_tags_are_trimmed() {
    let parsed = ProjectTag::parse("  Slava 4 ").unwrap();
    assert_eq!(parsed.as_ref(), "Slava 4");
}

#[test]
fn test_invalid_project_tags() {
    assert_eq!(
        ProjectTag::parse(" ").unwrap_err().as_ref(),
        "Project cannot be empty"
    );
    assert_eq!(
        ProjectTag::parse(&"p".repeat(256)).unwrap_err().as_ref(),
        "Max project length is 255 characters"
    );
}
