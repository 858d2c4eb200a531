use super::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampName(String);

impl CampName {
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        match name.chars().count() {
            x if x < 1 => Err(ValidationError::new(
                "Camp name cannot be empty".to_string(),
            )),
            x if x > 255 => Err(ValidationError::new(
                "Max name length is 255 characters".to_string(),
            )),
            _ => Ok(Self(name.to_owned())),
        }
    }
}

impl AsRef<String> for CampName {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

#[test]
fn test_valid_camp_names() {
    let valid_names = ["a".to_string(), "a".repeat(255)];
    for valid_name in valid_names.iter() {
        let parsed = CampName::parse(valid_name)
            .expect("Failed to parse valid camp name");

        assert_eq!(parsed.as_ref(), valid_name);
    }
}

#[test]
fn test_short_camp_names() {
    for short_name in ["", "   "] {
        let result = CampName::parse(short_name);
        assert_eq!(
            result.unwrap_err().as_ref(),
            "Camp name cannot be empty"
        );
    }
}

#[test]
fn test_long_camp_names() {
    let long_name = "a".repeat(256);
    let result = CampName::parse(&long_name);
    assert_eq!(
        result.unwrap_err().as_ref(),
        "Max name length is 255 characters"
    );
}
