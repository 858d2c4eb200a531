use std::collections::BTreeSet;

use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{CampId, CampName, Email, ValidationError};

const CAMP_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const CAMP_CODE_LENGTH: usize = 6;

lazy_static! {
    static ref CAMP_CODE_PATTERN: Regex =
        Regex::new(r"^[A-Z0-9]{6}$").expect("camp code pattern is valid");
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camp {
    pub id: CampId,
    pub name: CampName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "ownerEmail")]
    pub owner_email: Email,
    #[serde(rename = "sharedWith", default)]
    pub shared_with: BTreeSet<Email>,
    pub code: CampCode,
}

impl Camp {
    pub fn new(
        name: CampName,
        description: Option<String>,
        owner_email: Email,
        code: CampCode,
    ) -> Self {
        Self {
            id: CampId::default(),
            name,
            description: normalise_description(description),
            owner_email,
            shared_with: BTreeSet::new(),
            code,
        }
    }

    pub fn is_owned_by(&self, email: &Email) -> bool {
        &self.owner_email == email
    }

    /// True for the owner and for every member the camp was shared with.
    pub fn is_accessible_by(&self, email: &Email) -> bool {
        self.is_owned_by(email) || self.shared_with.contains(email)
    }

    /// Returns `false` when the address already had access.
    pub fn share_with(&mut self, email: Email) -> bool {
        if self.is_owned_by(&email) {
            return false;
        }
        self.shared_with.insert(email)
    }

    pub fn rename(&mut self, name: CampName, description: Option<String>) {
        self.name = name;
        self.description = normalise_description(description);
    }
}

fn normalise_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_owned())
        .filter(|d| !d.is_empty())
}

/// Short code other users enter to join a camp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CampCode(String);

impl CampCode {
    pub fn parse(code: &str) -> Result<Self, ValidationError> {
        let code = code.trim().to_uppercase();
        if !CAMP_CODE_PATTERN.is_match(&code) {
            return Err(ValidationError::new(format!(
                "Camp code must be {CAMP_CODE_LENGTH} letters or digits"
            )));
        }
        Ok(Self(code))
    }

    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let code = (0..CAMP_CODE_LENGTH)
            .map(|_| {
                let idx = rng.gen_range(0..CAMP_CODE_ALPHABET.len());
                CAMP_CODE_ALPHABET[idx] as char
            })
            .collect();
        Self(code)
    }
}

impl AsRef<String> for CampCode {
    fn as_ref(&self) -> &String {
        &self.0
    }
}
