use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::utils::errors::StoreError;

pub const NAME_REQUIRED: &str = "Name required";

/// A persisted adoption listing, as returned to clients.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Candidate attributes for a pet that does not exist yet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewPet {
    pub name: String,
    pub breed: Option<String>,
    pub age: Option<String>,
    pub category: Option<String>,
    pub gender: Option<String>,
    pub image: Option<String>,
}

/// Body of `POST /api/pets`.
#[derive(Deserialize, Debug, Default)]
pub struct CreatePetRequest {
    #[serde(default, deserialize_with = "name_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub breed: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub image: Option<String>,
}

impl NewPet {
    pub fn new(name: impl Into<String>) -> Self {
        NewPet {
            name: name.into(),
            ..NewPet::default()
        }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.name.is_empty() {
            return Err(StoreError::Validation(NAME_REQUIRED.to_string()));
        }
        Ok(())
    }
}

impl TryFrom<CreatePetRequest> for NewPet {
    type Error = StoreError;

    fn try_from(request: CreatePetRequest) -> Result<Self, Self::Error> {
        let pet = NewPet {
            name: request.name.unwrap_or_default(),
            breed: request.breed,
            age: request.age,
            category: request.category,
            gender: request.gender,
            image: request.image,
        };
        pet.validate()?;
        Ok(pet)
    }
}

/// Truncates to whole milliseconds, the resolution the database keeps.
pub fn storage_timestamp(now: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

// A falsy name (`0`, `false`, `""`) counts as missing, like an absent one.
fn name_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(false) => Ok(None),
        Value::Number(number) if number.as_f64() == Some(0.0) => Ok(None),
        Value::String(text) if text.is_empty() => Ok(None),
        other => text_from(other).map_err(<D::Error as serde::de::Error>::custom),
    }
}

// Strings pass through, numbers and booleans become their text form, null is absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    text_from(Value::deserialize(deserializer)?).map_err(<D::Error as serde::de::Error>::custom)
}

fn text_from(value: Value) -> Result<Option<String>, &'static str> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        Value::Array(_) => Err("expected text, found an array"),
        Value::Object(_) => Err("expected text, found an object"),
    }
}
