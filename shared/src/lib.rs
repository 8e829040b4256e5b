use serde::{Deserialize, Deserializer, Serialize};

/// Read a JSON `null` as an empty string so a null name reaches validation
/// the same way a missing one does
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A contact as it appears on the wire.
///
/// Field order is the serialized order. `hobbies` and `pets` are only present
/// when the store runs with child collections enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// ISO 8601 calendar date (YYYY-MM-DD)
    pub birthday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hobbies: Option<Vec<ChildDto>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pets: Option<Vec<ChildDto>>,
}

/// A hobby or pet owned by a contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildDto {
    pub id: i64,
    pub name: String,
}

/// JSON body for creating or updating a contact.
///
/// Nothing here is validated. A missing required name comes through as an
/// empty string and a missing optional field as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRequest {
    /// Only read by the body-addressed update endpoint
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub last_name: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<String>,
    pub hobbies: Option<Vec<NewChildRequest>>,
    pub pets: Option<Vec<NewChildRequest>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewChildRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
}

/// Form-encoded body posted by the browser pages. Scalar fields only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<String>,
}
