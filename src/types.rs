use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Hospital record as stored in the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: u64,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub creation_batch_id: Option<Uuid>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Candidate record submitted for creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HospitalCreate {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub creation_batch_id: Option<Uuid>,
}

impl HospitalCreate {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phone: None,
            creation_batch_id: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn in_batch(mut self, batch_id: Uuid) -> Self {
        self.creation_batch_id = Some(batch_id);
        self
    }
}

/// Partial update: only the fields that were supplied are applied.
///
/// Every field is doubly optional so that a missing key (`None`) can be told
/// apart from an explicit `null` (`Some(None)`). A `null` phone clears it; a
/// `null` name or address is rejected by validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HospitalUpdate {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub phone: Option<Option<String>>,
}

impl HospitalUpdate {
    /// Apply the supplied fields onto `hospital`.
    ///
    /// Never touches `id`, `creation_batch_id`, `active` or `created_at`.
    pub fn apply_to(self, hospital: &mut Hospital) {
        if let Some(Some(name)) = self.name {
            hospital.name = name;
        }
        if let Some(Some(address)) = self.address {
            hospital.address = address;
        }
        if let Some(phone) = self.phone {
            hospital.phone = phone;
        }
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Result of a bulk batch deletion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchDeleted {
    pub deleted_count: usize,
    pub message: String,
}

/// Result of a bulk batch activation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchActivated {
    pub activated_count: usize,
    pub message: String,
}

/// Validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    BlankField { field: &'static str },
    NullField { field: &'static str },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::BlankField { field } => {
                write!(f, "{}: field cannot be empty or whitespace only", field)
            }
            ValidationError::NullField { field } => {
                write!(f, "{}: field cannot be null", field)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
