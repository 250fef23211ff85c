use crate::{HospitalCreate, HospitalUpdate, ValidationError};
use tracing::{debug, warn};

pub struct Validator;

impl Validator {
    /// Validate a creation request
    /// Returns Ok(()) if valid, Err(ValidationError) if invalid
    pub fn validate_create(candidate: &HospitalCreate) -> Result<(), ValidationError> {
        debug!("Validating hospital submission {:?}", candidate.name);

        Self::require_text("name", &candidate.name)?;
        Self::require_text("address", &candidate.address)?;

        Ok(())
    }

    /// Validate the fields supplied in a partial update
    ///
    /// Absent fields are not checked; they keep their stored value. Name and
    /// address may not be cleared with an explicit null.
    pub fn validate_update(update: &HospitalUpdate) -> Result<(), ValidationError> {
        Self::require_supplied_text("name", &update.name)?;
        Self::require_supplied_text("address", &update.address)?;

        Ok(())
    }

    fn require_supplied_text(
        field: &'static str,
        value: &Option<Option<String>>,
    ) -> Result<(), ValidationError> {
        match value {
            None => Ok(()),
            Some(None) => {
                warn!("Rejected null {}", field);
                Err(ValidationError::NullField { field })
            }
            Some(Some(text)) => Self::require_text(field, text),
        }
    }

    fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            warn!("Rejected blank {}", field);
            return Err(ValidationError::BlankField { field });
        }
        Ok(())
    }
}
