//! Required-field checks applied by the host before a submit reaches the form
//!
//! These mirror what a browser enforces through `required` and `pattern`
//! attributes: the form itself never rejects a submit.

use shared::errors::ServiceError;
use validator::Validate;

use crate::form::TicketForm;

#[derive(Debug, Validate)]
pub struct SurfaceCheck {
    #[validate(length(min = 1))]
    full_name: String,
    #[validate(length(equal = 7))]
    phone_local_number: String,
    #[validate(length(equal = 6))]
    payment_reference: String,
}

impl From<&TicketForm> for SurfaceCheck {
    fn from(form: &TicketForm) -> Self {
        Self {
            full_name: form.full_name().as_str().to_string(),
            phone_local_number: form.phone_local_number().as_str().to_string(),
            payment_reference: form.payment_reference().as_str().to_string(),
        }
    }
}

/// One error per rejected field, in form order
pub fn check(form: &TicketForm) -> Result<(), Vec<ServiceError>> {
    let fields = SurfaceCheck::from(form);
    let errors = match fields.validate() {
        Ok(()) => return Ok(()),
        Err(errors) => errors,
    };

    let rejected = errors.field_errors();
    let mut reported = Vec::new();
    if rejected.contains_key("full_name") {
        reported.push(ServiceError::missing_full_name());
    }
    if rejected.contains_key("phone_local_number") {
        reported.push(ServiceError::invalid_phone(fields.phone_local_number.len()));
    }
    if rejected.contains_key("payment_reference") {
        reported.push(ServiceError::invalid_reference(fields.payment_reference.len()));
    }

    Err(reported)
}
