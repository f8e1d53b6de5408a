//! Glue between `validator` derives on request DTOs and [`CoreError`].

use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;

/// Custom `validator` rule: the string must contain a non-whitespace char.
///
/// ```ignore
/// #[validate(custom(function = "tracker_core::validation::non_blank", message = "Title is required"))]
/// pub title: String,
/// ```
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Run the derived validations on `input`, mapping failures to
/// [`CoreError::Validation`].
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(describe(&errors)))
}

/// Flatten field errors into one human-readable message, ordered by field
/// name so the output is stable.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .map(|(field, errs)| {
            errs.iter()
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| format!("{field} is invalid"))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Form {
        #[validate(custom(function = "non_blank", message = "Title is required"))]
        title: String,
        #[validate(email(message = "Email is invalid"))]
        email: String,
    }

    #[test]
    fn valid_form_passes() {
        let form = Form {
            title: "Launch".into(),
            email: "a@x.com".into(),
        };
        assert!(validate_input(&form).is_ok());
    }

    #[test]
    fn blank_title_reports_message() {
        let form = Form {
            title: "   ".into(),
            email: "a@x.com".into(),
        };
        let err = validate_input(&form).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref msg) if msg == "Title is required"));
    }

    #[test]
    fn multiple_failures_are_joined_in_field_order() {
        let form = Form {
            title: String::new(),
            email: "not-an-email".into(),
        };
        let err = validate_input(&form).unwrap_err();
        assert!(
            matches!(err, CoreError::Validation(ref msg) if msg == "Email is invalid; Title is required")
        );
    }
}
