use std::borrow::Cow;

use validator::{ValidationErrors, ValidationErrorsKind};

use super::app_error::ValidationIssue;

/// Struct-level checks are reported by validator under this key.
const STRUCT_LEVEL_KEY: &str = "__all__";

/// Flattens nested validator errors into issues sorted by field path, then
/// by code.
pub(super) fn validation_issues(errors: &ValidationErrors) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    collect(None, errors, &mut issues);
    issues.sort_by(|left, right| {
        left.field
            .cmp(&right.field)
            .then_with(|| left.code.cmp(&right.code))
    });
    issues
}

fn collect(prefix: Option<&str>, errors: &ValidationErrors, out: &mut Vec<ValidationIssue>) {
    for (field, kind) in errors.errors() {
        let field: &str = if *field == STRUCT_LEVEL_KEY { "request" } else { field };
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|error| ValidationIssue {
                    field: path.clone(),
                    message: error
                        .message
                        .as_ref()
                        .map(Cow::to_string)
                        .unwrap_or_else(|| format!("{path} is invalid")),
                    code: error.code.to_string(),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect(Some(&path), nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(Some(&format!("{path}[{index}]")), nested, out);
                }
            }
        }
    }
}
