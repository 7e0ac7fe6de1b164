//! Daily-log field definitions: machine-name derivation and input validation.

/// Minimum length (in characters) of a field label and of its placeholder.
pub const MIN_FIELD_TEXT_LEN: usize = 2;

/// Derive the machine key of a field from its display label.
///
/// Lowercase, whitespace runs become a hyphen, everything outside `[a-z0-9-]`
/// is stripped, then hyphen-separated words are joined in camelCase.
/// Leading, trailing and repeated hyphens never survive, so the result only
/// contains ASCII letters and digits and never starts with an uppercase letter.
///
/// `"LinkedIn Connections"` → `"linkedinConnections"`, `"Follow-ups"` → `"followUps"`.
pub fn derive_field_name(label: &str) -> String {
    let lowered = label.to_lowercase();

    let mut kebab = String::with_capacity(lowered.len());
    let mut in_whitespace = false;
    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                kebab.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            kebab.push(c);
        }
    }

    let mut name = String::with_capacity(kebab.len());
    let mut upper_next = false;
    for c in kebab.chars() {
        if c == '-' {
            upper_next = !name.is_empty();
            continue;
        }
        if upper_next {
            name.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            name.push(c);
        }
    }
    name
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldInputError {
    #[error("label must be at least {MIN_FIELD_TEXT_LEN} characters")]
    LabelTooShort,
    #[error("placeholder must be at least {MIN_FIELD_TEXT_LEN} characters")]
    PlaceholderTooShort,
    #[error("label does not produce a usable field name")]
    EmptyName,
}

/// A validated field definition request, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInput {
    pub name: String,
    pub label: String,
    pub placeholder: String,
}

impl FieldInput {
    /// Trim and validate an admin-supplied label/placeholder pair and derive its name.
    pub fn parse(label: &str, placeholder: &str) -> Result<Self, FieldInputError> {
        let label = label.trim();
        let placeholder = placeholder.trim();
        if label.chars().count() < MIN_FIELD_TEXT_LEN {
            return Err(FieldInputError::LabelTooShort);
        }
        if placeholder.chars().count() < MIN_FIELD_TEXT_LEN {
            return Err(FieldInputError::PlaceholderTooShort);
        }
        let name = derive_field_name(label);
        if name.is_empty() {
            return Err(FieldInputError::EmptyName);
        }
        Ok(Self {
            name,
            label: label.to_owned(),
            placeholder: placeholder.to_owned(),
        })
    }
}
