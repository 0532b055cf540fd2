// File: src/fields.rs
// Purpose: Fixed rule sets for the three contact form fields

/// Format check applied after the required and length rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    Email,
}

/// Validation rules for a single form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Element id of the input, also the key in `FieldValues`
    pub id: &'static str,
    /// Capitalised name used in length messages
    pub label: &'static str,
    /// `None` means the field may be left empty
    pub required_message: Option<&'static str>,
    pub min_length: Option<usize>,
    pub format: Option<FieldFormat>,
}

impl FieldSpec {
    pub const NAME: FieldSpec = FieldSpec {
        id: "name",
        label: "Name",
        required_message: Some("Please enter your name"),
        min_length: Some(2),
        format: None,
    };

    pub const EMAIL: FieldSpec = FieldSpec {
        id: "email",
        label: "Email",
        required_message: Some("Please enter your email address"),
        min_length: None,
        format: Some(FieldFormat::Email),
    };

    pub const MESSAGE: FieldSpec = FieldSpec {
        id: "message",
        label: "Message",
        required_message: Some("Please enter a message"),
        min_length: Some(10),
        format: None,
    };

    /// The contact form's fields, in display order
    pub fn contact_fields() -> [FieldSpec; 3] {
        [Self::NAME, Self::EMAIL, Self::MESSAGE]
    }

    pub fn is_required(&self) -> bool {
        self.required_message.is_some()
    }

    pub(crate) fn min_length_message(&self, min: usize) -> String {
        format!("{} must be at least {} characters long", self.label, min)
    }
}

impl FieldFormat {
    pub(crate) fn message(&self) -> &'static str {
        match self {
            FieldFormat::Email => "Please enter a valid email address",
        }
    }
}
