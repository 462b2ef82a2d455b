// Contact form model and validation. Delivery is out of scope: a valid
// form is acknowledged and reset by the UI.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

pub const MESSAGE_MAX_CHARS: usize = 1000;

/// Service types offered in the form, `(value, label)`
pub const SERVICE_TYPES: &[(&str, &str)] = &[
    ("web", "Web Development"),
    ("ai", "AI Integration"),
    ("mobile", "Mobile Development"),
    ("consulting", "Technical Consulting"),
    ("other", "Other"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    ServiceType,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::ServiceType,
        Field::Subject,
        Field::Message,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::ServiceType => "Service",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Raw form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub service_type: String,
    pub subject: String,
    pub message: String,
}

/// A form that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub service_type: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::ServiceType => &mut self.service_type,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::ServiceType => &self.service_type,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    /// Step the service type through [`SERVICE_TYPES`]
    pub fn cycle_service_type(&mut self) {
        let next = SERVICE_TYPES
            .iter()
            .position(|(value, _)| *value == self.service_type)
            .map_or(0, |i| (i + 1) % SERVICE_TYPES.len());
        self.service_type = SERVICE_TYPES[next].0.to_string();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> Result<ContactMessage, Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut fail = |field, message| errors.push(FieldError { field, message });

        if self.name.trim().chars().count() < 2 {
            fail(Field::Name, "Name must be at least 2 characters.");
        }
        if !EMAIL.is_match(self.email.trim()) {
            fail(Field::Email, "Please enter a valid email address.");
        }
        if !SERVICE_TYPES.iter().any(|(value, _)| *value == self.service_type) {
            fail(Field::ServiceType, "Please select a service type.");
        }
        if self.subject.trim().chars().count() < 5 {
            fail(Field::Subject, "Subject must be at least 5 characters.");
        }
        let message_len = self.message.trim().chars().count();
        if message_len < 10 {
            fail(Field::Message, "Message must be at least 10 characters.");
        } else if message_len > MESSAGE_MAX_CHARS {
            fail(Field::Message, "Message must be less than 1000 characters.");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ContactMessage {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            service_type: self.service_type.clone(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ContactForm {
        ContactForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            service_type: "web".into(),
            subject: "New site".into(),
            message: "I would like a portfolio site.".into(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let message = valid().validate().unwrap();
        assert_eq!(message.email, "ada@example.com");
    }

    #[test]
    fn test_each_rule_reports_its_field() {
        let form = ContactForm {
            name: "A".into(),
            email: "not-an-email".into(),
            service_type: String::new(),
            subject: "Hi".into(),
            message: "short".into(),
        };
        let fields: Vec<Field> = form.validate().unwrap_err().iter().map(|e| e.field).collect();
        assert_eq!(fields, Field::ALL.to_vec());
    }

    #[test]
    fn test_message_upper_bound() {
        let mut form = valid();
        form.message = "x".repeat(MESSAGE_MAX_CHARS + 1);
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, Field::Message);
    }

    #[test]
    fn test_cycle_service_type_wraps() {
        let mut form = ContactForm::default();
        form.cycle_service_type();
        assert_eq!(form.service_type, "web");
        form.service_type = "other".into();
        form.cycle_service_type();
        assert_eq!(form.service_type, "web");
    }
}
