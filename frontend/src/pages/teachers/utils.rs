use crate::api::{Teacher, TeacherPayload};
use std::collections::BTreeMap;

pub const NAME_MAX_CHARS: usize = 100;
pub const PHONE_MIN_DIGITS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Email,
    Phone,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
        }
    }
}

pub type ValidationErrors = BTreeMap<FormField, String>;

/// Create/edit form for a single teacher. `editing_id` is set in edit mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeacherFormState {
    pub editing_id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub errors: ValidationErrors,
}

impl TeacherFormState {
    pub fn for_edit(teacher: &Teacher) -> Self {
        Self {
            editing_id: Some(teacher.id.clone()),
            name: teacher.name.clone(),
            email: teacher.email.clone(),
            phone: teacher.phone.clone().unwrap_or_default(),
            errors: ValidationErrors::new(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit teacher"
        } else {
            "Add teacher"
        }
    }

    /// Editing a field clears that field's error.
    pub fn set_field(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Phone => self.phone = value,
        }
        self.errors.remove(&field);
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
        }
    }

    pub fn error_for(&self, field: FormField) -> Option<String> {
        self.errors.get(&field).cloned()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> Result<TeacherPayload, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = self.name.trim();
        let email = self.email.trim();
        let phone = self.phone.trim();

        if let Some(message) = name_error(name) {
            errors.insert(FormField::Name, message);
        }
        if let Some(message) = email_error(email) {
            errors.insert(FormField::Email, message);
        }
        if let Some(message) = phone_error(phone) {
            errors.insert(FormField::Phone, message);
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(TeacherPayload {
            name: name.to_string(),
            email: email.to_string(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
        })
    }
}

fn name_error(name: &str) -> Option<String> {
    if name.is_empty() {
        Some("Name is required".into())
    } else if name.chars().count() > NAME_MAX_CHARS {
        Some(format!("Name must be at most {} characters", NAME_MAX_CHARS))
    } else {
        None
    }
}

pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

fn email_error(email: &str) -> Option<String> {
    if email.is_empty() {
        Some("Email is required".into())
    } else if !is_valid_email(email) {
        Some("Enter a valid email address".into())
    } else {
        None
    }
}

pub fn is_valid_phone(phone: &str) -> bool {
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));
    allowed && phone.chars().filter(char::is_ascii_digit).count() >= PHONE_MIN_DIGITS
}

fn phone_error(phone: &str) -> Option<String> {
    if phone.is_empty() || is_valid_phone(phone) {
        None
    } else {
        Some("Enter a valid phone number".into())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageState {
    pub success: Option<String>,
    pub error: Option<String>,
}

impl MessageState {
    pub fn clear(&mut self) {
        self.success = None;
        self.error = None;
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
        self.error = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.success = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::teacher;

    fn filled(name: &str, email: &str, phone: &str) -> TeacherFormState {
        TeacherFormState {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            ..TeacherFormState::default()
        }
    }

    #[test]
    fn valid_form_produces_trimmed_payload() {
        let payload = filled("  Ada Lovelace ", " ada@example.com", "").validate().unwrap();
        assert_eq!(payload.name, "Ada Lovelace");
        assert_eq!(payload.email, "ada@example.com");
        assert_eq!(payload.phone, None);

        let payload = filled("Ada", "ada@example.com", "+44 (20) 7946-0018")
            .validate()
            .unwrap();
        assert_eq!(payload.phone.as_deref(), Some("+44 (20) 7946-0018"));
    }

    #[test]
    fn empty_form_reports_required_fields() {
        let errors = TeacherFormState::default().validate().unwrap_err();
        assert_eq!(errors.get(&FormField::Name).map(String::as_str), Some("Name is required"));
        assert_eq!(errors.get(&FormField::Email).map(String::as_str), Some("Email is required"));
        assert!(!errors.contains_key(&FormField::Phone));
    }

    #[test]
    fn name_length_is_capped() {
        let long = "x".repeat(NAME_MAX_CHARS + 1);
        let errors = filled(&long, "a@b.co", "").validate().unwrap_err();
        assert!(errors.contains_key(&FormField::Name));
        assert!(filled(&"é".repeat(NAME_MAX_CHARS), "a@b.co", "").validate().is_ok());
    }

    #[test]
    fn email_shape_rules() {
        for good in ["a@b.co", "first.last@school.example.org"] {
            assert!(is_valid_email(good), "{}", good);
        }
        let invalid = [
            "plain", "@b.co", "a@b", "a@.b.co", "a@b.co.", "a@@b.co", "a@b@c.co", "a b@c.co",
        ];
        for bad in invalid {
            assert!(!is_valid_email(bad), "{}", bad);
        }
    }

    #[test]
    fn phone_shape_rules() {
        assert!(is_valid_phone("555-0101"));
        assert!(is_valid_phone("+1 (555) 010-0101"));
        assert!(!is_valid_phone("555-01"));
        assert!(!is_valid_phone("555-0101 ext 2"));
        let errors = filled("Ada", "ada@example.com", "call me").validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key(&FormField::Phone));
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut state = TeacherFormState::default();
        state.errors = state.validate().unwrap_err();
        state.set_field(FormField::Name, "Ada".into());
        assert!(state.error_for(FormField::Name).is_none());
        assert!(state.error_for(FormField::Email).is_some());
    }

    #[test]
    fn edit_mode_prefills_from_teacher() {
        let existing = teacher("t1", "Ada", "ada@example.com", Some("555-0101"));
        let state = TeacherFormState::for_edit(&existing);
        assert!(state.is_edit());
        assert_eq!(state.title(), "Edit teacher");
        assert_eq!(state.value(FormField::Phone), "555-0101");

        let mut state = state;
        state.reset();
        assert!(!state.is_edit());
        assert_eq!(state.title(), "Add teacher");
    }

    #[test]
    fn message_state_resets_flags() {
        let mut state = MessageState::default();
        state.set_error("failed");
        assert!(state.error.is_some());
        assert!(state.success.is_none());

        state.set_success("saved");
        assert!(state.success.is_some());
        assert!(state.error.is_none());

        state.clear();
        assert_eq!(state, MessageState::default());
    }
}
