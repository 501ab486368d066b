use serde::Deserialize;

use crate::validate::is_valid_email;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

impl ContactRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() || self.message.trim().is_empty() {
            return Err("Name and message are required".into());
        }
        if !is_valid_email(self.email.trim()) {
            return Err("A valid email is required".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_complete_form() {
        let req = ContactRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: None,
            message: "Hello".into(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn rejects_blank_message() {
        let req = ContactRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: None,
            message: "  ".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_invalid_email() {
        let req = ContactRequest {
            name: "Ada".into(),
            email: "nope".into(),
            subject: None,
            message: "Hello".into(),
        };
        assert!(req.validate().is_err());
    }
}
