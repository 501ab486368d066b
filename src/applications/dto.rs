use serde::Deserialize;

use crate::validate::is_valid_email;

#[derive(Debug, Deserialize)]
pub struct InternshipRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub university: Option<String>,
    pub course_of_study: Option<String>,
    pub cover_letter: String,
}

#[derive(Debug, Deserialize)]
pub struct PitchDeckRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub startup_name: String,
    pub summary: String,
    /// Object key returned by a prior upload, if a deck was attached.
    pub deck_key: Option<String>,
}

impl InternshipRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.full_name.trim().is_empty()
            || self.phone.trim().is_empty()
            || self.cover_letter.trim().is_empty()
        {
            return Err("Full name, phone and cover letter are required".into());
        }
        if !is_valid_email(self.email.trim()) {
            return Err("A valid email is required".into());
        }
        Ok(())
    }
}

impl PitchDeckRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.full_name.trim().is_empty()
            || self.phone.trim().is_empty()
            || self.startup_name.trim().is_empty()
            || self.summary.trim().is_empty()
        {
            return Err("Full name, phone, startup name and summary are required".into());
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

    fn internship() -> InternshipRequest {
        InternshipRequest {
            full_name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "+2348000000000".into(),
            university: Some("University of Lagos".into()),
            course_of_study: None,
            cover_letter: "I would like to intern with you.".into(),
        }
    }

    #[test]
    fn internship_accepts_complete_form() {
        assert!(internship().validate().is_ok());
    }

    #[test]
    fn internship_rejects_bad_email() {
        let mut req = internship();
        req.email = "not-an-email".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn internship_rejects_blank_cover_letter() {
        let mut req = internship();
        req.cover_letter = "   ".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn pitch_deck_requires_startup_name() {
        let req = PitchDeckRequest {
            full_name: "Bob".into(),
            email: "bob@example.com".into(),
            phone: "0800".into(),
            startup_name: String::new(),
            summary: "We sell things.".into(),
            deck_key: None,
        };
        assert!(req.validate().is_err());
    }
}
