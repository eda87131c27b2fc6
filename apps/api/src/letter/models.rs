use serde::{Deserialize, Serialize};

/// The six free-text fields a candidate fills in for one generation attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateInput {
    pub personal_details: String,
    pub current_status: String,
    pub education: String,
    pub experience: String,
    pub skills: String,
    pub job_description: String,
}

impl CandidateInput {
    /// Fields in form order, paired with their wire names.
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("personal_details", self.personal_details.as_str()),
            ("current_status", self.current_status.as_str()),
            ("education", self.education.as_str()),
            ("experience", self.experience.as_str()),
            ("skills", self.skills.as_str()),
            ("job_description", self.job_description.as_str()),
        ]
    }

    /// Names of required fields that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    pub fn apply(&mut self, update: DraftUpdate) {
        let DraftUpdate {
            personal_details,
            current_status,
            education,
            experience,
            skills,
            job_description,
        } = update;

        if let Some(v) = personal_details {
            self.personal_details = v;
        }
        if let Some(v) = current_status {
            self.current_status = v;
        }
        if let Some(v) = education {
            self.education = v;
        }
        if let Some(v) = experience {
            self.experience = v;
        }
        if let Some(v) = skills {
            self.skills = v;
        }
        if let Some(v) = job_description {
            self.job_description = v;
        }
    }
}

/// Partial edit of the form draft. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftUpdate {
    pub personal_details: Option<String>,
    pub current_status: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub skills: Option<String>,
    pub job_description: Option<String>,
}

/// Describes one input of the candidate form for clients rendering it.
#[derive(Debug, Clone, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub rows: u8,
    pub required: bool,
}

pub const FORM_FIELDS: [FormField; 6] = [
    FormField {
        name: "personal_details",
        label: "1. Header & Contact Info",
        placeholder: "Full Name, Phone, Email, LinkedIn, Portfolio Link...",
        rows: 3,
        required: true,
    },
    FormField {
        name: "current_status",
        label: "2. Current Professional Status",
        placeholder: "e.g., Final-year CS student at Stanford, Senior Product Manager with 10 years experience...",
        rows: 3,
        required: true,
    },
    FormField {
        name: "education",
        label: "3. Education",
        placeholder: "Degrees, Certifications, Relevant coursework...",
        rows: 3,
        required: true,
    },
    FormField {
        name: "experience",
        label: "4. Relevant Experience",
        placeholder: "Key roles, major accomplishments, and quantitative results...",
        rows: 5,
        required: true,
    },
    FormField {
        name: "skills",
        label: "5. Core Skills",
        placeholder: "Technical skills, soft skills, tools, and methodologies...",
        rows: 3,
        required: true,
    },
    FormField {
        name: "job_description",
        label: "6. Targeted Job Description",
        placeholder: "Paste the job title and description here to tailor the letter...",
        rows: 5,
        required: true,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> CandidateInput {
        CandidateInput {
            personal_details: "Jane Doe, jane@x.com".to_string(),
            current_status: "Senior Engineer".to_string(),
            education: "BS CS".to_string(),
            experience: "5 yrs backend".to_string(),
            skills: "Go, distributed systems".to_string(),
            job_description: "Staff Engineer, platform team".to_string(),
        }
    }

    #[test]
    fn test_complete_input_has_no_missing_fields() {
        assert!(complete().missing_fields().is_empty());
    }

    #[test]
    fn test_empty_fields_are_reported_in_form_order() {
        let input = CandidateInput {
            education: String::new(),
            job_description: String::new(),
            ..complete()
        };
        assert_eq!(input.missing_fields(), vec!["education", "job_description"]);
    }

    #[test]
    fn test_whitespace_counts_as_present() {
        let input = CandidateInput {
            skills: "  ".to_string(),
            ..complete()
        };
        assert!(input.missing_fields().is_empty());
    }

    #[test]
    fn test_apply_only_touches_supplied_fields() {
        let mut draft = complete();
        draft.apply(DraftUpdate {
            skills: Some("Rust".to_string()),
            ..Default::default()
        });
        assert_eq!(draft.skills, "Rust");
        assert_eq!(draft.education, "BS CS");
    }

    #[test]
    fn test_form_fields_match_input_field_names() {
        let names: Vec<_> = complete().fields().iter().map(|(n, _)| *n).collect();
        let form: Vec<_> = FORM_FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(names, form);
        assert!(FORM_FIELDS.iter().all(|f| f.required));
    }

    #[test]
    fn test_draft_update_accepts_partial_json() {
        let update: DraftUpdate =
            serde_json::from_value(serde_json::json!({ "experience": "10 yrs" })).unwrap();
        assert_eq!(update.experience.as_deref(), Some("10 yrs"));
        assert!(update.skills.is_none());
    }
}
