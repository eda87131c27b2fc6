// Prompt text for cover letter generation.
// Candidate values are interpolated with `format!`, never with placeholder
// replacement, so braces inside user text reach the model untouched.

use crate::letter::models::CandidateInput;

pub const PERSONA: &str = "You are an expert Career Coach and Senior Recruiter. \
    You excel at taking raw data about a candidate's background and weaving it into a \
    compelling, cohesive narrative that fits a specific job opening.";

pub const INSTRUCTIONS: &str = "\
1. Start the letter by contextualizing who they are based on Current Status.
2. Connect the dots: Use Skills and Experience to prove they can handle the responsibilities listed in the Job Description.
3. Format correctly: Use Personal Details for the header and contact info.
4. Tone: Confident, professional, and non-robotic.
5. Layout: Standard business cover letter with Header, Salutation, Opening, Body, and Closing (Call to Action).";

/// Builds the single instruction string sent to the model. Pure and infallible;
/// field values are embedded verbatim even when empty.
pub fn build_cover_letter_prompt(input: &CandidateInput) -> String {
    format!(
        "Persona:\n\
         {PERSONA}\n\
         \n\
         Task:\n\
         Write a professional cover letter by synthesizing the data from the following input slots:\n\
         - Personal Details: {personal_details}\n\
         - Current Status: {current_status}\n\
         - Education: {education}\n\
         - Experience: {experience}\n\
         - Skills: {skills}\n\
         - Job Description: {job_description}\n\
         \n\
         Tailor this narrative specifically to fit the requirements found in the Job Description.\n\
         \n\
         Instructions:\n\
         {INSTRUCTIONS}\n",
        personal_details = input.personal_details,
        current_status = input.current_status,
        education = input.education,
        experience = input.experience,
        skills = input.skills,
        job_description = input.job_description,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> CandidateInput {
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
    fn test_prompt_contains_every_field_in_form_order() {
        let input = jane();
        let prompt = build_cover_letter_prompt(&input);

        let mut cursor = 0;
        for (name, value) in input.fields() {
            let offset = prompt[cursor..]
                .find(value)
                .unwrap_or_else(|| panic!("{name} missing or out of order"));
            cursor += offset + value.len();
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let input = jane();
        assert_eq!(
            build_cover_letter_prompt(&input),
            build_cover_letter_prompt(&input)
        );
    }

    #[test]
    fn test_prompt_sets_persona_tailoring_and_structure() {
        let prompt = build_cover_letter_prompt(&jane());
        assert!(prompt.contains("Career Coach and Senior Recruiter"));
        assert!(prompt.contains("Tailor this narrative specifically"));
        for section in ["Header", "Salutation", "Opening", "Body", "Call to Action"] {
            assert!(prompt.contains(section), "structure missing {section}");
        }
    }

    #[test]
    fn test_values_are_embedded_verbatim() {
        let input = CandidateInput {
            skills: "{job_description} <b>Rust</b> & \"C++\"".to_string(),
            ..jane()
        };
        let prompt = build_cover_letter_prompt(&input);
        assert!(prompt.contains("- Skills: {job_description} <b>Rust</b> & \"C++\"\n"));
    }

    #[test]
    fn test_empty_input_still_builds() {
        let prompt = build_cover_letter_prompt(&CandidateInput::default());
        assert!(prompt.contains("- Education: \n"));
    }
}
