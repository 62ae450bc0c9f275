//! Prompt templates for the three generation roles.
//!
//! Building a prompt is a pure templating step: `{job_title}` and
//! `{skills_text}` are embedded verbatim. Inputs are recruiter-authored form
//! fields, so no sanitization is applied before substitution.

use serde::Deserialize;

/// What kind of content a trigger asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Description,
    Responsibilities,
    Questions,
}

/// Job-description prompt — requests Markdown with four named sections.
const DESCRIPTION_PROMPT_TEMPLATE: &str = r#"You are an expert recruiter. Write a compelling and professional job description for the role of '{job_title}'.

Key responsibilities and skills: '{skills_text}'

The description should be:
- Engaging and professional
- Clearly outline the role and expectations
- Include qualifications and requirements
- Mention what the company offers
- Be structured and easy to read

Format the response in Markdown with clear headings like:
- Role Overview
- Key Responsibilities
- Qualifications & Requirements
- What We Offer

Keep it concise but comprehensive."#;

/// Responsibilities prompt — requests 8-12 action-verb-led bullets.
const RESPONSIBILITIES_PROMPT_TEMPLATE: &str = r#"You are an expert recruiter and job analyst. Generate a comprehensive list of key responsibilities for the role of '{job_title}'.

Based on the skills and requirements: '{skills_text}'

Create 8-12 specific, actionable responsibilities that:
- Are clearly defined and measurable
- Align with the role level and industry standards
- Cover both daily tasks and strategic objectives
- Include collaboration and communication aspects
- Are realistic and achievable

Format the response as a Markdown bulleted list with brief explanations for each responsibility.

Make sure each responsibility starts with an action verb and is specific to this role."#;

/// Interview-questions prompt — requests exactly 10 questions across three
/// sub-categories.
const QUESTIONS_PROMPT_TEMPLATE: &str = r#"You are a senior hiring manager. Generate 10 insightful interview questions for the role of '{job_title}'.

Key skills for this role: '{skills_text}'

Include a mix of:
- Behavioral questions (3-4 questions)
- Technical/skill-based questions (4-5 questions)
- Situational questions (2-3 questions)

Format the response as a Markdown list with brief explanations of what each question aims to assess.

Make the questions specific to the role and skills mentioned."#;

/// Builds the full instruction prompt for one generation trigger.
/// Pure and total over the three roles.
pub fn build_prompt(role: Role, job_title: &str, skills_text: &str) -> String {
    let template = match role {
        Role::Description => DESCRIPTION_PROMPT_TEMPLATE,
        Role::Responsibilities => RESPONSIBILITIES_PROMPT_TEMPLATE,
        Role::Questions => QUESTIONS_PROMPT_TEMPLATE,
    };
    template
        .replace("{job_title}", job_title)
        .replace("{skills_text}", skills_text)
}

/// Title the display surface shows above the rendered body.
pub fn modal_title(role: Role, job_title: &str) -> String {
    match role {
        Role::Description => format!("Job Description for {job_title}"),
        Role::Responsibilities => format!("Key Responsibilities for {job_title}"),
        Role::Questions => format!("Interview Questions for {job_title}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROLES: [Role; 3] = [Role::Description, Role::Responsibilities, Role::Questions];

    #[test]
    fn test_prompts_embed_both_inputs_verbatim() {
        for role in ROLES {
            let prompt = build_prompt(role, "Staff Backend Engineer", "Rust, Postgres, Kafka");
            assert!(!prompt.is_empty());
            assert!(prompt.contains("Staff Backend Engineer"), "{role:?}");
            assert!(prompt.contains("Rust, Postgres, Kafka"), "{role:?}");
        }
    }

    #[test]
    fn test_description_prompt_names_four_sections() {
        let prompt = build_prompt(Role::Description, "PM", "roadmaps");
        assert!(prompt.contains("Role Overview"));
        assert!(prompt.contains("Key Responsibilities"));
        assert!(prompt.contains("Qualifications & Requirements"));
        assert!(prompt.contains("What We Offer"));
    }

    #[test]
    fn test_responsibilities_prompt_asks_for_bulleted_list() {
        let prompt = build_prompt(Role::Responsibilities, "PM", "roadmaps");
        assert!(prompt.contains("8-12"));
        assert!(prompt.contains("action verb"));
    }

    #[test]
    fn test_questions_prompt_splits_categories() {
        let prompt = build_prompt(Role::Questions, "PM", "roadmaps");
        assert!(prompt.contains("10 insightful interview questions"));
        assert!(prompt.contains("Behavioral questions (3-4 questions)"));
        assert!(prompt.contains("Technical/skill-based questions (4-5 questions)"));
        assert!(prompt.contains("Situational questions (2-3 questions)"));
    }

    #[test]
    fn test_modal_titles_carry_job_title() {
        assert_eq!(
            modal_title(Role::Description, "Data Engineer"),
            "Job Description for Data Engineer"
        );
        assert_eq!(
            modal_title(Role::Responsibilities, "Data Engineer"),
            "Key Responsibilities for Data Engineer"
        );
        assert_eq!(
            modal_title(Role::Questions, "Data Engineer"),
            "Interview Questions for Data Engineer"
        );
    }

    #[test]
    fn test_role_deserializes_from_snake_case() {
        let role: Role = serde_json::from_str("\"description\"").unwrap();
        assert_eq!(role, Role::Description);
    }
}
