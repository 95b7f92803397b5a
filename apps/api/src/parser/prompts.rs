// Resume structuring LLM prompt templates.
// All prompts for the parser module are defined here.

pub const RESUME_PARSE_SYSTEM: &str = "\
You are a resume parsing assistant. \
Extract structured candidate information from resume text. \
Return only valid JSON matching the provided schema. \
Never invent details that are not present in the resume; omit unknown fields.";

pub const RESUME_PARSE_PROMPT: &str = r#"Extract the following fields: personal_info, professional_summary, skills, work_experience, education, projects, languages. Use this schema as a guide:

{
  "personal_info": { "full_name": "", "email": "", "phone": "", "location": { "city": "", "state": "", "country": "", "postal_code": "" }, "linkedin": "", "github": "", "portfolio": "", "other_links": [] },
  "professional_summary": { "title": "", "summary": "", "total_years_experience": 0, "current_role": "", "current_company": "" },
  "skills": { "technical_skills": [ { "category": "", "skills": [ { "name": "", "proficiency_level": "", "years_experience": 0 } ] } ], "soft_skills": [], "certifications": [ { "name": "", "issuer": "", "date_obtained": "", "expiry_date": "", "credential_id": "" } ] },
  "work_experience": [ { "company": "", "position": "", "start_date": "", "end_date": null, "duration_years": 0, "location": "", "description": "", "key_achievements": [], "technologies_used": [] } ],
  "education": [ { "institution": "", "degree": "", "field_of_study": "", "start_date": "", "end_date": "", "gpa": "", "honors": [] } ],
  "projects": [ { "name": "", "description": "", "technologies": [], "url": "", "start_date": "", "end_date": "" } ],
  "languages": [ { "language": "", "proficiency": "" } ]
}

Rules:
- Keep entries in the order they appear in the resume.
- Use null for end_date when the position is current.
- gpa is always a string.

Here is the resume text:
"""
{resume_text}
""""#;
