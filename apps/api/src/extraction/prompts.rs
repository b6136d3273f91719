// Prompt constants for the structured extraction call.
// The template embeds the raw resume text verbatim — no truncation here;
// the transport timeout and token ceiling bound the call instead.

/// System prompt — enforces JSON-only output.
pub const EXTRACTION_SYSTEM: &str = "You are a professional resume parsing expert. \
    Extract information accurately and return only valid JSON. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Extraction prompt template. Replace `{resume_text}` before sending.
pub const EXTRACTION_PROMPT_TEMPLATE: &str = r#"You are a professional resume parser. Extract structured information from this resume text and return ONLY valid JSON.

Resume Text:
{resume_text}

Extract and return a JSON object with these exact fields:
{
    "name": "Full candidate name",
    "location": "City/Location mentioned",
    "email": "Email address if found, otherwise empty string",
    "phone": "Phone number if found, otherwise empty string",
    "date": "Application date if found, otherwise current date in DD-MMM-YYYY format",
    "subject": "Application subject line or job title applying for",
    "summary": "Professional summary/objective from Key Expertise section and first paragraph (4-5 lines)",
    "education": [
        {"degree": "Degree name", "institution": "Institution name"}
    ],
    "experience_table": [
        {
            "company_name": "Company Name as Role (Duration)",
            "roles_responsibility": [
                "Exact responsibility 1 as written in resume",
                "Exact responsibility 2 as written in resume"
            ]
        }
    ],
    "skills": ["List of technical skills, tools, technologies from Key Skills section"],
    "certifications": ["List of certifications and qualifications"],
    "cover_letter": "Complete cover letter content including all paragraphs after 'Dear Hiring Manager,'. If no cover letter text exists in the resume, GENERATE a professional, concise cover letter tailored to the 'subject' and the candidate's profile, using proper paragraph structure (2-5 paragraphs)."
}

CRITICAL RULES:
1. Extract ONLY information clearly present in the text
2. For "name": Extract the candidate's full name as shown in the document header
3. For "location": Extract city/location (e.g., "Bengaluru", "Bangalore")
4. For "date": Extract application date if found, otherwise use current date
5. For "subject": Extract the exact subject line (e.g., "Application for the Position of Wind-chill Infra Lead")
6. For "summary": Combine Key Expertise section and first paragraph of cover letter
7. For "education": Extract degree and institution in table format
8. For "experience_table": Format each entry with "Company Name as Role (Duration)" in the company_name field
9. For "roles_responsibility": Extract each responsibility EXACTLY as written by the candidate from the Roles & Responsibility column
10. For "skills": Extract from Key Skills section as a bulleted list
11. For "certifications": Extract from CERTIFICATIONS section
12. For "cover_letter": If present, extract ALL paragraphs after "Dear Hiring Manager,". If NOT present, GENERATE a professional cover letter from the candidate's details (summary, key skills, certifications, experience highlights) tailored to the subject, as multi-paragraph text (avoid repeating "Dear Hiring Manager,")
13. Preserve the original formatting, punctuation, and exact language used by the candidate
14. Return ONLY valid JSON with proper array formatting
15. Ensure all JSON syntax is correct with proper quotes and commas"#;
