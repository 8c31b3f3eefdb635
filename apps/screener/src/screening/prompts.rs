// All LLM prompt templates for the screening pipeline.

/// Resume screening prompt. Replace `{job_description}` and `{resume_text}` before sending.
pub const SCREENING_PROMPT_TEMPLATE: &str = r#"You are a Senior Technical Recruiter with 20 years of experience.
Your goal is to objectively evaluate a candidate's resume against a job description.

JOB DESCRIPTION:
{job_description}

CANDIDATE RESUME:
{resume_text}

TASK:
Analyze the resume against the JD. Look for both exact and semantic matches.
Be strict but fair. "React" matches "React.js", "ML" matches "Machine Learning".

OUTPUT FORMAT:
Provide the response in valid JSON format only with the following structure:
{
    "candidate_name": "extracted name",
    "match_score": "0-100",
    "key_strengths": ["list of 3 key strengths relevant to the JD"],
    "missing_critical_skills": ["list of missing skills required in JD"],
    "recommendation": "INTERVIEW" or "REJECT",
    "reasoning": "A 2-sentence summary of why this decision was made"
}

Return ONLY the JSON object, no additional text or markdown formatting."#;

/// Job description generation prompt. Replace `{role_title}` before sending.
pub const JOB_DESCRIPTION_PROMPT_TEMPLATE: &str = r#"Generate a professional job description for the role: {role_title}

Format:
We are looking for a {role_title}.
Must have:
- [5-7 key requirements]
Nice to have:
- [2-3 preferred skills]

Keep it concise and realistic. Return ONLY the job description text."#;
