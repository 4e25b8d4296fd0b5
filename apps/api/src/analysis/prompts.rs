// All LLM prompt constants for the analysis flows.
// Pure templates: builders only substitute the document text, no I/O.

/// System prompt for resume analysis — enforces JSON-only output.
pub const ANALYSIS_SYSTEM: &str = "You are an expert resume analyzer and career advisor. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Resume analysis prompt template. Replace `{resume_text}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume carefully and provide detailed feedback.

Resume Text:
{resume_text}

Provide the following details in your analysis:
1. Strengths: the key strengths of the candidate based on their resume.
2. Areas of Improvement: areas where the candidate could improve.
3. Project Recommendations: 3-5 projects they could build to showcase their abilities.
4. Career Roadmap: a 1-2 year roadmap for career growth.
5. Recommended Courses: 3-5 specific courses or certifications that would benefit them.

Return a JSON object with this EXACT schema (no extra fields):
{
  "strengths": ["strength1", "strength2", "strength3"],
  "areas_of_improvement": ["area1", "area2", "area3"],
  "project_recommendations": ["project1", "project2", "project3"],
  "career_roadmap": "Detailed career roadmap goes here...",
  "recommended_courses": ["course1", "course2", "course3"]
}"#;

/// System prompt for resume/JD matching — enforces strict JSON with integer scores.
pub const MATCH_SYSTEM: &str = "You are an expert ATS analyzer measuring how well a resume \
    matches a job description. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Ensure all numbers are integers, not strings.";

/// Resume/JD match prompt template.
/// Replace `{resume_text}` and `{jd_text}` before sending.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"Analyze how well this resume matches the job description.

RESUME:
{resume_text}

JOB DESCRIPTION:
{jd_text}

YOUR ANALYSIS MUST INCLUDE:
1. Overall match score (0-100)
2. List of matching skills (exact matches only)
3. List of missing skills (clearly missing from resume)
4. Specific recommendations to improve the resume
5. Category match scores (Technical Skills, Experience, Education, Soft Skills, Industry Knowledge)

RESPONSE FORMAT (STRICT JSON ONLY):
{
    "score": 75,
    "matching_skills": ["Python", "Project Management"],
    "missing_skills": ["AWS", "Docker"],
    "recommendations": [
        "Add AWS certification",
        "Highlight Docker experience"
    ],
    "category_scores": {
        "Technical Skills": 80,
        "Experience": 70,
        "Education": 90,
        "Soft Skills": 65,
        "Industry Knowledge": 75
    }
}

IMPORTANT:
- Only respond with valid JSON
- Do not include any markdown formatting
- Ensure all numbers are integers
- All arrays should contain at least 3 items if possible"#;

/// Builds the resume-analysis prompt for the given extracted text.
pub fn analysis_prompt(resume_text: &str) -> String {
    ANALYSIS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}

/// Builds the resume/JD match prompt for the given document pair.
pub fn match_prompt(resume_text: &str, jd_text: &str) -> String {
    MATCH_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{jd_text}", jd_text)
}
