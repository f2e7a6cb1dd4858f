// Match analysis prompt. User text is fenced between BEGIN/END markers; the
// markers themselves are stripped from the input so a résumé or job
// description cannot close its own block early.

use crate::llm_client::prompts::UNTRUSTED_INPUT_INSTRUCTION;

pub const RESUME_BEGIN: &str = "<<<BEGIN RESUME>>>";
pub const RESUME_END: &str = "<<<END RESUME>>>";
pub const JOB_BEGIN: &str = "<<<BEGIN JOB DESCRIPTION>>>";
pub const JOB_END: &str = "<<<END JOB DESCRIPTION>>>";

const PERSONA: &str = "You are an expert technical recruiter and Applicant Tracking System (ATS) \
    specialist. Compare the candidate's resume against the job description and assess how well \
    they match.";

const SCHEMA: &str = r#"Return ONLY a raw JSON object. Do NOT wrap it in markdown code fences.
Use this EXACT schema:
{
  "match_score": 0-100 integer,
  "summary": "Two or three sentences on overall fit",
  "missing_skills": ["skill the job requires that the resume lacks"],
  "ats_check": {
    "score": 0-100 integer,
    "issues": ["formatting or keyword problem an ATS would trip on"],
    "summary": "One sentence on ATS compatibility"
  },
  "suggested_rewrites": [
    {
      "section": "Resume section name",
      "current": "Existing wording",
      "improved": "Stronger wording targeted at this job"
    }
  ],
  "interview_prep": ["Likely interview question or topic to prepare"]
}"#;

/// Builds the analysis prompt around the two user-supplied texts.
pub fn build_analysis_prompt(resume_text: &str, job_desc: &str) -> String {
    format!(
        "{PERSONA}\n\n\
         {RESUME_BEGIN}\n{resume}\n{RESUME_END}\n\n\
         {JOB_BEGIN}\n{job}\n{JOB_END}\n\n\
         {UNTRUSTED_INPUT_INSTRUCTION}\n\n\
         {SCHEMA}",
        resume = strip_markers(resume_text),
        job = strip_markers(job_desc),
    )
}

fn strip_markers(text: &str) -> String {
    [RESUME_BEGIN, RESUME_END, JOB_BEGIN, JOB_END]
        .iter()
        .fold(text.to_string(), |acc, marker| acc.replace(marker, ""))
}
