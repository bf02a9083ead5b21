// All LLM prompt constants for the oracle capabilities.
// Each template is filled with `.replace("{placeholder}", ...)` before sending.

/// System prompt for requirement extraction — enforces JSON-only output.
pub const EXTRACT_SYSTEM: &str =
    "You are an experienced HR screener analyzing job postings. \
    Extract the atomic requirements a posting states about the role. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Extraction prompt template. Replace `{job_text}` before sending.
pub const EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract every atomic requirement from the job posting below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "requirements": [
    {
      "text": "Minimum 3 years of Python experience",
      "kind": "mandatory",
      "group": null,
      "combinator": null
    }
  ]
}

Rules for extraction:
- A single line of the posting may contain several requirements; split them so each entry is one atomic, indivisible condition.
- "kind" is "mandatory" or "optional".
  - Markers like "valorable", "deseable", "opcional", "preferred", "nice to have", "a plus" force "optional".
  - Markers like "minimo", "requerido", "obligatorio", "required", "must have", "minimum" force "mandatory". So does the absence of any marker.
- Requirements joined by "and" ("y") become separate entries, normally without a group.
- Requirements joined by "or" ("o") are logical alternatives:
  - invent one short snake_case group id (for example "minimum_education"),
  - create one entry per alternative,
  - give every alternative that same "group" and "combinator": "OR".
- A requirement outside any logical group has "group": null and "combinator": null.
- Do not invent requirements; only extract conditions the posting actually states. The role description may hint at implicit technical requirements, but stay conservative.

Example. The line "Degree in Computer Science or a Master's in AI" becomes:
{
  "requirements": [
    {"text": "Degree in Computer Science", "kind": "mandatory", "group": "minimum_education", "combinator": "OR"},
    {"text": "Master's degree in AI", "kind": "mandatory", "group": "minimum_education", "combinator": "OR"}
  ]
}

JOB POSTING:
{job_text}"#;

/// System prompt for CV matching — enforces JSON-only output.
pub const CV_MATCH_SYSTEM: &str =
    "You are an experienced HR screener filtering candidates. \
    Judge whether a CV satisfies each requirement of a posting. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// CV matching prompt template. Replace `{requirements}` and `{cv_text}`.
pub const CV_MATCH_PROMPT_TEMPLATE: &str = r#"Judge each requirement below against the candidate's CV.

Return a JSON object with this EXACT schema, one verdict per requirement, in the same order:
{
  "verdicts": [
    {"requirement": "<the requirement text, verbatim>", "satisfied": true, "rationale": "one short sentence"}
  ]
}

Rules for judging:
- "satisfied" is true only when the CV makes it clear the requirement is met.
- When it is not clear, the requirement is NOT met (satisfied: false).
- Evidence may be indirect: infer from the work actually described. A CV listing Django backend development supports "Python experience" even if Python is never named.
- Do not invent experience the CV does not support.
- Echo each requirement text verbatim in "requirement"; skip none.

REQUIREMENTS:
{requirements}

CV:
{cv_text}"#;

/// System prompt for answer interpretation — enforces JSON-only output.
pub const INTERPRET_SYSTEM: &str =
    "You are an experienced HR screener interviewing a candidate about \
    requirements their CV did not evidence. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Answer interpretation prompt template. Replace `{requirement}` and `{answer}`.
pub const INTERPRET_PROMPT_TEMPLATE: &str = r#"Decide whether the candidate's answer shows they meet the requirement.

Return a JSON object with this EXACT schema:
{"satisfied": false, "rationale": "one short sentence"}

Rules:
- "satisfied" is true only when the answer clearly indicates the candidate meets the requirement.
- An ambiguous, evasive, or negative answer means NOT met (satisfied: false).
- Judge only this requirement; ignore anything else the answer brings up.
- Do not give the candidate the benefit of the doubt.

REQUIREMENT: {requirement}
CANDIDATE ANSWER: {answer}"#;

/// System prompt for the rolling summary. Plain text out, not JSON.
pub const SUMMARIZE_SYSTEM: &str =
    "You maintain the running context summary of a screening interview. \
    Respond with the updated summary text only: 3 to 6 sentences, \
    no preamble, no JSON, no markdown.";

/// Summary prompt template. Replace `{previous_summary}` and `{history}`.
pub const SUMMARIZE_PROMPT_TEMPLATE: &str = r#"Update the interview summary so it reflects the relevant information accumulated so far. Keep it brief but informative.

PREVIOUS SUMMARY (may be empty):
{previous_summary}

RECENT EXCHANGES:
{history}

Return ONLY the new summary."#;
