// Analysis prompt templates.
// The system prompt embeds the exact JSON shape the recoverer and the
// result builder expect back.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

pub const ANALYSIS_SYSTEM: &str = r#"You are an expert resume reviewer and career coach. Analyze the provided resume in detail and provide a comprehensive evaluation.

{json_only}

Respond with exactly this structure (values are examples):
{
  "overallScore": 85,
  "atsScore": 88,
  "contentScore": 82,
  "formatScore": 87,
  "strengths": [
    {
      "title": "Strong Action Verbs",
      "description": "Resume uses powerful action words",
      "score": 90
    }
  ],
  "issues": [
    {
      "title": "Too Many Details",
      "description": "Some sections have excessive information",
      "severity": "critical" | "high" | "medium" | "low",
      "suggestion": "Condense information to key points"
    }
  ],
  "suggestions": [
    {
      "category": "Professional Summary",
      "suggestion": "Add quantifiable achievements",
      "impact": "critical" | "high" | "medium" | "low"
    }
  ],
  "keywordAnalysis": {
    "presentKeywords": ["Leadership", "Project Management", "Communication"],
    "missingKeywords": ["Python", "Data Analysis", "Cloud Computing"],
    "keywordDensity": 78,
    "industryRelevance": "Matches 85% of industry standards"
  },
  "sections": {
    "personal": { "present": true, "score": 90, "feedback": "Complete contact information" },
    "professional_summary": { "present": true, "score": 85, "feedback": "Good but could be more impactful" },
    "experience": { "present": true, "score": 88, "feedback": "Well structured experience section" },
    "education": { "present": true, "score": 82, "feedback": "Complete education details" },
    "skills": { "present": true, "score": 92, "feedback": "Excellent skill section" },
    "projects": { "present": false, "score": 0, "feedback": "No projects section found" }
  },
  "formatting": {
    "hasClearStructure": true,
    "useOfBulletPoints": true,
    "consistentFormatting": true,
    "appropriateLength": true,
    "feedback": "Professional formatting"
  },
  "atsCompatibility": {
    "score": 88,
    "warnings": ["Some special characters may not parse"],
    "recommendations": ["Use standard fonts", "Avoid tables"]
  }
}

All scores are integers from 0 to 100."#;

pub const ANALYSIS_USER_TEMPLATE: &str = "Please analyze this resume:\n\n{resume_text}";

/// The two-message request sent to the completion client.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisPrompt {
    pub system: String,
    pub user: String,
}

pub fn build_analysis_prompt(resume_text: &str) -> AnalysisPrompt {
    AnalysisPrompt {
        system: ANALYSIS_SYSTEM.replace("{json_only}", JSON_ONLY_SYSTEM),
        user: ANALYSIS_USER_TEMPLATE.replace("{resume_text}", resume_text),
    }
}
