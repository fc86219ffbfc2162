//! Résumé → plain text, the user content of the analysis prompt.
//!
//! Section order is fixed: header, professional summary, experience, education,
//! skills, projects. Absent fields are omitted rather than filled with
//! placeholders, and a section with nothing to render is skipped entirely.
//! Output is byte-stable for a given record so prompts stay reproducible.

use crate::models::resume::{
    EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, ResumeRecord,
};

pub fn resume_to_text(resume: &ResumeRecord) -> String {
    let mut blocks: Vec<String> = Vec::new();

    if let Some(header) = resume.personal_info.as_ref().and_then(render_personal_info) {
        blocks.push(header);
    }

    if let Some(summary) = present(&resume.professional_summary) {
        blocks.push(format!("PROFESSIONAL SUMMARY\n{summary}"));
    }

    if let Some(section) = render_section("EXPERIENCE", &resume.experience, render_experience) {
        blocks.push(section);
    }

    if let Some(section) = render_section("EDUCATION", &resume.education, render_education) {
        blocks.push(section);
    }

    let skills: Vec<&str> = resume
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if !skills.is_empty() {
        blocks.push(format!("SKILLS\n{}", skills.join(", ")));
    }

    if let Some(section) = render_section("PROJECTS", &resume.project, render_project) {
        blocks.push(section);
    }

    blocks
        .into_iter()
        .map(|block| block + "\n\n")
        .collect::<String>()
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn render_section<T>(title: &str, entries: &[T], render: fn(&T) -> Option<String>) -> Option<String> {
    let paragraphs: Vec<String> = entries.iter().filter_map(render).collect();
    if paragraphs.is_empty() {
        return None;
    }
    Some(format!("{title}\n{}", paragraphs.join("\n\n")))
}

fn render_personal_info(info: &PersonalInfo) -> Option<String> {
    let mut lines: Vec<String> = Vec::new();
    if let Some(name) = present(&info.full_name) {
        lines.push(name.to_string());
    }
    if let Some(profession) = present(&info.profession) {
        lines.push(profession.to_string());
    }
    let contacts = [
        ("Email", &info.email),
        ("Phone", &info.phone),
        ("Location", &info.location),
        ("LinkedIn", &info.linkedin),
        ("Website", &info.website),
    ];
    for (label, value) in contacts {
        if let Some(value) = present(value) {
            lines.push(format!("{label}: {value}"));
        }
    }
    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn render_experience(exp: &ExperienceEntry) -> Option<String> {
    let mut lines: Vec<String> = Vec::new();
    if let Some(title) = joined(present(&exp.position), " at ", present(&exp.company)) {
        lines.push(title);
    }
    if let Some(dates) = joined(present(&exp.start_date), " - ", present(&exp.end_date)) {
        lines.push(dates);
    }
    if let Some(description) = present(&exp.description) {
        lines.push(description.to_string());
    }
    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn render_education(edu: &EducationEntry) -> Option<String> {
    let mut lines: Vec<String> = Vec::new();
    let subject = joined(present(&edu.degree), " in ", present(&edu.field));
    if let Some(title) = joined(subject.as_deref(), " from ", present(&edu.institution)) {
        lines.push(title);
    }
    if let Some(date) = present(&edu.graduation_date) {
        lines.push(format!("Graduation: {date}"));
    }
    if let Some(gpa) = present(&edu.gpa) {
        lines.push(format!("GPA: {gpa}"));
    }
    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn render_project(project: &ProjectEntry) -> Option<String> {
    let lines: Vec<&str> = [present(&project.name), present(&project.description)]
        .into_iter()
        .flatten()
        .collect();
    (!lines.is_empty()).then(|| lines.join("\n"))
}

/// Joins two optional parts with `sep` when both exist, otherwise returns whichever is set.
fn joined(left: Option<&str>, sep: &str, right: Option<&str>) -> Option<String> {
    match (left, right) {
        (Some(l), Some(r)) => Some(format!("{l}{sep}{r}")),
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (None, None) => None,
    }
}
