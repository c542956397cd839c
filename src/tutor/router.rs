use super::persona::{self, PersonaHandler};
use crate::error::{Result, TutorError};

const MATH_ALIASES: &[&str] = &["math", "mathematics", "calculus", "algebra"];
const SCIENCE_ALIASES: &[&str] = &["science", "chemistry", "physics", "biology"];
const ENGLISH_ALIASES: &[&str] = &["english", "literature", "grammar"];
const GENERAL_STUDIES_ALIASES: &[&str] = &[
    "general",
    "history",
    "geography",
    "social studies",
    "generalstudies",
];

/// A subject the router knows how to tutor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Math,
    Science(ScienceBranch),
    English,
    GeneralStudies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScienceBranch {
    General,
    Chemistry,
    Physics,
    Biology,
}

impl ScienceBranch {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScienceBranch::General => "general",
            ScienceBranch::Chemistry => "chemistry",
            ScienceBranch::Physics => "physics",
            ScienceBranch::Biology => "biology",
        }
    }
}

impl Subject {
    /// Translate a free-text subject label into a subject.
    /// Labels are trimmed and lower-cased, then matched against the alias tables.
    pub fn from_label(label: &str) -> Result<Subject> {
        let normalized = normalize(label);
        let key = normalized.as_str();

        if MATH_ALIASES.contains(&key) {
            Ok(Subject::Math)
        } else if SCIENCE_ALIASES.contains(&key) {
            let branch = match key {
                "chemistry" => ScienceBranch::Chemistry,
                "physics" => ScienceBranch::Physics,
                "biology" => ScienceBranch::Biology,
                _ => ScienceBranch::General,
            };
            Ok(Subject::Science(branch))
        } else if ENGLISH_ALIASES.contains(&key) {
            Ok(Subject::English)
        } else if GENERAL_STUDIES_ALIASES.contains(&key) {
            Ok(Subject::GeneralStudies)
        } else {
            Err(TutorError::UnknownSubject(label.to_string()))
        }
    }

    pub fn handler(&self) -> &'static PersonaHandler {
        match self {
            Subject::Math => &persona::MATH,
            Subject::Science(_) => &persona::SCIENCE,
            Subject::English => &persona::ENGLISH,
            Subject::GeneralStudies => &persona::GENERAL_STUDIES,
        }
    }
}

/// The persona a request was routed to, plus the tag its specialization keys on
#[derive(Debug, Clone)]
pub struct Routed {
    pub handler: &'static PersonaHandler,
    pub subject_tag: String,
}

impl Routed {
    /// Route to the generic explain persona, keeping the caller's label as the tag
    pub fn explain(label: &str) -> Self {
        Routed {
            handler: &persona::EXPLAIN,
            subject_tag: normalize(label),
        }
    }
}

/// Resolve a subject label to its persona handler
pub fn resolve_persona(label: &str) -> Result<Routed> {
    let subject = Subject::from_label(label)?;
    let subject_tag = match subject {
        Subject::Science(branch) => branch.as_str().to_string(),
        _ => normalize(label),
    };
    Ok(Routed {
        handler: subject.handler(),
        subject_tag,
    })
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}
