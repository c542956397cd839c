use super::persona::PersonaHandler;
use std::fmt;

/// Substring in a question that switches on quiz formatting. Matched case-sensitively.
pub const QUIZ_TRIGGER: &str = "Quiz me on:";

/// Output contract for quiz answers. Clients split the answer on these markers.
pub const QUIZ_FORMAT: &str = "\nIMPORTANT: You are generating a quiz. \
You must strictly follow this format for exactly 3 questions:\n\n\
Q: [The Question Text Here]\n\
A) [Option 1]\n\
B) [Option 2]\n\
C) [Option 3]\n\
D) [Option 4]\n\
Correct: [The Letter]\n\
Explanation: [A short explanation of why it is correct]\n\n\
Do not add intro text. Just start with 'Q:'.";

/// Age band the answer is pitched at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradeLevel {
    Elementary,
    Middle,
    #[default]
    High,
    Uni,
}

impl GradeLevel {
    /// Parse a grade label; anything unrecognized is treated as high school.
    /// Matching ignores surrounding whitespace and case, so `" Elementary "`
    /// gets the elementary framing.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "elementary" => GradeLevel::Elementary,
            "middle" => GradeLevel::Middle,
            "high" => GradeLevel::High,
            "uni" => GradeLevel::Uni,
            _ => GradeLevel::High,
        }
    }

    pub fn framing(&self) -> &'static str {
        match self {
            GradeLevel::Elementary => "Explain this to a curious 2nd grader (Age 7-9). Use simple words, fun analogies, and short sentences. Avoid jargon.",
            GradeLevel::Middle => "Explain this to a Middle School student (Age 11-13). Use clear language, define complex terms, and relate to school topics.",
            GradeLevel::High => "Explain this to a High School student (Age 14-18). Use academic terminology, prepare for exams, and be detailed but clear.",
            GradeLevel::Uni => "Explain this at a University/Expert level. Use advanced concepts, technical depth, and rigorous analysis.",
        }
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeLevel::Elementary => write!(f, "elementary"),
            GradeLevel::Middle => write!(f, "middle"),
            GradeLevel::High => write!(f, "high"),
            GradeLevel::Uni => write!(f, "uni"),
        }
    }
}

/// The system/user message pair sent to the completion API
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
    pub quiz: bool,
}

pub fn is_quiz_request(question: &str) -> bool {
    question.contains(QUIZ_TRIGGER)
}

/// Build the prompt for a routed question.
///
/// The system prompt is the persona's instructions, then the grade framing and
/// the student's location, then the quiz format when the question asks for a quiz.
/// The question itself is passed through untouched as the user message.
pub fn build_prompt(
    handler: &PersonaHandler,
    subject_tag: &str,
    grade: GradeLevel,
    location: &str,
    question: &str,
) -> Prompt {
    let quiz = is_quiz_request(question);
    let quiz_section = if quiz { QUIZ_FORMAT } else { "" };

    let system = format!(
        "{instructions}\n\n{framing}\nUser Location: {location}.{quiz_section}",
        instructions = handler.instructions_for(subject_tag),
        framing = grade.framing(),
        location = location,
        quiz_section = quiz_section,
    );

    Prompt {
        system,
        user: question.to_string(),
        quiz,
    }
}
