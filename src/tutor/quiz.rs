use serde::{Deserialize, Serialize};

const NO_EXPLANATION: &str = "No explanation provided.";

/// One multiple-choice question parsed from a quiz answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct: Option<String>,
    pub explanation: String,
}

/// Split a quiz answer into questions using the `Q:` / `A)` / `Correct:` /
/// `Explanation:` markers the quiz format asks the model for.
/// Text before the first `Q:` is ignored.
pub fn parse_quiz(answer: &str) -> Vec<QuizQuestion> {
    answer
        .split("Q:")
        .skip(1)
        .filter(|block| block.trim().chars().count() > 10)
        .filter_map(parse_block)
        .collect()
}

fn parse_block(block: &str) -> Option<QuizQuestion> {
    let mut lines = block.lines().map(str::trim).filter(|l| !l.is_empty());
    let question = lines.next()?.to_string();
    let options = lines.filter(|l| is_option_line(l)).map(str::to_string).collect();

    let correct = block
        .split_once("Correct:")
        .and_then(|(_, rest)| rest.trim().chars().next())
        .map(|c| c.to_uppercase().to_string());

    let explanation = block
        .split_once("Explanation:")
        .map(|(_, rest)| rest.trim().to_string())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| NO_EXPLANATION.to_string());

    Some(QuizQuestion {
        question,
        options,
        correct,
        explanation,
    })
}

fn is_option_line(line: &str) -> bool {
    let mut chars = line.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('A'..='D'), Some(')' | '.'))
    )
}
