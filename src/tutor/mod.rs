mod persona;
mod prompt;
mod quiz;
mod router;

pub use prompt::*;
pub use quiz::*;
pub use router::*;

use crate::completion::Dispatcher;
use crate::config::UnknownSubjectPolicy;
use crate::error::{Result, TutorError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A student's question as it arrives at `/ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorRequest {
    pub question: String,
    #[serde(default = "default_subject")]
    pub subject: String,
    #[serde(default = "default_grade")]
    pub grade: String,
    #[serde(default = "default_location")]
    pub location: String,
}

fn default_subject() -> String {
    "general".to_string()
}

fn default_grade() -> String {
    "high".to_string()
}

fn default_location() -> String {
    "Unknown".to_string()
}

#[cfg(test)]
impl TutorRequest {
    pub fn new(question: impl Into<String>) -> Self {
        TutorRequest {
            question: question.into(),
            subject: default_subject(),
            grade: default_grade(),
            location: default_location(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorResponse {
    pub subject: String,
    pub model_used: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz: Option<Vec<QuizQuestion>>,
}

/// A request after routing and prompt construction, ready to dispatch
#[derive(Debug, Clone)]
pub struct PreparedPrompt {
    pub routed: Routed,
    pub grade: GradeLevel,
    pub prompt: Prompt,
}

fn route(subject: &str, unknown_subject: UnknownSubjectPolicy) -> Result<Routed> {
    match resolve_persona(subject) {
        Err(TutorError::UnknownSubject(_)) if unknown_subject == UnknownSubjectPolicy::Explain => {
            debug!(%subject, "unknown subject, using explain persona");
            Ok(Routed::explain(subject))
        }
        other => other,
    }
}

/// Route the request and build its prompt without calling the API
pub fn prepare(request: &TutorRequest, unknown_subject: UnknownSubjectPolicy) -> Result<PreparedPrompt> {
    let routed = route(&request.subject, unknown_subject)?;
    let grade = GradeLevel::from_label(&request.grade);
    let prompt = build_prompt(
        routed.handler,
        &routed.subject_tag,
        grade,
        &request.location,
        &request.question,
    );
    Ok(PreparedPrompt { routed, grade, prompt })
}

/// Routes questions to personas and answers them through the dispatcher.
pub struct Tutor {
    dispatcher: Dispatcher,
    unknown_subject: UnknownSubjectPolicy,
}

impl Tutor {
    pub fn new(dispatcher: Dispatcher, unknown_subject: UnknownSubjectPolicy) -> Self {
        Tutor {
            dispatcher,
            unknown_subject,
        }
    }

    pub fn model(&self) -> &str {
        self.dispatcher.model()
    }

    pub fn prepare(&self, request: &TutorRequest) -> Result<PreparedPrompt> {
        prepare(request, self.unknown_subject)
    }

    pub async fn answer(&self, request: &TutorRequest) -> Result<TutorResponse> {
        let prepared = self.prepare(request)?;
        info!(
            persona = %prepared.routed.handler.persona,
            subject_tag = %prepared.routed.subject_tag,
            grade = %prepared.grade,
            quiz = prepared.prompt.quiz,
            "routed question"
        );

        let answer = self
            .dispatcher
            .complete(
                &prepared.prompt.system,
                &prepared.prompt.user,
                prepared.routed.handler.temperature,
            )
            .await?;

        let quiz = if prepared.prompt.quiz {
            Some(parse_quiz(&answer)).filter(|questions| !questions.is_empty())
        } else {
            None
        };

        Ok(TutorResponse {
            subject: request.subject.clone(),
            model_used: self.dispatcher.model().to_string(),
            answer,
            quiz,
        })
    }
}
