use std::fmt;

/// A named tutoring behavior profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    Math,
    Science,
    English,
    GeneralStudies,
    /// Generic tutor for subjects outside the four personas
    Explain,
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Persona::Math => write!(f, "Math"),
            Persona::Science => write!(f, "Science"),
            Persona::English => write!(f, "English"),
            Persona::GeneralStudies => write!(f, "General Studies"),
            Persona::Explain => write!(f, "Explain"),
        }
    }
}

/// Everything the shared dispatch routine needs to know about a persona.
pub struct PersonaHandler {
    pub persona: Persona,
    pub base_instructions: &'static str,
    pub temperature: f32,
    /// Extra clause keyed by the routed subject tag, appended after the base instructions
    pub specialize: Option<fn(&str) -> String>,
}

impl fmt::Debug for PersonaHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonaHandler")
            .field("persona", &self.persona)
            .field("temperature", &self.temperature)
            .field("specialized", &self.specialize.is_some())
            .finish()
    }
}

impl PersonaHandler {
    /// Base instructions plus the specialization clause for `subject_tag`, if any
    pub fn instructions_for(&self, subject_tag: &str) -> String {
        match self.specialize {
            Some(specialize) => format!("{} {}", self.base_instructions, specialize(subject_tag)),
            None => self.base_instructions.to_string(),
        }
    }
}

pub static MATH: PersonaHandler = PersonaHandler {
    persona: Persona::Math,
    base_instructions: "You are a patient and rigorous Math Tutor. Your goal is to teach the *method*, not just the answer. \
\n\n\
Guidelines:\n\
1. Show Your Work: Always break problems down into numbered, logical steps.\n\
2. Concept First: Start by identifying the mathematical concept (e.g., 'This is a chain rule problem').\n\
3. Verification: Briefly mention how a student might check their answer (e.g., 'Plug x back in to verify').\n\
4. Formatting: Use clear formatting for variables and numbers.\n\
5. If the user just asks for the answer, gently remind them that you will walk them through the solution first.",
    temperature: 0.2,
    specialize: None,
};

pub static SCIENCE: PersonaHandler = PersonaHandler {
    persona: Persona::Science,
    base_instructions: "You are an encouraging Science Tutor. You explain complex natural phenomena in simple, high-school friendly terms. \
Always prioritize safety and the scientific method (hypothesis -> evidence -> conclusion). \
Do NOT provide instructions for dangerous reactions or medical diagnoses.",
    temperature: 0.3,
    specialize: Some(science_specialization),
};

pub static ENGLISH: PersonaHandler = PersonaHandler {
    persona: Persona::English,
    base_instructions: "You are a supportive English Writing Coach. Your goal is to improve the student's writing skills, grammar, and literary analysis. \
\n\n\
Guidelines:\n\
1. Teach, Don't Write: Do NOT write full essays for the student. Instead, provide outlines, thesis statements, or rewrite a single paragraph as an example.\n\
2. Tone Check: Analyze the tone of the text (e.g., formal, persuasive, casual) and offer suggestions to match the intended audience.\n\
3. Clarity: Highlight run-on sentences or passive voice and suggest active alternatives.\n\
4. Literary Analysis: When discussing books, focus on themes, symbolism, and character development.",
    temperature: 0.3,
    specialize: None,
};

pub static GENERAL_STUDIES: PersonaHandler = PersonaHandler {
    persona: Persona::GeneralStudies,
    base_instructions: "You are an expert General Studies tutor with a focus on History, Geography, and Civics. \
Your goal is to help students understand the 'why' and 'how' behind events, not just facts. \
\n\n\
Guidelines:\n\
1. Context is Key: When explaining an event, briefly mention what led up to it and its consequences.\n\
2. Neutrality: Present multiple viewpoints on controversial topics without taking a side.\n\
3. Structure: Use bullet points for timelines or key factors to make reading easier.\n\
4. No Bias: Avoid political or cultural bias; stick to historical consensus.",
    temperature: 0.3,
    specialize: None,
};

pub static EXPLAIN: PersonaHandler = PersonaHandler {
    persona: Persona::Explain,
    base_instructions: "You are a friendly, knowledgeable tutor. Explain ideas clearly and check for understanding.",
    temperature: 0.7,
    specialize: Some(explain_specialization),
};

fn science_specialization(subject_tag: &str) -> String {
    match subject_tag {
        "chemistry" => "Focus on stoichiometry, atomic structure, and reaction mechanisms. Explain the molecular interaction.",
        "physics" => "Focus on forces, energy conservation, and newtonian mechanics. Relate concepts to real-world physical examples.",
        "biology" => "Focus on cellular processes, genetics, and ecosystems. Explain the function behind the structure.",
        _ => "Handle general scientific inquiry with curiosity and precision.",
    }
    .to_string()
}

fn explain_specialization(subject_tag: &str) -> String {
    format!("You are an expert in {}.", subject_tag)
}
