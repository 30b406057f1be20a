use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Chat,
    PdfReader,
    About,
    Features,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Screen::Chat, Screen::PdfReader, Screen::About, Screen::Features];

    pub fn label(&self) -> &'static str {
        match self {
            Screen::Chat => "Chat",
            Screen::PdfReader => "PDF Reader",
            Screen::About => "About",
            Screen::Features => "Features",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Chat => "Content Generator",
            Screen::PdfReader => "Chat with your PDF",
            Screen::About => "About",
            Screen::Features => "Features",
        }
    }
}

/// Writing task picked on the Chat screen. Only the example placeholder
/// differs between tasks; every task sends the typed text as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    #[default]
    CreateTopics,
    CreateSections,
    ExplainContent,
}

impl Task {
    pub const ALL: [Task; 3] = [Task::CreateTopics, Task::CreateSections, Task::ExplainContent];

    pub fn label(&self) -> &'static str {
        match self {
            Task::CreateTopics => "Create Topics",
            Task::CreateSections => "Create Sections",
            Task::ExplainContent => "Explain Content",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Task::CreateTopics => {
                "e.g. Create blog post titles about Artificial Intelligence in education."
            }
            Task::CreateSections => "e.g. Create blog sections for the topic: Future of Robotics",
            Task::ExplainContent => "e.g. Expand this section: Role of AI in autonomous vehicles",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl GeminiGenerationConfig {
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.max_output_tokens.is_none()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiCandidate {
    pub content: Option<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            error: error.into(),
        }
    }
}
