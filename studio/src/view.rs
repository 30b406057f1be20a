//! Interaction state machine: turns user actions into session changes and
//! generation calls, and renders the session as a [`View`].
//!
//! A session starts on the splash screen and moves to the main interface
//! once the user presses continue. There is no way back. Inside the main
//! interface the selected [`Screen`] picks the panel; on the Chat panel the
//! selected [`Task`] only swaps the example placeholder.

use crate::error::{StudioError, StudioResult};
use crate::gemini_service::GenerationClient;
use crate::models::{Screen, Task};
use crate::pdf_extractor::{build_pdf_prompt, PdfTextExtractor};
use crate::session::Session;
use serde::Serialize;

pub const EMPTY_INPUT_WARNING: &str = "Please enter text before generating.";
pub const OUTPUT_GENERATED: &str = "Output Generated";

const FEATURES: [&str; 6] = [
    "Gemini integrated",
    "Quick blog generation",
    "AI-powered creator",
    "PDF chat",
    "Hindi, English and 5+ language support",
    "No idea required",
];

const ABOUT: &str = "An AI-powered writing assistant that helps creators, students and \
professionals brainstorm blog titles, outline sections, expand ideas and chat with PDFs. \
Built on Google Gemini; accepts English and Hindi input.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Splash,
    Main,
}

#[derive(Debug, Clone)]
pub enum Action {
    Refresh,
    Continue,
    SelectScreen(Screen),
    SelectTask(Task),
    SubmitChat { input: String },
    AskPdf { pdf: Option<Vec<u8>>, question: String },
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::Refresh => "refresh",
            Action::Continue => "continue",
            Action::SelectScreen(_) => "select_screen",
            Action::SelectTask(_) => "select_task",
            Action::SubmitChat { .. } => "submit_chat",
            Action::AskPdf { .. } => "ask_pdf",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Notice {
    Warning(String),
    Success(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuEntry {
    pub id: Screen,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskEntry {
    pub id: Task,
    pub label: &'static str,
    pub selected: bool,
}

/// Everything the front-end needs to draw one screen.
#[derive(Debug, Clone, Serialize)]
pub struct View {
    pub phase: Phase,
    pub screen: Screen,
    pub task: Task,
    pub title: &'static str,
    pub menu: Vec<MenuEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<TaskEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<&'static str>,
}

impl View {
    fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    fn with_answer(mut self, answer: String) -> Self {
        self.answer = Some(answer.trim().to_string());
        self
    }
}

pub struct ViewRenderer {
    client: GenerationClient,
    extractor: PdfTextExtractor,
}

impl ViewRenderer {
    pub fn new(client: GenerationClient) -> Self {
        Self {
            client,
            extractor: PdfTextExtractor::new(),
        }
    }

    pub fn render(&self, session: &Session) -> View {
        let phase = if session.splash_dismissed { Phase::Main } else { Phase::Splash };
        let chat = phase == Phase::Main && session.screen == Screen::Chat;

        View {
            phase,
            screen: session.screen,
            task: session.task,
            title: session.screen.title(),
            menu: Screen::ALL
                .iter()
                .map(|&id| MenuEntry {
                    id,
                    label: id.label(),
                    selected: id == session.screen,
                })
                .collect(),
            tasks: if chat {
                Task::ALL
                    .iter()
                    .map(|&id| TaskEntry {
                        id,
                        label: id.label(),
                        selected: id == session.task,
                    })
                    .collect()
            } else {
                Vec::new()
            },
            placeholder: chat.then(|| session.task.placeholder()),
            notice: None,
            output: if chat {
                session
                    .last_output
                    .as_deref()
                    .filter(|output| !output.is_empty())
                    .map(|output| output.trim().to_string())
            } else {
                None
            },
            answer: None,
            features: if phase == Phase::Main && session.screen == Screen::Features {
                FEATURES.to_vec()
            } else {
                Vec::new()
            },
            about: (phase == Phase::Main && session.screen == Screen::About).then_some(ABOUT),
        }
    }

    /// Applies one user action to the session and renders the result.
    ///
    /// The caller holds the session for the whole call, so a second
    /// submission on the same session waits for this one to finish.
    pub async fn handle(&self, session: &mut Session, action: Action) -> StudioResult<View> {
        log::debug!("Handling {} action", action.name());

        if !session.splash_dismissed && !matches!(action, Action::Continue | Action::Refresh) {
            return Err(StudioError::SplashActive);
        }

        match action {
            Action::Refresh => Ok(self.render(session)),
            Action::Continue => {
                session.splash_dismissed = true;
                Ok(self.render(session))
            }
            Action::SelectScreen(screen) => {
                session.screen = screen;
                Ok(self.render(session))
            }
            Action::SelectTask(task) => {
                session.screen = Screen::Chat;
                session.task = task;
                Ok(self.render(session))
            }
            Action::SubmitChat { input } => Ok(self.submit_chat(session, input).await),
            Action::AskPdf { pdf, question } => self.ask_pdf(session, pdf, question).await,
        }
    }

    async fn submit_chat(&self, session: &mut Session, input: String) -> View {
        session.screen = Screen::Chat;

        if input.trim().is_empty() {
            return self
                .render(session)
                .with_notice(Notice::Warning(EMPTY_INPUT_WARNING.to_string()));
        }

        let result = self.client.generate(&input).await;
        session.last_input = Some(input);
        session.last_output = Some(result.display_text());

        self.render(session)
            .with_notice(Notice::Success(OUTPUT_GENERATED.to_string()))
    }

    async fn ask_pdf(
        &self,
        session: &mut Session,
        pdf: Option<Vec<u8>>,
        question: String,
    ) -> StudioResult<View> {
        // Extraction failures abort the action with the session untouched.
        let pdf_text = match pdf.filter(|bytes| !bytes.is_empty()) {
            Some(pdf) => Some(self.extractor.extract_text_blocking(pdf).await.map_err(|e| {
                log::warn!("{}", e);
                e
            })?),
            None => None,
        };

        session.screen = Screen::PdfReader;
        let view = self.render(session);

        let Some(pdf_text) = pdf_text else {
            return Ok(view);
        };

        if question.trim().is_empty() {
            return Ok(view);
        }

        let prompt = build_pdf_prompt(&pdf_text, &question);
        let result = self.client.generate(&prompt).await;
        Ok(view.with_answer(result.display_text()))
    }
}
