// tests/common/mod.rs
//! Shared fixtures: a scripted capability and a sink that records calls.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use study_assistant::algebras::ProgressObserver;
use study_assistant::constants::{DEFAULT_MAX_RETRIES, MAX_MODEL_CHARS, SUMMARY_CONTEXT};
use study_assistant::{
    ArtifactSlot, Availability, Capability, CapabilityError, CapabilityHandle, Flashcard,
    GenerationOptions, GenerativeAdapter, McqItem, PageContent, PageFetcher, RenderSink,
    StudySession,
};

/// One call that reached `invoke`.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub options: GenerationOptions,
    pub input: String,
}

struct Script {
    availability: Availability,
    replies: Mutex<VecDeque<Result<String, CapabilityError>>>,
    invocations: Mutex<Vec<Invocation>>,
    created: AtomicUsize,
    destroyed: AtomicUsize,
}

/// A capability that answers from a fixed queue of replies.
///
/// Once the queue is empty every call fails with a backend error.
#[derive(Clone)]
pub struct ScriptedCapability {
    script: Arc<Script>,
}

impl ScriptedCapability {
    pub fn with_results(replies: Vec<Result<String, CapabilityError>>) -> Self {
        Self::build(Availability::Available, replies)
    }

    pub fn replying<'a>(replies: impl IntoIterator<Item = &'a str>) -> Self {
        Self::with_results(replies.into_iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn silent() -> Self {
        Self::with_results(Vec::new())
    }

    pub fn unavailable() -> Self {
        Self::build(Availability::Unavailable, Vec::new())
    }

    fn build(availability: Availability, replies: Vec<Result<String, CapabilityError>>) -> Self {
        Self {
            script: Arc::new(Script {
                availability,
                replies: Mutex::new(replies.into()),
                invocations: Mutex::new(Vec::new()),
                created: AtomicUsize::new(0),
                destroyed: AtomicUsize::new(0),
            }),
        }
    }

    pub fn calls(&self) -> usize {
        self.script.invocations.lock().len()
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.script.invocations.lock().clone()
    }

    pub fn inputs(&self) -> Vec<String> {
        self.invocations().into_iter().map(|i| i.input).collect()
    }

    pub fn created(&self) -> usize {
        self.script.created.load(Ordering::SeqCst)
    }

    pub fn destroyed(&self) -> usize {
        self.script.destroyed.load(Ordering::SeqCst)
    }
}

struct ScriptedHandle {
    script: Arc<Script>,
    options: GenerationOptions,
}

#[async_trait]
impl Capability for ScriptedCapability {
    async fn availability(&self) -> Availability {
        self.script.availability
    }

    async fn create(
        &self,
        options: &GenerationOptions,
    ) -> Result<Box<dyn CapabilityHandle>, CapabilityError> {
        self.script.created.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedHandle {
            script: self.script.clone(),
            options: options.clone(),
        }))
    }
}

#[async_trait]
impl CapabilityHandle for ScriptedHandle {
    async fn ready(&mut self, _on_progress: ProgressObserver<'_>) -> Result<(), CapabilityError> {
        Ok(())
    }

    async fn invoke(&mut self, input: &str) -> Result<String, CapabilityError> {
        self.script.invocations.lock().push(Invocation {
            options: self.options.clone(),
            input: input.to_string(),
        });
        self.script
            .replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(CapabilityError::backend("script exhausted")))
    }

    async fn destroy(self: Box<Self>) {
        self.script.destroyed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Everything a sink was asked to show, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Summary(String),
    Warning(String),
    Controls(bool),
    Mcqs(Vec<McqItem>),
    Flashcards(Vec<Flashcard>),
    Keywords(Vec<String>, String),
    Text(ArtifactSlot, String),
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    pub fn summaries(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Summary(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn last_warning(&self) -> Option<String> {
        self.events().into_iter().rev().find_map(|e| match e {
            SinkEvent::Warning(w) => Some(w),
            _ => None,
        })
    }

    pub fn controls_enabled(&self) -> Option<bool> {
        self.events().into_iter().rev().find_map(|e| match e {
            SinkEvent::Controls(enabled) => Some(enabled),
            _ => None,
        })
    }

    pub fn text_in(&self, slot: ArtifactSlot) -> Option<String> {
        self.events().into_iter().rev().find_map(|e| match e {
            SinkEvent::Text(s, text) if s == slot => Some(text),
            _ => None,
        })
    }

    fn push(&self, event: SinkEvent) {
        self.events.lock().push(event);
    }
}

impl RenderSink for RecordingSink {
    fn show_summary(&self, text: &str) {
        self.push(SinkEvent::Summary(text.to_string()));
    }

    fn show_warning(&self, text: &str) {
        self.push(SinkEvent::Warning(text.to_string()));
    }

    fn set_controls_enabled(&self, enabled: bool) {
        self.push(SinkEvent::Controls(enabled));
    }

    fn show_mcqs(&self, items: &[McqItem]) {
        self.push(SinkEvent::Mcqs(items.to_vec()));
    }

    fn show_flashcards(&self, cards: &[Flashcard]) {
        self.push(SinkEvent::Flashcards(cards.to_vec()));
    }

    fn show_keywords(&self, keywords: &[String], highlighted: &str) {
        self.push(SinkEvent::Keywords(keywords.to_vec(), highlighted.to_string()));
    }

    fn show_text(&self, slot: ArtifactSlot, text: &str) {
        self.push(SinkEvent::Text(slot, text.to_string()));
    }
}

/// Serves fixed page text for any URL and remembers what was asked for.
#[derive(Default)]
pub struct StaticFetcher {
    pub text: String,
    pub requested: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            requested: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch_page(&self, url: &str) -> Result<PageContent, study_assistant::AppError> {
        self.requested.lock().push(url.to_string());
        Ok(PageContent::new(self.text.as_str()))
    }
}

/// A session with default summary options, limits and retry bound.
pub fn session(
    summarizer: &ScriptedCapability,
    writer: &ScriptedCapability,
    sink: &Arc<RecordingSink>,
) -> StudySession {
    let adapter = GenerativeAdapter::new(Arc::new(summarizer.clone()), Arc::new(writer.clone()));
    StudySession::new(
        adapter,
        sink.clone(),
        GenerationOptions::new(SUMMARY_CONTEXT),
        MAX_MODEL_CHARS,
        DEFAULT_MAX_RETRIES,
    )
}

pub const MCQ_REPLY: &str = r#"Sure! Here are your questions:
[
  {"question": "What do plants make?", "choices": ["A. Glucose", "B. Salt", "C. Iron", "D. Oil"], "answer": "A"},
  {"question": "What gas do plants release?", "choices": ["A. Nitrogen", "B. Oxygen", "C. Helium", "D. Argon"], "answer": "B"}
]
Good luck!"#;

pub const FLASHCARD_REPLY: &str = r#"```json
[{"front": "Photosynthesis", "back": "Light to chemical energy"},
 {"front": "Chlorophyll", "back": "Green pigment"}]
```"#;

pub const PAGE_TEXT: &str =
    "Photosynthesis converts light energy into chemical energy. Chlorophyll absorbs light.";
