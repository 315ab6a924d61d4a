// tests/study_session.rs
//! Derived-artifact triggers: gating, retries, rendering and prompts.

mod common;

use common::{
    session, RecordingSink, ScriptedCapability, SinkEvent, StaticFetcher, FLASHCARD_REPLY,
    MCQ_REPLY, PAGE_TEXT,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use study_assistant::constants::{
    COMPARISON_CONTEXT, FLASHCARD_CONTEXT, FOLLOW_UP_CONTEXT, KEYWORD_CONTEXT, MCQ_CONTEXT,
};
use study_assistant::{
    AnswerVerdict, AppError, ArtifactSlot, CapabilityError, Flashcard, GenerationError,
    OutputFormat, PageContent, StudySession, SummaryLength,
};

const SUMMARY: &str = "Plants turn light into sugar.";

async fn summarized(
    summarizer: &ScriptedCapability,
    writer: &ScriptedCapability,
    sink: &Arc<RecordingSink>,
) -> StudySession {
    let mut session = session(summarizer, writer, sink);
    session.on_content_change(PageContent::new(PAGE_TEXT)).await;
    assert!(session.summary().is_valid());
    sink.clear();
    session
}

#[tokio::test]
async fn mcqs_are_extracted_from_chatty_output() {
    let summarizer = ScriptedCapability::replying([SUMMARY]);
    let writer = ScriptedCapability::replying([MCQ_REPLY]);
    let sink = Arc::new(RecordingSink::default());
    let session = summarized(&summarizer, &writer, &sink).await;

    let items = session.generate_mcqs().await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[1].question, "What gas do plants release?");
    assert_eq!(sink.events(), vec![SinkEvent::Mcqs(items.clone())]);

    let invocation = &writer.invocations()[0];
    assert_eq!(invocation.input, SUMMARY);
    assert_eq!(invocation.options.shared_context, MCQ_CONTEXT);
    assert_eq!(invocation.options.format, OutputFormat::PlainText);
}

#[tokio::test]
async fn generated_mcqs_judge_by_label() {
    let summarizer = ScriptedCapability::replying([SUMMARY]);
    let writer = ScriptedCapability::replying([MCQ_REPLY]);
    let sink = Arc::new(RecordingSink::default());
    let session = summarized(&summarizer, &writer, &sink).await;

    let items = session.generate_mcqs().await.unwrap();
    let first = &items[0];

    assert_eq!(first.judge("A. Glucose"), AnswerVerdict::Correct);
    assert_eq!(
        first.judge("C. Iron"),
        AnswerVerdict::Incorrect {
            correct_answer: "A".to_string()
        }
    );
    assert_eq!(first.resolve_choice("b"), Some("B. Salt"));
    assert_eq!(
        first.judge("C. Iron").feedback(),
        "❌ Incorrect. Correct answer: A"
    );
}

#[tokio::test]
async fn invalid_json_is_retried_within_the_bound() {
    let summarizer = ScriptedCapability::replying([SUMMARY]);
    let writer = ScriptedCapability::replying([
        "I cannot do that.",
        r#"[{"question": "Q?", "choices": ["A. 1", "B. 2"], "answer": "A"}]"#,
        MCQ_REPLY,
    ]);
    let sink = Arc::new(RecordingSink::default());
    let session = summarized(&summarizer, &writer, &sink).await;

    let items = session.generate_mcqs().await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(writer.calls(), 3);
}

#[tokio::test]
async fn persistent_failure_stops_after_three_attempts() {
    let summarizer = ScriptedCapability::replying([SUMMARY]);
    let writer = ScriptedCapability::replying(["nope", "still nope", "never", "unused"]);
    let sink = Arc::new(RecordingSink::default());
    let session = summarized(&summarizer, &writer, &sink).await;

    let err = session.generate_flashcards().await.unwrap_err();

    assert!(matches!(err, GenerationError::Extraction(_)));
    assert_eq!(writer.calls(), 3);
    assert_eq!(writer.created(), writer.destroyed());
    let shown = sink.text_in(ArtifactSlot::Flashcards).unwrap();
    assert!(shown.starts_with("Error: "), "got {shown}");
}

#[tokio::test]
async fn flashcards_come_from_fenced_output() {
    let summarizer = ScriptedCapability::replying([SUMMARY]);
    let writer = ScriptedCapability::replying([FLASHCARD_REPLY]);
    let sink = Arc::new(RecordingSink::default());
    let session = summarized(&summarizer, &writer, &sink).await;

    let cards = session.generate_flashcards().await.unwrap();

    assert_eq!(
        cards,
        vec![
            Flashcard::new("Photosynthesis", "Light to chemical energy"),
            Flashcard::new("Chlorophyll", "Green pigment"),
        ]
    );
    assert_eq!(
        writer.invocations()[0].options.shared_context,
        FLASHCARD_CONTEXT
    );
}

#[tokio::test]
async fn artifacts_are_refused_without_a_valid_summary() {
    let summarizer = ScriptedCapability::with_results(vec![Err(CapabilityError::backend("boom"))]);
    let writer = ScriptedCapability::replying([MCQ_REPLY, FLASHCARD_REPLY, "answer"]);
    let sink = Arc::new(RecordingSink::default());
    let mut session = session(&summarizer, &writer, &sink);
    session.on_content_change(PageContent::new(PAGE_TEXT)).await;

    assert!(matches!(
        session.generate_mcqs().await,
        Err(GenerationError::SummaryUnavailable)
    ));
    assert!(matches!(
        session.generate_flashcards().await,
        Err(GenerationError::SummaryUnavailable)
    ));
    assert!(matches!(
        session.ask("why").await,
        Err(GenerationError::SummaryUnavailable)
    ));
    let fetcher = StaticFetcher::new("Other page.");
    let err = session
        .compare_with(&fetcher, "https://example.com/other")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Generation(GenerationError::SummaryUnavailable)
    ));

    assert_eq!(writer.calls(), 0);
    assert!(fetcher.requested.lock().is_empty());
}

#[tokio::test]
async fn mcq_length_follows_the_summary_options() {
    let summarizer = ScriptedCapability::replying([SUMMARY, SUMMARY]);
    let writer = ScriptedCapability::replying([MCQ_REPLY]);
    let sink = Arc::new(RecordingSink::default());
    let mut session = summarized(&summarizer, &writer, &sink).await;

    let options = session
        .state()
        .options()
        .clone()
        .with_length(SummaryLength::Long);
    session.on_config_change(options).await;
    session.generate_mcqs().await.unwrap();

    assert_eq!(writer.invocations()[0].options.length, SummaryLength::Long);
}

#[tokio::test]
async fn highlight_uses_page_content() {
    let summarizer = ScriptedCapability::replying([SUMMARY, "chlorophyll, light energy, , "]);
    let writer = ScriptedCapability::silent();
    let sink = Arc::new(RecordingSink::default());
    let session = summarized(&summarizer, &writer, &sink).await;

    let highlights = session.highlight().await.unwrap();

    assert_eq!(highlights.keywords, vec!["chlorophyll", "light energy"]);
    assert_eq!(
        highlights.highlighted,
        "Photosynthesis converts <mark>light energy</mark> into chemical energy. <mark>Chlorophyll</mark> absorbs light."
    );
    let invocation = &summarizer.invocations()[1];
    assert_eq!(invocation.input, PAGE_TEXT);
    assert_eq!(invocation.options.shared_context, KEYWORD_CONTEXT);
    assert_eq!(invocation.options.length, SummaryLength::Long);
    assert_eq!(writer.calls(), 0);
}

#[tokio::test]
async fn highlight_without_content_fails() {
    let summarizer = ScriptedCapability::silent();
    let writer = ScriptedCapability::silent();
    let sink = Arc::new(RecordingSink::default());
    let session = session(&summarizer, &writer, &sink);

    let err = session.highlight().await.unwrap_err();

    assert_eq!(err.to_string(), "No page content available.");
    assert_eq!(
        sink.text_in(ArtifactSlot::Highlights).as_deref(),
        Some("Error: No page content available.")
    );
}

#[tokio::test]
async fn highlight_skips_oversized_content() {
    let summarizer = ScriptedCapability::replying(["never used"]);
    let writer = ScriptedCapability::silent();
    let sink = Arc::new(RecordingSink::default());
    let mut session = session(&summarizer, &writer, &sink);
    session
        .on_content_change(PageContent::new("x".repeat(4001)))
        .await;

    let err = session.highlight().await.unwrap_err();

    assert_eq!(
        err,
        GenerationError::ContentTooLarge {
            length: 4001,
            max: 4000
        }
    );
    assert_eq!(summarizer.calls(), 0);
    assert!(sink
        .text_in(ArtifactSlot::Highlights)
        .is_some_and(|text| text.starts_with("Error: Text is too long")));
}

#[tokio::test]
async fn comparison_summarizes_then_compares() {
    let summarizer = ScriptedCapability::replying([SUMMARY, "Animals eat plants."]);
    let writer = ScriptedCapability::replying(["Both pages discuss food."]);
    let sink = Arc::new(RecordingSink::default());
    let session = summarized(&summarizer, &writer, &sink).await;
    let fetcher = StaticFetcher::new("Animals get energy by eating plants.");

    let comparison = session
        .compare_with(&fetcher, "https://example.com/animals")
        .await
        .unwrap();

    assert_eq!(comparison, "Both pages discuss food.");
    assert_eq!(
        fetcher.requested.lock().clone(),
        vec!["https://example.com/animals".to_string()]
    );
    assert_eq!(
        summarizer.inputs()[1],
        "Animals get energy by eating plants."
    );

    let compare_call = &writer.invocations()[0];
    assert_eq!(compare_call.options.shared_context, COMPARISON_CONTEXT);
    assert_eq!(compare_call.options.format, OutputFormat::Markdown);
    assert_eq!(compare_call.options.length, SummaryLength::Medium);
    assert!(compare_call.input.contains("Summary 1:\nPlants turn light into sugar."));
    assert!(compare_call.input.contains("Summary 2:\nAnimals eat plants."));
    assert_eq!(
        sink.text_in(ArtifactSlot::Comparison).as_deref(),
        Some("Both pages discuss food.")
    );
}

#[tokio::test]
async fn oversized_comparison_page_is_refused() {
    let summarizer = ScriptedCapability::replying([SUMMARY]);
    let writer = ScriptedCapability::silent();
    let sink = Arc::new(RecordingSink::default());
    let session = summarized(&summarizer, &writer, &sink).await;
    let fetcher = StaticFetcher::new(&"y".repeat(4001));

    let err = session
        .compare_with(&fetcher, "https://example.com/long")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Generation(GenerationError::ContentTooLarge { length: 4001, max: 4000 })
    ));
    assert_eq!(summarizer.calls(), 1);
}

#[tokio::test]
async fn follow_up_quotes_the_summary() {
    let summarizer = ScriptedCapability::replying([SUMMARY]);
    let writer = ScriptedCapability::replying(["In starch."]);
    let sink = Arc::new(RecordingSink::default());
    let session = summarized(&summarizer, &writer, &sink).await;

    let answer = session.ask("  where is it stored ").await.unwrap();

    assert_eq!(answer.as_deref(), Some("In starch."));
    let call = &writer.invocations()[0];
    assert_eq!(
        call.input,
        "You said Plants turn light into sugar.. But where is it stored?"
    );
    assert_eq!(call.options.shared_context, FOLLOW_UP_CONTEXT);
    assert_eq!(call.options.length, SummaryLength::Short);
    assert_eq!(
        sink.text_in(ArtifactSlot::FollowUp).as_deref(),
        Some("In starch.")
    );
}

#[tokio::test]
async fn blank_follow_up_is_ignored() {
    let summarizer = ScriptedCapability::replying([SUMMARY]);
    let writer = ScriptedCapability::replying(["unused"]);
    let sink = Arc::new(RecordingSink::default());
    let session = summarized(&summarizer, &writer, &sink).await;

    assert_eq!(session.ask("   ").await.unwrap(), None);
    assert_eq!(writer.calls(), 0);
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn concurrent_triggers_each_render_their_slot() {
    let summarizer = ScriptedCapability::replying([SUMMARY]);
    let writer = ScriptedCapability::replying([MCQ_REPLY, FLASHCARD_REPLY]);
    let sink = Arc::new(RecordingSink::default());
    let session = summarized(&summarizer, &writer, &sink).await;

    let (mcqs, cards) = futures::join!(session.generate_mcqs(), session.generate_flashcards());

    assert!(mcqs.is_ok());
    assert!(cards.is_ok());
    let events = sink.events();
    assert!(events.iter().any(|e| matches!(e, SinkEvent::Mcqs(_))));
    assert!(events.iter().any(|e| matches!(e, SinkEvent::Flashcards(_))));
}
