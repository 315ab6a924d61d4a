// src/formatting/report.rs
//! Markdown rendering of study artifacts via Handlebars templates.

use crate::error::AppError;
use crate::types::{Flashcard, McqItem};
use handlebars::Handlebars;
use once_cell::sync::Lazy;
use serde_json::json;

const MCQ_TEMPLATE: &str = "### 🧠 Multiple Choice Questions\n\n\
{{#each items}}**Q{{number}}: {{question}}**\n\n\
{{#each choices}}- {{this}}\n{{/each}}\n\
{{/each}}";

const FLASHCARD_TEMPLATE: &str = "### 🗂️ Flashcards\n\n\
{{#each cards}}{{number}}. **{{front}}**: {{back}}\n{{/each}}";

const KEYWORD_TEMPLATE: &str = "### 🔍 Keywords\n\n\
{{#each keywords}}`{{this}}` {{/each}}\n\n{{highlighted}}\n";

static TEMPLATES: Lazy<Result<Handlebars<'static>, String>> = Lazy::new(|| {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    for (name, source) in [
        ("mcq", MCQ_TEMPLATE),
        ("flashcards", FLASHCARD_TEMPLATE),
        ("keywords", KEYWORD_TEMPLATE),
    ] {
        handlebars
            .register_template_string(name, source)
            .map_err(|e| format!("{}: {}", name, e))?;
    }
    Ok(handlebars)
});

fn render(name: &str, data: &serde_json::Value) -> Result<String, AppError> {
    let handlebars = TEMPLATES
        .as_ref()
        .map_err(|message| AppError::TemplateRenderError {
            name: name.to_string(),
            message: message.clone(),
        })?;
    handlebars
        .render(name, data)
        .map_err(|e| AppError::TemplateRenderError {
            name: name.to_string(),
            message: e.to_string(),
        })
}

/// Numbered questions with their choices. Answers are not revealed.
pub fn render_mcqs(items: &[McqItem]) -> Result<String, AppError> {
    if items.is_empty() {
        return Ok("No MCQs to display.".to_string());
    }
    let data = json!({
        "items": items.iter().enumerate().map(|(i, item)| json!({
            "number": i + 1,
            "question": item.question,
            "choices": item.choices,
        })).collect::<Vec<_>>()
    });
    render("mcq", &data)
}

pub fn render_flashcards(cards: &[Flashcard]) -> Result<String, AppError> {
    if cards.is_empty() {
        return Ok("No flashcards to display.".to_string());
    }
    let data = json!({
        "cards": cards.iter().enumerate().map(|(i, card)| json!({
            "number": i + 1,
            "front": card.front,
            "back": card.back,
        })).collect::<Vec<_>>()
    });
    render("flashcards", &data)
}

pub fn render_keywords(keywords: &[String], highlighted: &str) -> Result<String, AppError> {
    if keywords.is_empty() {
        return Ok("No keywords found.".to_string());
    }
    render(
        "keywords",
        &json!({ "keywords": keywords, "highlighted": highlighted }),
    )
}
