//! Prompt construction and completion parsing

use crate::crawler::Corpus;
use crate::generator::GenerationResult;

/// Caption used when the completion cannot be split into labeled fields
pub const PLACEHOLDER_CAPTION: &str = "⚠️ Could not parse caption";

const CAPTION_MARKER: &str = "CAPTION:";
const CONTENT_MARKER: &str = "CONTENT:";

/// Joins the first `max_documents` pages as numbered context entries
///
/// Each entry is `"{index}. {content}"` with a 1-based index; entries are
/// separated by a blank line and keep corpus order.
pub fn build_context(corpus: &Corpus, max_documents: usize) -> String {
    corpus
        .iter()
        .take(max_documents)
        .enumerate()
        .map(|(i, page)| format!("{}. {}", i + 1, page.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Builds the single prompt asking for a caption and a post body
pub fn build_prompt(topic: &str, context: &str) -> String {
    format!(
        "You are a B2B tech content strategist. Based on the topic and contextual content below, write:\n\
         \n\
         1. A professional LinkedIn **caption** (max 250 characters) designed to spark interest.\n\
         2. A concise and informative **LinkedIn post body** (80-150 words) written in simple, authoritative tone.\n\
         \n\
         Topic: {topic}\n\
         \n\
         Context from website content:\n\
         {context}\n\
         \n\
         Format:\n\
         {CAPTION_MARKER} <caption here>\n\
         {CONTENT_MARKER} <content here>\n"
    )
}

/// Splits a completion into caption and body
///
/// When both `CAPTION:` and `CONTENT:` appear, in any order, the caption is
/// the text after the first `CAPTION:` up to the next marker of either kind,
/// and the body is the text after the first `CONTENT:` up to the next
/// `CONTENT:`. Both are trimmed. Otherwise the caption is
/// [`PLACEHOLDER_CAPTION`] and the body is the whole output, trimmed.
pub fn parse_completion(output: &str) -> GenerationResult {
    if !(output.contains(CAPTION_MARKER) && output.contains(CONTENT_MARKER)) {
        return GenerationResult {
            caption: PLACEHOLDER_CAPTION.to_string(),
            body: output.trim().to_string(),
        };
    }

    let caption = segment_after(output, CAPTION_MARKER)
        .split(CONTENT_MARKER)
        .next()
        .unwrap_or_default();
    let body = segment_after(output, CONTENT_MARKER);

    GenerationResult {
        caption: caption.trim().to_string(),
        body: body.trim().to_string(),
    }
}

/// Text between the first `marker` and its next occurrence (or the end)
fn segment_after<'a>(output: &'a str, marker: &str) -> &'a str {
    output
        .split(marker)
        .nth(1)
        .unwrap_or_default()
}
