//! Text blocks spliced into the document when an item is committed

use super::candidate::{CandidateItem, CardDetails, ItemKind};

/// Render the block inserted for `item`. Every block ends in a blank line.
pub fn render(item: &CandidateItem) -> String {
    match item.kind {
        ItemKind::Card => match &item.card {
            Some(card) => render_card(card),
            None => finish(vec![item.title.clone(), item.content.clone()]),
        },
        ItemKind::Analytics => finish(vec![item.content.clone()]),
    }
}

/// Tag line, citation label, optional annotation, then the evidence body.
pub fn render_card(card: &CardDetails) -> String {
    let mut lines = vec![card.tag.clone(), citation_label(card)];
    if let Some(annotation) = annotation(card) {
        lines.push(annotation);
    }
    lines.push(card.evidence.clone());
    finish(lines)
}

/// `"{author} {year}"`, followed by `" ({publication})"` when present.
pub fn citation_label(card: &CardDetails) -> String {
    let mut label = format!("{} {}", card.author, card.year);
    if let Some(publication) = non_empty(&card.publication) {
        label.push_str(&format!(" ({})", publication));
    }
    label
}

/// Parenthesized qualifications and methodology, joined by `"; "`.
fn annotation(card: &CardDetails) -> Option<String> {
    let parts: Vec<&str> = [&card.qualifications, &card.methodology]
        .into_iter()
        .filter_map(non_empty)
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(format!("({})", parts.join("; ")))
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

fn finish(lines: Vec<String>) -> String {
    let mut block = lines.join("\n");
    block.push_str("\n\n");
    block
}
