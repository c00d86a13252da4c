use super::options::MentionLocator;
use super::types::{Entity, Span};

/// Whitespace-separated tokens with their byte offsets.
fn whitespace_tokens(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let base = text.as_ptr() as usize;
    text.split_whitespace()
        .map(move |token| (token.as_ptr() as usize - base, token))
}

/// Appends an organization for every `@`-prefixed token of `text`.
///
/// Handles are usually out of the tagger's vocabulary, so they are promoted
/// regardless of what it found.
pub(crate) fn inject_mentions(
    text: &str,
    locator: MentionLocator,
    group: &str,
    entities: &mut Vec<Entity>,
) {
    for (offset, token) in whitespace_tokens(text) {
        if !token.starts_with('@') {
            continue;
        }

        let start = match locator {
            MentionLocator::FirstOccurrence => text.find(token).unwrap_or(offset),
            MentionLocator::Positional => offset,
        };

        entities.push(Entity {
            group: group.to_string(),
            text: token.to_string(),
            span: Span::new(start, start + token.len()),
        });
    }
}
