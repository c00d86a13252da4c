use super::model::TokenPrediction;
use crate::pipelines::entity_sentiment::{RawTag, Span};

/// Label of tokens outside any entity.
const OUTSIDE: &str = "O";

/// Splits a BIO label into (begins a new entity, entity type).
fn split_label(label: &str) -> (bool, &str) {
    if let Some(kind) = label.strip_prefix("B-") {
        (true, kind)
    } else if let Some(kind) = label.strip_prefix("I-") {
        (false, kind)
    } else {
        (false, label)
    }
}

/// WordPiece tokens back to text: `["Turk", "##cell"]` → `"Turkcell"`.
fn join_wordpieces(tokens: &[&TokenPrediction]) -> String {
    tokens
        .iter()
        .map(|t| t.token.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .replace(" ##", "")
        .trim()
        .to_string()
}

fn group(tokens: &[&TokenPrediction]) -> Option<RawTag> {
    let first = tokens.first()?;
    let last = tokens.last()?;
    let (_, kind) = split_label(&first.label);
    let score = tokens.iter().map(|t| t.score).sum::<f32>() / tokens.len() as f32;

    Some(RawTag {
        group: kind.to_string(),
        token_text: join_wordpieces(tokens),
        span: Span::new(first.start, last.end),
        score,
    })
}

/// Groups token predictions into entity tags.
///
/// Consecutive tokens share a tag while their entity type matches and the later
/// one is not a `B-` label. Groups of `O` tokens are dropped. A group that starts
/// mid-word keeps its leading `##`, which is what lets the merge step reattach it.
pub(crate) fn aggregate_simple(predictions: &[TokenPrediction]) -> Vec<RawTag> {
    let mut tags = Vec::new();
    let mut current: Vec<&TokenPrediction> = Vec::new();

    for prediction in predictions {
        if let Some(last) = current.last() {
            let (begins, kind) = split_label(&prediction.label);
            let (_, last_kind) = split_label(&last.label);
            if begins || kind != last_kind {
                tags.extend(group(&current));
                current.clear();
            }
        }
        current.push(prediction);
    }
    tags.extend(group(&current));

    tags.retain(|tag| tag.group != OUTSIDE);
    tags
}
