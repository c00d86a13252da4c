use super::types::{Entity, RawTag, Span};

/// Glues continuation fragments onto the previous entity.
///
/// Merged text is re-sliced from `original`, not taken from the tags, because the
/// tagger saw a re-capitalized copy. A fragment with nothing before it starts an
/// entity of its own.
pub(crate) fn merge_subwords(tags: Vec<RawTag>, original: &str, marker: &str) -> Vec<Entity> {
    let mut merged: Vec<Entity> = Vec::with_capacity(tags.len());

    for tag in tags {
        match merged.last_mut() {
            Some(last) if tag.token_text.starts_with(marker) => {
                last.text = Span::new(last.span.start, tag.span.end)
                    .slice(original)
                    .to_string();
                last.span.end = tag.span.end;
            }
            _ => merged.push(Entity::from(tag)),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(group: &str, text: &str, start: usize, end: usize) -> RawTag {
        RawTag::new(group, text, Span::new(start, end))
    }

    #[test]
    fn fragments_are_resliced_from_original_casing() {
        let original = "turkcell enjoyed the match";
        let tags = vec![tag("ORG", "Turk", 0, 4), tag("ORG", "##cell", 4, 8)];

        let merged = merge_subwords(tags, original, "##");

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "turkcell");
        assert_eq!(merged[0].span, Span::new(0, 8));
        assert_eq!(merged[0].group, "ORG");
    }

    #[test]
    fn chains_of_fragments_extend_the_same_entity() {
        let original = "Superonline bağlantısı";
        let tags = vec![
            tag("ORG", "Super", 0, 5),
            tag("ORG", "##on", 5, 7),
            tag("ORG", "##line", 7, 11),
        ];

        let merged = merge_subwords(tags, original, "##");

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "Superonline");
        assert_eq!(merged[0].span.end, 11);
    }

    #[test]
    fn leading_fragment_becomes_its_own_entity() {
        let tags = vec![tag("ORG", "##cell", 4, 8), tag("PER", "Ali", 10, 13)];

        let merged = merge_subwords(tags, "Turkcell, Ali", "##");

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].text, "##cell");
        assert_eq!(merged[1].text, "Ali");
    }

    #[test]
    fn whole_words_are_kept_verbatim() {
        let tags = vec![tag("ORG", "Vodafone", 0, 8), tag("LOC", "İstanbul", 9, 18)];

        let merged = merge_subwords(tags, "vodafone İstanbul", "##");

        assert_eq!(merged[0].text, "Vodafone");
        assert_eq!(merged[1].text, "İstanbul");
    }

    #[test]
    fn fragment_extends_previous_entity_whatever_its_group() {
        let tags = vec![tag("PER", "Ay", 0, 2), tag("ORG", "##şe", 2, 5)];

        let merged = merge_subwords(tags, "Ayşe", "##");

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].group, "PER");
        assert_eq!(merged[0].text, "Ayşe");
    }
}
