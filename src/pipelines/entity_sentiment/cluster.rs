use super::types::{Entity, Span};

/// Organizations only, ordered by start offset.
///
/// The sort is stable, so on equal starts tagger output stays ahead of injected mentions.
pub(crate) fn organizations(entities: Vec<Entity>, group: &str) -> Vec<Entity> {
    let mut organizations: Vec<Entity> = entities
        .into_iter()
        .filter(|e| e.group == group)
        .collect();
    organizations.sort_by_key(|e| e.span.start);
    organizations
}

/// A run of organizations close enough to be one mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Cluster {
    /// Text of the first member. Later members never extend it.
    pub text: String,
    /// From the first member's start to the last absorbed member's end.
    pub span: Span,
    /// Number of merged organizations.
    pub size: usize,
}

/// Iterator over the clusters of a sorted organization list.
pub(crate) struct Clusters<'a> {
    organizations: &'a [Entity],
    text: &'a str,
    max_gap_chars: usize,
    next: usize,
}

pub(crate) fn clusters<'a>(
    organizations: &'a [Entity],
    text: &'a str,
    max_gap_chars: usize,
) -> Clusters<'a> {
    Clusters {
        organizations,
        text,
        max_gap_chars,
        next: 0,
    }
}

impl Clusters<'_> {
    /// Characters between two offsets; overlapping or touching spans have no gap.
    fn gap_chars(&self, from: usize, to: usize) -> usize {
        if to <= from {
            return 0;
        }
        self.text
            .get(from..to)
            .map(|gap| gap.chars().count())
            .unwrap_or(to - from)
    }
}

impl Iterator for Clusters<'_> {
    type Item = Cluster;

    fn next(&mut self) -> Option<Cluster> {
        let first = self.organizations.get(self.next)?;
        let mut end = first.span.end;
        let mut size = 1;

        while let Some(candidate) = self.organizations.get(self.next + size) {
            if self.gap_chars(end, candidate.span.start) > self.max_gap_chars {
                break;
            }
            end = candidate.span.end;
            size += 1;
        }

        self.next += size;

        Some(Cluster {
            text: first.text.clone(),
            span: Span::new(first.span.start, end),
            size,
        })
    }
}
