use std::borrow::Cow;

use tracing::debug;

use super::capabilities::{SentimentClassifier, Tagger};
use super::cluster::{clusters, organizations};
use super::mentions::inject_mentions;
use super::merge::merge_subwords;
use super::options::AttributionOptions;
use super::types::{Analysis, Sentiment};
use crate::error::Result;

/// Finds organizations in a text and attributes a sentiment to each.
///
/// Stateless between calls; the tagger and classifier are only borrowed for the
/// duration of [`analyze`](Self::analyze).
///
/// # Examples
///
/// ```rust
/// use entity_sentiment::entity_sentiment::{
///     EntitySentimentPipeline, RawTag, Sentiment, SentimentClassifier, Tagger,
/// };
/// use entity_sentiment::error::Result;
///
/// struct NoEntities;
/// impl Tagger for NoEntities {
///     fn tag(&self, _text: &str) -> Result<Vec<RawTag>> {
///         Ok(vec![])
///     }
/// }
///
/// struct AlwaysNegative;
/// impl SentimentClassifier for AlwaysNegative {
///     fn classify(&self, _text: &str) -> Result<String> {
///         Ok("Negative".to_string())
///     }
/// }
///
/// # fn main() -> Result<()> {
/// let pipeline = EntitySentimentPipeline::new(NoEntities, AlwaysNegative);
/// let analysis = pipeline.analyze("@Turkcell internet yok")?;
///
/// assert_eq!(analysis.entity_list, vec!["@Turkcell"]);
/// assert_eq!(analysis.results[0].sentiment, Sentiment::Negative);
/// # Ok(())
/// # }
/// ```
pub struct EntitySentimentPipeline<T: Tagger, C: SentimentClassifier> {
    tagger: T,
    classifier: C,
    options: AttributionOptions,
}

impl<T: Tagger, C: SentimentClassifier> EntitySentimentPipeline<T, C> {
    /// Creates a pipeline with default [`AttributionOptions`].
    pub fn new(tagger: T, classifier: C) -> Self {
        Self {
            tagger,
            classifier,
            options: AttributionOptions::default(),
        }
    }

    /// Replaces the attribution options.
    pub fn with_options(mut self, options: AttributionOptions) -> Self {
        self.options = options;
        self
    }

    /// Current attribution options.
    pub fn options(&self) -> &AttributionOptions {
        &self.options
    }

    /// Runs tagging, merging, mention injection, clustering and right-context
    /// sentiment over `text`.
    ///
    /// # Errors
    ///
    /// Only tagger and classifier failures; the first one aborts the analysis.
    pub fn analyze(&self, text: &str) -> Result<Analysis> {
        let options = &self.options;

        let tags = self.tagger.tag(&capitalize(text))?;
        let tag_count = tags.len();

        let mut entities = merge_subwords(tags, text, &options.continuation_marker);
        let merged_count = entities.len();

        inject_mentions(
            text,
            options.mention_locator,
            &options.organization_group,
            &mut entities,
        );
        let organizations = organizations(entities, &options.organization_group);

        debug!(
            tags = tag_count,
            merged = merged_count,
            organizations = organizations.len(),
            "collected organizations"
        );

        let mut analysis = Analysis::default();
        for cluster in clusters(&organizations, text, options.max_gap_chars) {
            let context = right_context(text, cluster.span.end, options.context_chars);
            let label = self.classifier.classify(context)?;
            let sentiment = Sentiment::from_label(&label);

            debug!(
                entity = %cluster.text,
                members = cluster.size,
                context,
                label = %label,
                sentiment = %sentiment,
                "attributed sentiment"
            );

            analysis.push(cluster.text, sentiment);
        }

        Ok(analysis)
    }
}

/// Sentence-cases the text for the tagger: first character uppercased, the rest
/// lowercased. A character whose mapping would change its byte length is kept
/// as is, since tag offsets must stay valid for the original text.
fn capitalize(text: &str) -> Cow<'_, str> {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len());
    push_same_width(&mut out, first, first.to_uppercase());
    for c in chars {
        push_same_width(&mut out, c, c.to_lowercase());
    }

    if out == text {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(out)
    }
}

fn push_same_width<I>(out: &mut String, original: char, mapped: I)
where
    I: Iterator<Item = char> + Clone,
{
    let width: usize = mapped.clone().map(char::len_utf8).sum();
    if width == original.len_utf8() {
        out.extend(mapped);
    } else {
        out.push(original);
    }
}

/// Up to `chars` characters starting at byte offset `end`.
fn right_context(text: &str, end: usize, chars: usize) -> &str {
    let Some(rest) = text.get(end..) else {
        return "";
    };
    let len = rest
        .char_indices()
        .nth(chars)
        .map_or(rest.len(), |(idx, _)| idx);
    &rest[..len]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::pipelines::entity_sentiment::{RawTag, Span};
    use std::sync::Mutex;

    struct FixedTagger {
        tags: Vec<RawTag>,
        seen: Mutex<Vec<String>>,
    }

    impl FixedTagger {
        fn new(tags: Vec<RawTag>) -> Self {
            Self {
                tags,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Tagger for FixedTagger {
        fn tag(&self, text: &str) -> Result<Vec<RawTag>> {
            self.seen.lock().unwrap().push(text.to_string());
            Ok(self.tags.clone())
        }
    }

    struct RecordingClassifier {
        label: &'static str,
        contexts: Mutex<Vec<String>>,
    }

    impl RecordingClassifier {
        fn new(label: &'static str) -> Self {
            Self {
                label,
                contexts: Mutex::new(Vec::new()),
            }
        }
    }

    impl SentimentClassifier for RecordingClassifier {
        fn classify(&self, text: &str) -> Result<String> {
            self.contexts.lock().unwrap().push(text.to_string());
            Ok(self.label.to_string())
        }
    }

    struct FailingClassifier;

    impl SentimentClassifier for FailingClassifier {
        fn classify(&self, _text: &str) -> Result<String> {
            Err(PipelineError::Unexpected("model crashed".into()))
        }
    }

    #[test]
    fn capitalize_uppercases_the_first_letter_and_lowercases_the_rest() {
        assert_eq!(capitalize("turkcell çekmiyor"), "Turkcell çekmiyor");
        assert_eq!(capitalize("çok kötü"), "Çok kötü");
        assert_eq!(capitalize("Zaten BÜYÜK"), "Zaten büyük");
        assert_eq!(
            capitalize("fiber 100mb SuperOnline @Turkcell"),
            "Fiber 100mb superonline @turkcell"
        );
        assert_eq!(capitalize("@Turkcell"), "@turkcell");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn capitalize_leaves_untouched_text_borrowed() {
        assert!(matches!(capitalize("Zaten küçük"), Cow::Borrowed(_)));
    }

    #[test]
    fn capitalize_preserves_byte_offsets() {
        // 'ı' (2 bytes) uppercases to 'I' (1 byte).
        assert_eq!(capitalize("ırmak"), "ırmak");
        // 'İ' (2 bytes) lowercases to "i̇" (3 bytes).
        let text = "kadıköy İstanbul ŞUBESİ";
        let cased = capitalize(text);
        assert_eq!(cased, "Kadıköy İstanbul şubesİ");
        assert_eq!(cased.len(), text.len());
    }

    #[test]
    fn right_context_counts_characters() {
        let text = "@Turkcell çöp şirket, iptal ediyorum";
        assert_eq!(right_context(text, 9, 10), " çöp şirke");
        assert_eq!(right_context(text, text.len(), 10), "");
        assert_eq!(right_context(text, text.len() - 3, 10), "rum");
        assert_eq!(right_context(text, 999, 10), "");
    }

    #[test]
    fn tagger_sees_capitalized_copy_and_merge_uses_original() {
        let text = "turkcell enjoyed the match";
        let tagger = FixedTagger::new(vec![
            RawTag::new("ORG", "Turk", Span::new(0, 4)),
            RawTag::new("ORG", "##cell", Span::new(4, 8)),
        ]);
        let classifier = RecordingClassifier::new("Positive");
        let pipeline = EntitySentimentPipeline::new(tagger, classifier);

        let analysis = pipeline.analyze(text).unwrap();

        assert_eq!(
            pipeline.tagger.seen.lock().unwrap().as_slice(),
            ["Turkcell enjoyed the match"]
        );
        assert_eq!(analysis.entity_list, vec!["turkcell"]);
        assert_eq!(analysis.results[0].sentiment, Sentiment::Positive);
        assert_eq!(
            pipeline.classifier.contexts.lock().unwrap().as_slice(),
            [" enjoyed t"]
        );
    }

    #[test]
    fn context_starts_after_the_last_cluster_member() {
        let text = "Türk Telekom berbat hizmet veriyor";
        let tagger = FixedTagger::new(vec![
            RawTag::new("ORG", "Türk", Span::new(0, 5)),
            RawTag::new("ORG", "Telekom", Span::new(6, 13)),
        ]);
        let pipeline = EntitySentimentPipeline::new(tagger, RecordingClassifier::new("Negative"));

        let analysis = pipeline.analyze(text).unwrap();

        assert_eq!(analysis.entity_list, vec!["Türk"]);
        assert_eq!(
            pipeline.classifier.contexts.lock().unwrap().as_slice(),
            [" berbat hi"]
        );
    }

    #[test]
    fn non_organizations_are_ignored() {
        let tagger = FixedTagger::new(vec![
            RawTag::new("PER", "Ahmet", Span::new(0, 5)),
            RawTag::new("LOC", "Ankara", Span::new(9, 15)),
        ]);
        let pipeline = EntitySentimentPipeline::new(tagger, RecordingClassifier::new("Positive"));

        let analysis = pipeline.analyze("Ahmet de Ankara'da").unwrap();

        assert!(analysis.is_empty());
        assert!(pipeline.classifier.contexts.lock().unwrap().is_empty());
    }

    #[test]
    fn classifier_failure_aborts_the_analysis() {
        let pipeline = EntitySentimentPipeline::new(FixedTagger::new(vec![]), FailingClassifier);

        let err = pipeline.analyze("@Acme neden").unwrap_err();

        assert!(matches!(err, PipelineError::Unexpected(_)));
    }

    #[test]
    fn classifier_is_not_called_without_organizations() {
        let pipeline = EntitySentimentPipeline::new(FixedTagger::new(vec![]), FailingClassifier);

        assert!(pipeline.analyze("sadece düz metin").unwrap().is_empty());
    }

    #[test]
    fn options_change_window_and_group() {
        let tagger = FixedTagger::new(vec![RawTag::new("B-KURUM", "Acme", Span::new(0, 4))]);
        let options = AttributionOptions {
            context_chars: 3,
            organization_group: "B-KURUM".into(),
            ..AttributionOptions::default()
        };
        let pipeline = EntitySentimentPipeline::new(tagger, RecordingClassifier::new("Neutral"))
            .with_options(options);

        let analysis = pipeline.analyze("Acme harika").unwrap();

        assert_eq!(analysis.entity_list, vec!["Acme"]);
        assert_eq!(
            pipeline.classifier.contexts.lock().unwrap().as_slice(),
            [" ha"]
        );
    }
}
