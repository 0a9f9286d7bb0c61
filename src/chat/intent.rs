/// Decides whether a message asks for a new image.
pub trait IntentClassifier: Send + Sync {
    fn is_image_generation(&self, text: &str) -> bool;
}

/// Substring heuristic: a generation verb together with a picture noun,
/// both matched case-insensitively anywhere in the text.
#[derive(Debug, Clone)]
pub struct KeywordIntentClassifier {
    verbs: Vec<String>,
    nouns: Vec<String>,
}

const DEFAULT_VERBS: &[&str] = &["generate", "create", "draw", "make"];
const DEFAULT_NOUNS: &[&str] = &["image", "picture", "photo"];

impl KeywordIntentClassifier {
    pub fn new<V, N>(verbs: V, nouns: N) -> Self
    where
        V: IntoIterator,
        V::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        let lower = |word: &str| word.trim().to_lowercase();
        Self {
            verbs: verbs.into_iter().map(|v| lower(v.as_ref())).collect(),
            nouns: nouns.into_iter().map(|n| lower(n.as_ref())).collect(),
        }
    }
}

impl Default for KeywordIntentClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_VERBS, DEFAULT_NOUNS)
    }
}

impl IntentClassifier for KeywordIntentClassifier {
    fn is_image_generation(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        let mentions = |words: &[String]| {
            words
                .iter()
                .any(|word| !word.is_empty() && text.contains(word.as_str()))
        };
        mentions(&self.verbs) && mentions(&self.nouns)
    }
}
