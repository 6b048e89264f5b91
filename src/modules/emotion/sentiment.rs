/// Scores text polarity in `[-1.0, 1.0]`. Implementations must be
/// deterministic for a given input and return 0.0 when nothing can be said
/// about the text.
pub trait SentimentAnalyzer: Send + Sync {
    fn score(&self, text: &str) -> f32;
}

const POSITIVE: &[&str] = &[
    "love", "loved", "loves", "like", "likes", "liked", "great", "good", "wonderful", "happy",
    "glad", "joy", "joyful", "fun", "nice", "beautiful", "amazing", "awesome", "fantastic",
    "excellent", "best", "better", "thank", "thanks", "grateful", "friend", "friends", "calm",
    "warm", "kind", "sweet", "delighted", "excited", "proud", "hope", "hopeful", "pleasant",
    "perfect", "brilliant", "enjoy", "enjoyed", "smile", "smiling", "laugh", "laughed",
];

const NEGATIVE: &[&str] = &[
    "hate", "hated", "hates", "bad", "awful", "terrible", "horrible", "sad", "angry", "furious",
    "upset", "worried", "worry", "fear", "afraid", "scared", "wrong", "worst", "worse", "hurt",
    "pain", "painful", "cry", "crying", "lonely", "alone", "tired", "exhausted", "annoyed",
    "annoying", "disappointed", "disappointing", "betrayed", "betray", "sorry", "miserable",
    "dark", "broken", "lost", "unfair", "cruel", "stress", "stressed", "wary",
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "isnt", "arent", "wasnt", "werent", "dont", "doesnt",
    "didnt", "cant", "cannot", "couldnt", "wont", "wouldnt",
];

/// Lexicon-based analyzer. Sums word valences (a preceding negation flips a
/// hit) and squashes the raw total with `x / sqrt(x^2 + 15)` so the score
/// stays inside `[-1, 1]` regardless of text length.
#[derive(Debug, Default, Clone)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    pub fn new() -> Self {
        Self
    }
}

impl SentimentAnalyzer for LexiconSentiment {
    fn score(&self, text: &str) -> f32 {
        let tokens: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase().replace('\'', ""))
            .collect();

        if tokens.is_empty() {
            return 0.0;
        }

        let mut total = 0.0f32;
        for (i, token) in tokens.iter().enumerate() {
            let valence = if POSITIVE.contains(&token.as_str()) {
                1.0
            } else if NEGATIVE.contains(&token.as_str()) {
                -1.0
            } else {
                continue;
            };

            let negated = i > 0 && NEGATIONS.contains(&tokens[i - 1].as_str());
            total += if negated { -valence } else { valence };
        }

        if total == 0.0 {
            return 0.0;
        }
        (total / (total * total + 15.0).sqrt()).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{LexiconSentiment, SentimentAnalyzer};

    #[test]
    fn test_positive_text() {
        let analyzer = LexiconSentiment::new();
        assert!(analyzer.score("I love this!") > 0.0);
        assert!(analyzer.score("What a wonderful, happy day") > 0.0);
    }

    #[test]
    fn test_negative_text() {
        let analyzer = LexiconSentiment::new();
        assert!(analyzer.score("This is terrible and I hate it") < 0.0);
    }

    #[test]
    fn test_neutral_and_empty_text() {
        let analyzer = LexiconSentiment::new();
        assert_eq!(analyzer.score(""), 0.0);
        assert_eq!(analyzer.score("The meeting is at 3 PM"), 0.0);
    }

    #[test]
    fn test_negation_flips_valence() {
        let analyzer = LexiconSentiment::new();
        assert!(analyzer.score("this is not good") < 0.0);
        assert!(analyzer.score("I don't hate it") > 0.0);
    }

    #[test]
    fn test_deterministic() {
        let analyzer = LexiconSentiment::new();
        let a = analyzer.score("I love spending time with friends");
        let b = analyzer.score("I love spending time with friends");
        assert_eq!(a, b);
    }

    #[test]
    fn test_score_bounded() {
        let analyzer = LexiconSentiment::new();
        let flood = "love ".repeat(500);
        let score = analyzer.score(&flood);
        assert!((-1.0..=1.0).contains(&score));
    }
}
