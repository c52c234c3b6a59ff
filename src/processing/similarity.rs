//! TF-IDF / cosine similarity between a resume and a job description

use crate::processing::normalizer::NormalizedText;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashSet};

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
        "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
        "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
        "each", "etc", "few", "for", "from", "further", "had", "has", "have", "having", "he",
        "her", "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in",
        "into", "is", "it", "its", "itself", "just", "me", "more", "most", "must", "my",
        "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other",
        "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should", "so",
        "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves",
        "then", "there", "these", "they", "this", "those", "through", "to", "too", "under",
        "until", "up", "very", "was", "we", "were", "what", "when", "where", "which", "while",
        "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
        "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Stateless TF-IDF matcher. Every call builds its vector space from the two
/// documents it is given and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityMatcher;

impl SimilarityMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Match score in [0, 100], rounded to one decimal place. Symmetric in
    /// its arguments; zero when either document has no indexable terms.
    pub fn match_score(&self, resume: &NormalizedText, job_description: &NormalizedText) -> f64 {
        let (resume_vec, job_vec) = tfidf_vectors(resume.as_str(), job_description.as_str());
        let similarity = cosine_similarity(&resume_vec, &job_vec);
        round_one_decimal((similarity * 100.0).clamp(0.0, 100.0))
    }
}

/// Whitespace tokens of normalized text without stop words. Leading and
/// trailing `.`/`-` are trimmed so sentence punctuation stays off the term,
/// while symbol-bearing terms such as `c++`, `c#` and `ci/cd` stay whole.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|token| match token.trim_matches(|c: char| c == '.' || c == '-') {
            "" => token,
            trimmed => trimmed,
        })
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Raw-count TF weighted by smoothed IDF, `ln((1 + n) / (1 + df)) + 1`, over
/// the two-document corpus. Both vectors share one sorted vocabulary.
pub fn tfidf_vectors(first: &str, second: &str) -> (Vec<f64>, Vec<f64>) {
    let first_counts = term_counts(first);
    let second_counts = term_counts(second);

    let vocabulary: Vec<&str> = first_counts
        .keys()
        .chain(second_counts.keys())
        .map(String::as_str)
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();

    let documents = 2.0_f64;
    let weigh = |counts: &BTreeMap<String, usize>| -> Vec<f64> {
        vocabulary
            .iter()
            .map(|term| {
                let df = usize::from(first_counts.contains_key(*term))
                    + usize::from(second_counts.contains_key(*term));
                let idf = ((1.0 + documents) / (1.0 + df as f64)).ln() + 1.0;
                counts.get(*term).copied().unwrap_or(0) as f64 * idf
            })
            .collect()
    };

    (weigh(&first_counts), weigh(&second_counts))
}

/// Cosine of the angle between two equally sized vectors; 0 when either has
/// zero magnitude.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

fn term_counts(text: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::normalizer::normalize;

    fn score(a: &str, b: &str) -> f64 {
        SimilarityMatcher::new().match_score(&normalize(a), &normalize(b))
    }

    #[test]
    fn test_tokenization_drops_stop_words() {
        let tokens = tokenize("the python developer with a flask and aws experience");

        assert_eq!(tokens, vec!["python", "developer", "flask", "aws", "experience"]);
        assert!(is_stop_word("the"));
        assert!(!is_stop_word("python"));
    }

    #[test]
    fn test_document_matches_itself() {
        assert_eq!(score("Rust engineer building search engines", "Rust engineer building search engines"), 100.0);
        assert_eq!(score("python python flask", "Python, python; FLASK!"), 100.0);
    }

    #[test]
    fn test_symmetric() {
        let pairs = [
            ("Python Flask AWS Docker", "Python developer with Flask, AWS, Kubernetes"),
            ("data engineer spark kafka", "spark streaming engineer"),
            ("", "anything at all"),
            ("go rust c++", "java kotlin"),
        ];
        for (a, b) in pairs {
            assert_eq!(score(a, b), score(b, a), "asymmetric for {:?} / {:?}", a, b);
        }
    }

    #[test]
    fn test_empty_or_stop_word_only_documents_score_zero() {
        assert_eq!(score("Python developer", ""), 0.0);
        assert_eq!(score("", "Python developer"), 0.0);
        assert_eq!(score("", ""), 0.0);
        assert_eq!(score("the and of", "the and of"), 0.0);
    }

    #[test]
    fn test_single_character_and_symbol_terms_are_kept() {
        assert_eq!(tokenize("r c++ c# ci/cd node.js"), vec!["r", "c++", "c#", "ci/cd", "node.js"]);
        assert_eq!(tokenize("rust. -go- ..."), vec!["rust", "go", "..."]);

        assert_eq!(score("R", "R"), 100.0);
        assert_eq!(score("C++ C#", "C++ C#"), 100.0);
        assert_eq!(score("x y z", "x y z"), 100.0);
    }

    #[test]
    fn test_symbol_bearing_terms_are_distinct() {
        let s = score("Senior C++ engineer", "Senior C# engineer");
        assert!(s > 0.0 && s < 100.0, "score was {}", s);
        assert_eq!(score("c++ engineer", "c# engineer"), score("c# engineer", "c++ engineer"));
    }

    #[test]
    fn test_disjoint_documents_score_zero() {
        assert_eq!(score("python flask", "kotlin android"), 0.0);
    }

    #[test]
    fn test_partial_overlap_in_range() {
        let s = score(
            "Python, Flask, React, AWS, Docker, Git experience",
            "Python developer with Flask, AWS, Kubernetes, and CI/CD experience",
        );
        assert!(s > 0.0 && s < 100.0, "score was {}", s);
        assert_eq!(s, (s * 10.0).round() / 10.0);
    }

    #[test]
    fn test_shared_terms_get_lower_idf() {
        let (a, b) = tfidf_vectors("rust rust go", "rust java");
        // vocabulary sorted: go, java, rust
        let unique_idf = (3.0_f64 / 2.0).ln() + 1.0;
        assert!((a[0] - unique_idf).abs() < 1e-12);
        assert_eq!(a[1], 0.0);
        assert!((a[2] - 2.0).abs() < 1e-12);
        assert!((b[1] - unique_idf).abs() < 1e-12);
        assert!((b[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_similarity() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 0.0], &[0.0, 1.0])).abs() < 1e-12);
        assert!((cosine_similarity(&[1.0, 2.0], &[2.0, 4.0]) - 1.0).abs() < 1e-12);
    }
}
