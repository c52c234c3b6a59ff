//! Taxonomy-driven skill extraction

use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::ats_scorer::EMAIL_REGEX;
use crate::processing::normalizer::NormalizedText;
use crate::processing::taxonomy::SkillTaxonomy;
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Scans normalized text for every keyword of a taxonomy in one pass.
pub struct SkillExtractor {
    matcher: AhoCorasick,
    taxonomy: SkillTaxonomy,
    /// Pattern id -> (category index, keyword index)
    patterns: Vec<(usize, usize)>,
}

/// Skills found for one category, in taxonomy order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySkills {
    pub category: String,
    pub skills: Vec<String>,
}

/// Categorized skills found in one text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillInventory {
    pub categories: Vec<CategorySkills>,
    pub total_skills_found: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSummary {
    pub total_skills_found: usize,
    pub by_category: Vec<CategoryCount>,
}

impl SkillInventory {
    /// Skills found for a category, `None` if the taxonomy has no such category.
    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.skills.as_slice())
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.skills.iter().any(|s| s == skill))
    }

    pub fn is_empty(&self) -> bool {
        self.total_skills_found == 0
    }

    /// All found skills in taxonomy order, without duplicates.
    pub fn flatten(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.categories
            .iter()
            .flat_map(|c| c.skills.iter())
            .filter(|s| seen.insert(s.as_str()))
            .cloned()
            .collect()
    }

    pub fn summary(&self) -> SkillSummary {
        SkillSummary {
            total_skills_found: self.total_skills_found,
            by_category: self
                .categories
                .iter()
                .map(|c| CategoryCount {
                    category: c.category.clone(),
                    count: c.skills.len(),
                })
                .collect(),
        }
    }
}

impl SkillExtractor {
    pub fn new(taxonomy: SkillTaxonomy) -> Result<Self> {
        let mut keywords = Vec::with_capacity(taxonomy.keyword_count());
        let mut patterns = Vec::with_capacity(taxonomy.keyword_count());

        for (category_idx, category) in taxonomy.categories().iter().enumerate() {
            for (keyword_idx, keyword) in category.keywords.iter().enumerate() {
                keywords.push(keyword.as_str());
                patterns.push((category_idx, keyword_idx));
            }
        }

        // Standard semantics so overlapping search reports every candidate;
        // boundaries are checked afterwards per keyword.
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&keywords)
            .map_err(|e| {
                ResumeAnalyzerError::Processing(format!("Failed to build skill matcher: {}", e))
            })?;

        Ok(Self {
            matcher,
            taxonomy,
            patterns,
        })
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    /// Extract the categorized skill inventory of a normalized text.
    /// Email addresses are blanked first so their user and host parts
    /// (`r.swift@go.dev`) never count as skills.
    pub fn extract(&self, text: &NormalizedText) -> SkillInventory {
        let masked = EMAIL_REGEX.replace_all(text.as_str(), " ");
        let haystack: &str = &masked;
        let mut found = vec![false; self.patterns.len()];

        for mat in self.matcher.find_overlapping_iter(haystack) {
            let pattern = mat.pattern().as_usize();
            if found[pattern] {
                continue;
            }
            let (category_idx, keyword_idx) = self.patterns[pattern];
            let keyword = &self.taxonomy.categories()[category_idx].keywords[keyword_idx];
            if is_bounded(haystack, mat.start(), mat.end(), keyword) {
                found[pattern] = true;
            }
        }

        let mut flags = found.into_iter();
        let categories: Vec<CategorySkills> = self
            .taxonomy
            .categories()
            .iter()
            .map(|category| CategorySkills {
                category: category.name.clone(),
                skills: category
                    .keywords
                    .iter()
                    .filter(|_| flags.next().unwrap_or(false))
                    .cloned()
                    .collect(),
            })
            .collect();

        let total_skills_found = categories.iter().map(|c| c.skills.len()).sum();

        SkillInventory {
            categories,
            total_skills_found,
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Word-boundary check on the sides of the keyword that end in a word
/// character. A symbol edge (`c++`, `.net`) has no natural boundary and is
/// accepted as a literal match on that side.
fn is_bounded(text: &str, start: usize, end: usize, keyword: &str) -> bool {
    let leading_ok = match keyword.chars().next() {
        Some(first) if is_word_char(first) => text[..start]
            .chars()
            .next_back()
            .map_or(true, |prev| !is_word_char(prev)),
        _ => true,
    };

    let trailing_ok = match keyword.chars().next_back() {
        Some(last) if is_word_char(last) => text[end..]
            .chars()
            .next()
            .map_or(true, |next| !is_word_char(next)),
        _ => true,
    };

    leading_ok && trailing_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::normalizer::normalize;
    use crate::processing::taxonomy::SkillCategory;

    fn extractor() -> SkillExtractor {
        SkillExtractor::new(SkillTaxonomy::builtin()).unwrap()
    }

    #[test]
    fn test_extracts_categorized_skills() {
        let inventory = extractor().extract(&normalize(
            "Built APIs in Python and Flask, deployed on AWS with Docker. React front end, Git.",
        ));

        assert_eq!(inventory.get("Programming Languages").unwrap(), &["python"]);
        assert_eq!(inventory.get("Web Frameworks").unwrap(), &["react", "flask"]);
        assert_eq!(inventory.get("Cloud Platforms").unwrap(), &["aws"]);
        assert_eq!(inventory.get("DevOps Tools").unwrap(), &["docker", "git"]);
        assert_eq!(inventory.total_skills_found, 6);
    }

    #[test]
    fn test_single_letter_keyword_needs_word_boundary() {
        let extractor = extractor();

        let inventory = extractor.extract(&normalize("Your career in our company"));
        assert!(!inventory.contains("r"));

        let inventory = extractor.extract(&normalize("Statistics in R and MATLAB"));
        assert!(inventory.contains("r"));
        assert!(inventory.contains("matlab"));
    }

    #[test]
    fn test_no_partial_word_matches() {
        let inventory = extractor().extract(&normalize("JavaScript and TypeScript developer"));

        assert!(inventory.contains("javascript"));
        assert!(inventory.contains("typescript"));
        assert!(!inventory.contains("java"));
        assert!(!inventory.contains("scala"));
    }

    #[test]
    fn test_symbol_bearing_keywords() {
        let inventory = extractor().extract(&normalize(
            "Worked with C++, C# and Node.js; owned the CI/CD pipeline",
        ));

        assert!(inventory.contains("c++"));
        assert!(inventory.contains("c#"));
        assert!(inventory.contains("node.js"));
        assert!(inventory.contains("ci/cd"));
    }

    #[test]
    fn test_symbol_keyword_still_checks_its_word_edge() {
        let inventory = extractor().extract(&normalize("abc++ and node.jsx"));

        assert!(!inventory.contains("c++"));
        assert!(!inventory.contains("node.js"));
    }

    #[test]
    fn test_email_addresses_are_not_skills() {
        let inventory = extractor().extract(&normalize("Contact: r.swift@go.rust-lang.org"));
        assert!(inventory.is_empty());

        let inventory = extractor().extract(&normalize("Rust developer, python.dev@example.com"));
        assert_eq!(inventory.flatten(), vec!["rust"]);
    }

    #[test]
    fn test_multi_word_keywords() {
        let inventory = extractor().extract(&normalize(
            "Machine\nLearning and deep   learning on Google Cloud",
        ));

        assert!(inventory.contains("machine learning"));
        assert!(inventory.contains("deep learning"));
        assert!(inventory.contains("google cloud"));
    }

    #[test]
    fn test_found_once_regardless_of_occurrences() {
        let inventory = extractor().extract(&normalize("python python PYTHON python3 python"));

        assert_eq!(inventory.get("Programming Languages").unwrap(), &["python"]);
        assert_eq!(inventory.total_skills_found, 1);
    }

    #[test]
    fn test_order_follows_taxonomy_not_text() {
        let inventory = extractor().extract(&normalize("rust then go then python"));

        assert_eq!(
            inventory.get("Programming Languages").unwrap(),
            &["python", "go", "rust"]
        );
    }

    #[test]
    fn test_empty_text_yields_empty_inventory() {
        let taxonomy = SkillTaxonomy::builtin();
        let inventory = extractor().extract(&normalize(""));

        assert_eq!(inventory.total_skills_found, 0);
        assert!(inventory.is_empty());
        assert_eq!(inventory.categories.len(), taxonomy.categories().len());
        assert!(inventory.categories.iter().all(|c| c.skills.is_empty()));
    }

    #[test]
    fn test_deterministic() {
        let extractor = extractor();
        let text = normalize("Kubernetes, Terraform, Postgresql, Redis, Jira, Scrum");

        assert_eq!(extractor.extract(&text), extractor.extract(&text));
    }

    #[test]
    fn test_flatten_and_summary() {
        let inventory = extractor().extract(&normalize("Python, Docker, Linux, Docker"));

        assert_eq!(inventory.flatten(), vec!["python", "docker", "linux"]);

        let summary = inventory.summary();
        assert_eq!(summary.total_skills_found, 3);
        assert_eq!(summary.by_category.len(), 7);
        assert_eq!(summary.by_category[0].count, 1);
        assert_eq!(summary.by_category[4].count, 1);
        assert_eq!(summary.by_category[6].count, 1);
    }

    #[test]
    fn test_custom_taxonomy() {
        let taxonomy = SkillTaxonomy::from_categories(vec![SkillCategory {
            name: "Streaming".to_string(),
            keywords: vec!["Kafka".to_string(), "Flink".to_string()],
        }])
        .unwrap();
        let extractor = SkillExtractor::new(taxonomy).unwrap();

        let inventory = extractor.extract(&normalize("Kafka consumers and Python"));
        assert_eq!(inventory.get("Streaming").unwrap(), &["kafka"]);
        assert_eq!(inventory.total_skills_found, 1);
        assert!(inventory.get("Programming Languages").is_none());
    }
}
