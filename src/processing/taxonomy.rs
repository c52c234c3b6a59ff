//! Skill taxonomy: the fixed category to keyword lookup table

use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::normalizer::normalize;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A named group of canonical skill keywords, in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Immutable, ordered set of skill categories.
///
/// Keywords are stored normalized, unique within the whole taxonomy, so a
/// keyword belongs to exactly one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillTaxonomy {
    categories: Vec<SkillCategory>,
}

#[derive(Debug, Deserialize)]
struct TaxonomyFile {
    categories: Vec<SkillCategory>,
}

const BUILTIN_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Programming Languages",
        &[
            "python", "java", "javascript", "typescript", "c++", "c#", "go", "rust", "php",
            "ruby", "swift", "kotlin", "scala", "r", "matlab", "sql", "html", "css", "bash",
            "shell",
        ],
    ),
    (
        "Web Frameworks",
        &[
            "react", "vue", "angular", "flask", "django", "fastapi", "express", "spring",
            "springboot", "node.js", "nodejs", "nextjs", "svelte", "nuxt",
        ],
    ),
    (
        "Databases",
        &[
            "postgresql", "mysql", "mongodb", "redis", "cassandra", "sqlite", "oracle",
            "elasticsearch", "dynamodb", "firestore", "neo4j",
        ],
    ),
    (
        "Cloud Platforms",
        &["aws", "azure", "gcp", "google cloud", "heroku", "digitalocean"],
    ),
    (
        "DevOps Tools",
        &[
            "docker", "kubernetes", "jenkins", "gitlab", "github", "terraform", "ansible",
            "ci/cd", "git", "docker", "prometheus", "grafana",
        ],
    ),
    (
        "AI/ML",
        &[
            "machine learning", "tensorflow", "pytorch", "scikit-learn", "nlp",
            "deep learning", "spacy", "keras", "huggingface", "openai", "gemini", "llm",
            "bert", "gpt",
        ],
    ),
    (
        "Other Tools",
        &[
            "git", "linux", "windows", "macos", "agile", "scrum", "jira", "confluence",
            "slack", "rest api", "graphql", "postman",
        ],
    ),
];

impl SkillTaxonomy {
    /// The taxonomy compiled into the binary.
    pub fn builtin() -> Self {
        let categories = BUILTIN_CATEGORIES
            .iter()
            .map(|(name, keywords)| SkillCategory {
                name: name.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            })
            .collect();

        Self::from_categories(categories).expect("Invalid built-in skill taxonomy")
    }

    /// Build a taxonomy from raw categories, normalizing and deduplicating keywords.
    pub fn from_categories(raw: Vec<SkillCategory>) -> Result<Self> {
        if raw.is_empty() {
            return Err(ResumeAnalyzerError::InvalidTaxonomy(
                "taxonomy defines no categories".to_string(),
            ));
        }

        let mut claimed: HashSet<String> = HashSet::new();
        let mut categories = Vec::with_capacity(raw.len());

        for category in raw {
            let name = category.name.trim().to_string();
            if name.is_empty() {
                return Err(ResumeAnalyzerError::InvalidTaxonomy(
                    "category with a blank name".to_string(),
                ));
            }

            let mut keywords = Vec::new();
            for keyword in &category.keywords {
                let normalized = normalize(keyword).into_string();
                if normalized.is_empty() {
                    return Err(ResumeAnalyzerError::InvalidTaxonomy(format!(
                        "category '{}' contains a blank keyword",
                        name
                    )));
                }
                if claimed.insert(normalized.clone()) {
                    keywords.push(normalized);
                } else {
                    debug!("Keyword '{}' already claimed, skipping in '{}'", normalized, name);
                }
            }

            if keywords.is_empty() {
                return Err(ResumeAnalyzerError::InvalidTaxonomy(format!(
                    "category '{}' has no unique keywords",
                    name
                )));
            }

            categories.push(SkillCategory { name, keywords });
        }

        Ok(Self { categories })
    }

    /// Parse a taxonomy from TOML (`[[categories]]` tables with `name` and `keywords`).
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: TaxonomyFile = toml::from_str(content).map_err(|e| {
            ResumeAnalyzerError::InvalidTaxonomy(format!("Failed to parse taxonomy: {}", e))
        })?;
        Self::from_categories(file.categories)
    }

    /// Load a taxonomy file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let taxonomy = Self::from_toml_str(&content)?;
        debug!(
            "Loaded taxonomy from {} ({} categories, {} keywords)",
            path.display(),
            taxonomy.categories.len(),
            taxonomy.keyword_count()
        );
        Ok(taxonomy)
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    pub fn all_keywords(&self) -> HashSet<&str> {
        self.keywords().collect()
    }

    /// Every keyword in declared order: category by category.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .flat_map(|c| c.keywords.iter().map(String::as_str))
    }

    pub fn keyword_count(&self) -> usize {
        self.categories.iter().map(|c| c.keywords.len()).sum()
    }
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}
