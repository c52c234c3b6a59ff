//! Analysis engine combining skill extraction, ATS heuristics and TF-IDF matching

use crate::config::Config;
use crate::error::Result;
use crate::processing::ats_scorer::{AtsReport, AtsScorer};
use crate::processing::normalizer::{normalize, NormalizedText};
use crate::processing::similarity::SimilarityMatcher;
use crate::processing::skill_extractor::{SkillExtractor, SkillInventory};
use crate::processing::taxonomy::SkillTaxonomy;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MISSING_SKILLS_LIMIT: usize = 10;

/// Fewer skills than this caps the strength label at `Fair`.
pub const MIN_SKILLS_FOR_STRONG_LABELS: usize = 3;

/// Coordinates every scoring component over one resume / job pair.
pub struct AnalysisEngine {
    skill_extractor: SkillExtractor,
    ats_scorer: AtsScorer,
    matcher: SimilarityMatcher,
    missing_skills_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Cosine similarity as a percentage, one decimal place
    pub job_match_score: f64,
    pub ats_score: u8,
    pub resume_strength: ResumeStrength,
    pub skills_found: SkillInventory,
    pub missing_skills: MissingSkills,
    pub recommendation: String,
    pub ats_breakdown: AtsReport,
}

/// Job description skills absent from the resume. `count` is the full
/// number; `list` is capped for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingSkills {
    pub count: usize,
    pub list: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResumeStrength {
    NeedsImprovement,
    Fair,
    Good,
    Strong,
}

impl ResumeStrength {
    /// Bands on the ATS score: 80 / 60 / 40. A resume listing fewer than
    /// [`MIN_SKILLS_FOR_STRONG_LABELS`] skills never rates above `Fair`.
    pub fn assess(ats_score: u8, total_skills_found: usize) -> Self {
        let by_ats = match ats_score {
            80..=u8::MAX => ResumeStrength::Strong,
            60..=79 => ResumeStrength::Good,
            40..=59 => ResumeStrength::Fair,
            _ => ResumeStrength::NeedsImprovement,
        };

        if total_skills_found < MIN_SKILLS_FOR_STRONG_LABELS {
            by_ats.min(ResumeStrength::Fair)
        } else {
            by_ats
        }
    }
}

impl fmt::Display for ResumeStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResumeStrength::NeedsImprovement => write!(f, "Needs Improvement"),
            ResumeStrength::Fair => write!(f, "Fair"),
            ResumeStrength::Good => write!(f, "Good"),
            ResumeStrength::Strong => write!(f, "Strong"),
        }
    }
}

impl AnalysisEngine {
    pub fn new(taxonomy: SkillTaxonomy, missing_skills_limit: usize) -> Result<Self> {
        Ok(Self {
            skill_extractor: SkillExtractor::new(taxonomy)?,
            ats_scorer: AtsScorer::new(),
            matcher: SimilarityMatcher::new(),
            missing_skills_limit,
        })
    }

    /// Engine over the built-in taxonomy with the default missing-skills cap.
    pub fn with_defaults() -> Result<Self> {
        Self::new(SkillTaxonomy::builtin(), DEFAULT_MISSING_SKILLS_LIMIT)
    }

    /// Engine honoring `analysis.taxonomy_path` and `analysis.missing_skills_limit`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let taxonomy = match &config.analysis.taxonomy_path {
            Some(path) => SkillTaxonomy::load(path)?,
            None => SkillTaxonomy::builtin(),
        };
        Self::new(taxonomy, config.analysis.missing_skills_limit)
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        self.skill_extractor.taxonomy()
    }

    pub fn extract_skills(&self, raw: &str) -> SkillInventory {
        self.skill_extractor.extract(&normalize(raw))
    }

    pub fn ats_report(&self, raw: &str) -> AtsReport {
        self.ats_scorer.score(&normalize(raw))
    }

    pub fn match_score(&self, resume: &str, job_description: &str) -> f64 {
        self.matcher
            .match_score(&normalize(resume), &normalize(job_description))
    }

    /// Full report for one resume against one job description. Never fails:
    /// empty inputs give a report with minimum scores.
    pub fn analyze(&self, resume_text: &str, job_description_text: &str) -> AnalysisReport {
        let resume = normalize(resume_text);
        let job = normalize(job_description_text);
        debug!(
            "Normalized resume: {} words, job description: {} words",
            resume.word_count(),
            job.word_count()
        );

        let skills_found = self.skill_extractor.extract(&resume);
        let job_skills = self.skill_extractor.extract(&job);
        debug!(
            "Skills found: resume {}, job description {}",
            skills_found.total_skills_found, job_skills.total_skills_found
        );

        let missing_skills = self.missing_skills(&skills_found, &job_skills);

        let ats_breakdown = self.ats_scorer.score(&resume);
        let ats_score = ats_breakdown.score;
        debug!(
            "ATS score {} (length {:.1}, sections {:.1}, contact {:.1})",
            ats_score,
            ats_breakdown.length_points,
            ats_breakdown.section_points,
            ats_breakdown.contact_points
        );

        let job_match_score = self.match_normalized(&resume, &job);
        debug!("Job match score {:.1}", job_match_score);

        let resume_strength = ResumeStrength::assess(ats_score, skills_found.total_skills_found);
        let recommendation = recommendation(job_match_score, ats_score, missing_skills.count);

        AnalysisReport {
            job_match_score,
            ats_score,
            resume_strength,
            skills_found,
            missing_skills,
            recommendation,
            ats_breakdown,
        }
    }

    fn match_normalized(&self, resume: &NormalizedText, job: &NormalizedText) -> f64 {
        self.matcher.match_score(resume, job)
    }

    fn missing_skills(&self, resume: &SkillInventory, job: &SkillInventory) -> MissingSkills {
        let missing: Vec<String> = job
            .flatten()
            .into_iter()
            .filter(|skill| !resume.contains(skill))
            .collect();

        MissingSkills {
            count: missing.len(),
            list: missing.into_iter().take(self.missing_skills_limit).collect(),
        }
    }
}

/// Deterministic advice text from the two scores and the missing-skill count.
pub fn recommendation(job_match_score: f64, ats_score: u8, missing_skills: usize) -> String {
    let headline = if job_match_score >= 80.0 && ats_score >= 80 {
        "Excellent match! Your resume aligns well with the job."
    } else if job_match_score >= 60.0 && ats_score >= 60 {
        "Good match! Consider adding more relevant skills."
    } else if job_match_score >= 40.0 {
        "Fair match. Add more skills from the job description."
    } else {
        "Low match. Significant skill improvements needed."
    };

    let mut text = format!(
        "{} Job match {:.1}%, ATS score {}/100.",
        headline, job_match_score, ats_score
    );

    match missing_skills {
        0 => text.push_str(" Your resume covers every skill the job description names."),
        1 => text.push_str(" 1 skill from the job description is missing from your resume."),
        n => text.push_str(&format!(
            " {} skills from the job description are missing from your resume.",
            n
        )),
    }

    if ats_score < 60 {
        text.push_str(" Use standard section headings and include an email and phone number.");
    }

    text
}
