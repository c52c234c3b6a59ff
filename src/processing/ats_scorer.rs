//! ATS (Applicant Tracking System) heuristic scoring
//!
//! Three structural checks, each capped so the maximum adds up to 100:
//! document length (20), expected sections (40) and contact details (40).

use crate::processing::normalizer::NormalizedText;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const LENGTH_WEIGHT: f64 = 20.0;
pub const SECTION_WEIGHT: f64 = 8.0;
pub const EMAIL_WEIGHT: f64 = 20.0;
pub const PHONE_WEIGHT: f64 = 20.0;

/// Word counts inside this band earn the full length weight.
pub const IDEAL_WORD_RANGE: (usize, usize) = (400, 1000);

pub(crate) static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}").expect("Invalid email regex")
});

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[ .-]?)?\b\d{3}[ .-]?\d{3}[ .-]?\d{4}\b")
        .expect("Invalid phone regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResumeSection {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
}

impl ResumeSection {
    pub const ALL: [ResumeSection; 5] = [
        ResumeSection::Summary,
        ResumeSection::Experience,
        ResumeSection::Education,
        ResumeSection::Skills,
        ResumeSection::Projects,
    ];

    /// Header words that mark the section.
    fn markers(&self) -> &'static [&'static str] {
        match self {
            ResumeSection::Summary => &["summary", "objective", "profile", "about me"],
            ResumeSection::Experience => &[
                "experience",
                "employment",
                "work history",
                "professional background",
            ],
            ResumeSection::Education => &["education", "academic", "qualifications"],
            ResumeSection::Skills => &["skills", "competencies", "technologies", "expertise"],
            ResumeSection::Projects => &["projects", "portfolio"],
        }
    }

    fn is_present(&self, text: &str) -> bool {
        self.markers().iter().any(|marker| contains_word(text, marker))
    }
}

impl fmt::Display for ResumeSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResumeSection::Summary => write!(f, "Summary"),
            ResumeSection::Experience => write!(f, "Experience"),
            ResumeSection::Education => write!(f, "Education"),
            ResumeSection::Skills => write!(f, "Skills"),
            ResumeSection::Projects => write!(f, "Projects"),
        }
    }
}

/// Outcome of the ATS heuristics. `score` is the contract; the rest
/// records how it was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsReport {
    pub score: u8,
    pub word_count: usize,
    pub length_points: f64,
    pub sections_found: Vec<ResumeSection>,
    pub missing_sections: Vec<ResumeSection>,
    pub section_points: f64,
    pub has_email: bool,
    pub has_phone: bool,
    pub contact_points: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AtsScorer;

impl AtsScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, text: &NormalizedText) -> AtsReport {
        let word_count = text.word_count();
        let length_points = length_points(word_count);

        let (sections_found, missing_sections): (Vec<_>, Vec<_>) = ResumeSection::ALL
            .into_iter()
            .partition(|section| section.is_present(text.as_str()));
        let section_points = sections_found.len() as f64 * SECTION_WEIGHT;

        let has_email = EMAIL_REGEX.is_match(text.as_str());
        let has_phone = PHONE_REGEX.is_match(text.as_str());
        let mut contact_points = 0.0;
        if has_email {
            contact_points += EMAIL_WEIGHT;
        }
        if has_phone {
            contact_points += PHONE_WEIGHT;
        }

        let total = (length_points + section_points + contact_points).round();
        let score = total.clamp(0.0, 100.0) as u8;

        AtsReport {
            score,
            word_count,
            length_points,
            sections_found,
            missing_sections,
            section_points,
            has_email,
            has_phone,
            contact_points,
        }
    }
}

/// Full weight inside the ideal band, decaying linearly with the distance to
/// the nearest edge (relative to that edge) and floored at zero.
fn length_points(word_count: usize) -> f64 {
    let (low, high) = IDEAL_WORD_RANGE;
    let ratio = if word_count < low {
        word_count as f64 / low as f64
    } else if word_count > high {
        1.0 - (word_count - high) as f64 / high as f64
    } else {
        1.0
    };
    LENGTH_WEIGHT * ratio.max(0.0)
}

fn contains_word(text: &str, word: &str) -> bool {
    text.match_indices(word).any(|(start, _)| {
        let end = start + word.len();
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        before.map_or(true, |c| !c.is_alphanumeric()) && after.map_or(true, |c| !c.is_alphanumeric())
    })
}
