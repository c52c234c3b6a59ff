//! Scoring engine: normalization, skill extraction, ATS heuristics and matching

pub mod normalizer;
pub mod taxonomy;
pub mod skill_extractor;
pub mod ats_scorer;
pub mod similarity;
pub mod analyzer;
