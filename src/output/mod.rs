//! Report rendering: console, JSON, Markdown and HTML

pub mod report;
pub mod formatter;
