//! Field extractors for Indonesian district-court decisions.
//!
//! Each field has a pure extractor (`&str -> value`) driven by an ordered
//! [`PatternList`]; [`CaseExtractor`] runs all of them and assembles a
//! [`CaseRecord`]. Extractors never fail: a field no pattern recognizes keeps
//! its default value.

pub mod address;
pub mod case_number;
pub mod config;
pub mod decision_date;
pub mod defendant;
pub mod extractor;
pub mod judges;
pub mod location;
pub mod officials;
pub mod patterns;

pub use address::parse_address;
pub use case_number::extract_case_number;
pub use config::{ListOverride, ParsingConfig, ParsingConfigBuilder};
pub use decision_date::extract_decision_date;
pub use defendant::{extract_defendants, parse_defendant_section};
pub use extractor::CaseExtractor;
pub use judges::extract_judges;
pub use location::extract_court_location;
pub use officials::extract_officials;
pub use patterns::PatternList;
// Re-export domain types from core (canonical definitions live there)
pub use putusan_core::{CaseRecord, Provenance};
