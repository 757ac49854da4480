//! Subject and proficiency-level vocabulary
//!
//! The three assessed subjects each map to one `<subject>_level` column in
//! `student_performance`. Levels L0–L5 carry a numeric score (L0=0 … L5=5)
//! and collapse into three coarser reporting categories. The SQL fragments
//! used by the aggregate queries are generated from these definitions so the
//! mapping lives in exactly one place.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A subject path segment that did not match any assessed subject
#[derive(Debug, Clone, Error)]
#[error("Invalid subject: {0}")]
pub struct InvalidSubject(pub String);

/// One of the three assessed subjects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Reading,
    Writing,
    Numeracy,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::Reading, Subject::Writing, Subject::Numeracy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Reading => "reading",
            Subject::Writing => "writing",
            Subject::Numeracy => "numeracy",
        }
    }

    /// Column in `student_performance` holding this subject's level
    pub fn level_column(&self) -> &'static str {
        match self {
            Subject::Reading => "reading_level",
            Subject::Writing => "writing_level",
            Subject::Numeracy => "numeracy_level",
        }
    }
}

impl FromStr for Subject {
    type Err = InvalidSubject;

    /// Case-insensitive, so `/levels/Reading` and `/levels/reading` agree
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reading" => Ok(Subject::Reading),
            "writing" => Ok(Subject::Writing),
            "numeracy" => Ok(Subject::Numeracy),
            _ => Err(InvalidSubject(s.to_string())),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proficiency level recorded for a subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    L0,
    L1,
    L2,
    L3,
    L4,
    L5,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::L0,
        Level::L1,
        Level::L2,
        Level::L3,
        Level::L4,
        Level::L5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::L0 => "L0",
            Level::L1 => "L1",
            Level::L2 => "L2",
            Level::L3 => "L3",
            Level::L4 => "L4",
            Level::L5 => "L5",
        }
    }

    /// Numeric score used by the ward-average aggregate
    pub fn score(&self) -> i32 {
        match self {
            Level::L0 => 0,
            Level::L1 => 1,
            Level::L2 => 2,
            Level::L3 => 3,
            Level::L4 => 4,
            Level::L5 => 5,
        }
    }

    /// Reporting category this level collapses into
    pub fn category(&self) -> Category {
        match self {
            Level::L0 | Level::L1 | Level::L2 => Category::NeedsImprovement,
            Level::L3 | Level::L4 => Category::DevelopingStage,
            Level::L5 => Category::Mainstream,
        }
    }
}

/// Coarse reporting category for chart breakdowns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    NeedsImprovement,
    DevelopingStage,
    Mainstream,
}

impl Category {
    /// Alphabetical by label, the order `ORDER BY category` produces
    pub const ALL: [Category; 3] = [
        Category::DevelopingStage,
        Category::Mainstream,
        Category::NeedsImprovement,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::NeedsImprovement => "Needs Improvement",
            Category::DevelopingStage => "Developing Stage",
            Category::Mainstream => "Mainstream",
        }
    }
}

/// `('L0','L1','L2','L3','L4','L5')` for `IN` predicates
pub fn valid_level_list() -> String {
    let quoted: Vec<String> = Level::ALL.iter().map(|l| format!("'{}'", l.as_str())).collect();
    format!("({})", quoted.join(","))
}

/// `CASE` expression mapping a level column to its category label
pub fn category_case(column: &str) -> String {
    let mut expr = String::from("CASE");
    for category in Category::ALL {
        let levels: Vec<String> = Level::ALL
            .iter()
            .filter(|l| l.category() == category)
            .map(|l| format!("'{}'", l.as_str()))
            .collect();
        expr.push_str(&format!(
            " WHEN {} IN ({}) THEN '{}'",
            column,
            levels.join(","),
            category.label()
        ));
    }
    expr.push_str(" END");
    expr
}

/// `CASE` expression mapping a level column to its numeric score
pub fn score_case(column: &str) -> String {
    let mut expr = format!("CASE {}", column);
    for level in Level::ALL {
        expr.push_str(&format!(" WHEN '{}' THEN {}", level.as_str(), level.score()));
    }
    expr.push_str(" END");
    expr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_parse_case_insensitive() {
        assert_eq!("reading".parse::<Subject>().ok(), Some(Subject::Reading));
        assert_eq!("READING".parse::<Subject>().ok(), Some(Subject::Reading));
        assert_eq!("Numeracy".parse::<Subject>().ok(), Some(Subject::Numeracy));
        assert_eq!("wRiTiNg".parse::<Subject>().ok(), Some(Subject::Writing));
    }

    #[test]
    fn test_subject_parse_invalid() {
        assert!("science".parse::<Subject>().is_err());
        assert!("".parse::<Subject>().is_err());
        assert!("reading_level".parse::<Subject>().is_err());
    }

    #[test]
    fn test_level_columns() {
        assert_eq!(Subject::Reading.level_column(), "reading_level");
        assert_eq!(Subject::Writing.level_column(), "writing_level");
        assert_eq!(Subject::Numeracy.level_column(), "numeracy_level");
    }

    #[test]
    fn test_level_scores_ascend() {
        let scores: Vec<i32> = Level::ALL.iter().map(Level::score).collect();
        assert_eq!(scores, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_level_ordering_matches_string_ordering() {
        // GROUP BY <level> ORDER BY <level> sorts the text values; the enum
        // order must agree so both views report levels in the same sequence.
        let mut strings: Vec<&str> = Level::ALL.iter().map(Level::as_str).collect();
        let sorted = strings.clone();
        strings.sort_unstable();
        assert_eq!(strings, sorted);
    }

    #[test]
    fn test_category_mapping() {
        assert_eq!(Level::L0.category(), Category::NeedsImprovement);
        assert_eq!(Level::L1.category(), Category::NeedsImprovement);
        assert_eq!(Level::L2.category(), Category::NeedsImprovement);
        assert_eq!(Level::L3.category(), Category::DevelopingStage);
        assert_eq!(Level::L4.category(), Category::DevelopingStage);
        assert_eq!(Level::L5.category(), Category::Mainstream);
    }

    #[test]
    fn test_category_labels_sorted_alphabetically() {
        // The breakdown endpoint orders by label; ALL is declared in the
        // same order so the enum can be used to reason about responses.
        let labels: Vec<&str> = Category::ALL.iter().map(Category::label).collect();
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        assert_eq!(labels, sorted);
    }

    #[test]
    fn test_valid_level_list() {
        assert_eq!(valid_level_list(), "('L0','L1','L2','L3','L4','L5')");
    }

    #[test]
    fn test_category_case_expression() {
        let expr = category_case("reading_level");
        assert!(expr.starts_with("CASE"));
        assert!(expr.ends_with("END"));
        assert!(expr.contains("WHEN reading_level IN ('L0','L1','L2') THEN 'Needs Improvement'"));
        assert!(expr.contains("WHEN reading_level IN ('L3','L4') THEN 'Developing Stage'"));
        assert!(expr.contains("WHEN reading_level IN ('L5') THEN 'Mainstream'"));
    }

    #[test]
    fn test_score_case_expression() {
        let expr = score_case("numeracy_level");
        assert!(expr.starts_with("CASE numeracy_level"));
        assert!(expr.contains("WHEN 'L0' THEN 0"));
        assert!(expr.contains("WHEN 'L5' THEN 5"));
        assert!(expr.ends_with("END"));
    }
}
