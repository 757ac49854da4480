//! Predicate composition for student queries
//!
//! Two predicate builders live here. [`StudentFilter`] drives the paginated
//! listing: case-insensitive substring matches joined with `AND`, one bound
//! parameter per present filter. [`AggregateScope`] narrows the level
//! distribution by exact class/ward equality; the same scope is pushed into
//! both the numerator and the denominator of a percentage query, which is
//! what keeps the returned percentages summing to 100.

use sqlx::{Postgres, QueryBuilder};

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Sparse filter set for the paginated student listing
///
/// Absent or empty-string values place no constraint on the query, which is
/// how the UI submits an untouched filter form.
#[derive(Debug, Default, Clone)]
pub struct StudentFilter {
    pub student_name: Option<String>,
    pub ward: Option<String>,
    pub school_name: Option<String>,
    pub medium: Option<String>,
    pub class: Option<String>,
}

impl StudentFilter {
    /// Column/value pairs in a fixed order so bind positions are stable
    fn entries(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("student_name", present(&self.student_name)),
            ("ward", present(&self.ward)),
            ("school_name", present(&self.school_name)),
            ("medium", present(&self.medium)),
            // "class" is a reserved word in Postgres and must stay quoted
            ("\"class\"", present(&self.class)),
        ]
    }

    /// Append `WHERE col ILIKE $n AND ...` for every present filter
    ///
    /// Emits nothing at all when every filter is absent; the caller's base
    /// query must therefore not assume a trailing `WHERE`.
    pub fn apply(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        let mut sep = " WHERE ";
        for (column, value) in self.entries() {
            if let Some(v) = value {
                qb.push(sep);
                qb.push(column);
                qb.push(" ILIKE ");
                qb.push_bind(format!("%{v}%"));
                sep = " AND ";
            }
        }
    }
}

/// Exact-match scoping for the level-distribution aggregate
///
/// Unlike [`StudentFilter`] this matches whole values, mirroring how the
/// dashboard's class/ward dropdowns submit canonical values rather than
/// search text.
#[derive(Debug, Default, Clone)]
pub struct AggregateScope {
    pub class: Option<String>,
    pub ward: Option<String>,
}

impl AggregateScope {
    /// Append ` AND "class" = $n` / ` AND ward = $n` conditions
    ///
    /// The caller already has a `WHERE` in place. Called once for the
    /// numerator and once for the denominator subquery of the same
    /// statement so the two predicates cannot drift apart.
    pub fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        if let Some(class) = present(&self.class) {
            qb.push(" AND \"class\" = ");
            qb.push_bind(class.to_owned());
        }
        if let Some(ward) = present(&self.ward) {
            qb.push(" AND ward = ");
            qb.push_bind(ward.to_owned());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built_sql(filter: &StudentFilter) -> String {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM student_performance");
        filter.apply(&mut qb);
        qb.sql().to_string()
    }

    #[test]
    fn test_no_filters_emits_no_where() {
        let filter = StudentFilter::default();
        assert_eq!(built_sql(&filter), "SELECT COUNT(*) FROM student_performance");
    }

    #[test]
    fn test_empty_strings_are_not_constraints() {
        let filter = StudentFilter {
            student_name: Some(String::new()),
            ward: Some(String::new()),
            ..Default::default()
        };
        assert!(!built_sql(&filter).contains("WHERE"));
    }

    #[test]
    fn test_single_filter() {
        let filter = StudentFilter {
            ward: Some("North".to_string()),
            ..Default::default()
        };
        assert_eq!(
            built_sql(&filter),
            "SELECT COUNT(*) FROM student_performance WHERE ward ILIKE $1"
        );
    }

    #[test]
    fn test_filters_joined_with_and() {
        let filter = StudentFilter {
            student_name: Some("ana".to_string()),
            school_name: Some("primary".to_string()),
            medium: Some("English".to_string()),
            ..Default::default()
        };
        assert_eq!(
            built_sql(&filter),
            "SELECT COUNT(*) FROM student_performance \
             WHERE student_name ILIKE $1 AND school_name ILIKE $2 AND medium ILIKE $3"
        );
    }

    #[test]
    fn test_class_column_is_quoted() {
        let filter = StudentFilter {
            class: Some("V".to_string()),
            ..Default::default()
        };
        assert_eq!(
            built_sql(&filter),
            "SELECT COUNT(*) FROM student_performance WHERE \"class\" ILIKE $1"
        );
    }

    #[test]
    fn test_values_become_substring_patterns() {
        // The pattern lives in the bound parameter, never in the SQL text.
        let filter = StudentFilter {
            student_name: Some("'; DROP TABLE students; --".to_string()),
            ..Default::default()
        };
        let sql = built_sql(&filter);
        assert!(!sql.contains("DROP TABLE"));
        assert!(sql.ends_with("student_name ILIKE $1"));
    }

    #[test]
    fn test_scope_empty_pushes_nothing() {
        let scope = AggregateScope::default();
        let mut qb = QueryBuilder::new("SELECT 1 WHERE attendance = 'Present'");
        scope.push_conditions(&mut qb);
        assert_eq!(qb.sql(), "SELECT 1 WHERE attendance = 'Present'");
    }

    #[test]
    fn test_scope_class_and_ward() {
        let scope = AggregateScope {
            class: Some("V".to_string()),
            ward: Some("North".to_string()),
        };
        let mut qb = QueryBuilder::new("SELECT 1 WHERE attendance = 'Present'");
        scope.push_conditions(&mut qb);
        assert_eq!(
            qb.sql(),
            "SELECT 1 WHERE attendance = 'Present' AND \"class\" = $1 AND ward = $2"
        );
    }

    #[test]
    fn test_scope_pushed_twice_binds_fresh_parameters() {
        // Numerator and denominator each bind their own copy of the scope.
        let scope = AggregateScope {
            ward: Some("North".to_string()),
            ..Default::default()
        };
        let mut qb = QueryBuilder::new("SELECT 1 WHERE a = 'x'");
        scope.push_conditions(&mut qb);
        qb.push(" UNION SELECT 1 WHERE a = 'x'");
        scope.push_conditions(&mut qb);
        assert_eq!(
            qb.sql(),
            "SELECT 1 WHERE a = 'x' AND ward = $1 UNION SELECT 1 WHERE a = 'x' AND ward = $2"
        );
    }
}
