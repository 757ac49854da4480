use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::DatabaseResult;
use crate::filter::{AggregateScope, StudentFilter};
use crate::models::{
    CategorySlice, ClassAttendance, LevelSlice, StudentRecord, SubjectTotals, WardAttendance,
    WardAverage,
};
use crate::subject::{category_case, score_case, valid_level_list, Subject};

const STUDENT_COLUMNS: &str = "id, student_name, gender, ward, school_name, medium, \
     \"class\" AS student_class, reading_level, writing_level, numeracy_level, attendance";

/// Repository for `student_performance` reads and aggregates
///
/// All operations are single read-only statements; the paginated listing is
/// the only caller that issues two (rows + count), and both are built from
/// the same [`StudentFilter`].
#[derive(Debug, Clone)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch one page of students matching the filter, ordered by id
    pub async fn list(
        &self,
        filter: &StudentFilter,
        limit: i64,
        offset: i64,
    ) -> DatabaseResult<Vec<StudentRecord>> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT {STUDENT_COLUMNS} FROM student_performance"
        ));
        filter.apply(&mut qb);
        qb.push(" ORDER BY id LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let rows = qb
            .build_query_as::<StudentRecord>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Count all students matching the same filter as [`Self::list`]
    pub async fn count(&self, filter: &StudentFilter) -> DatabaseResult<i64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM student_performance");
        filter.apply(&mut qb);

        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;

        Ok(total)
    }

    /// Per-level counts and percentages for one subject
    ///
    /// The denominator subquery repeats the exact numerator predicate
    /// (valid level, Present attendance, and any scope), so the returned
    /// percentages sum to 100 within the scoped view. `NULLIF` turns an
    /// empty denominator into a null percentage instead of a division error.
    /// Levels with no matching rows are omitted by `GROUP BY`.
    pub async fn level_distribution(
        &self,
        subject: Subject,
        scope: &AggregateScope,
    ) -> DatabaseResult<Vec<LevelSlice>> {
        let mut qb = level_distribution_query(subject, scope);

        let slices = qb
            .build_query_as::<LevelSlice>()
            .fetch_all(&self.pool)
            .await?;

        Ok(slices)
    }

    /// Category breakdown for one subject, ordered by category label
    ///
    /// The denominator counts every Present student with a valid level for
    /// the subject, matching the numerator population across the three
    /// categories.
    pub async fn category_breakdown(&self, subject: Subject) -> DatabaseResult<Vec<CategorySlice>> {
        let col = subject.level_column();
        let levels = valid_level_list();
        let case = category_case(col);

        let sql = format!(
            "SELECT {case} AS category, COUNT(*) AS total_students, \
             ROUND(COUNT(*)::decimal * 100 / NULLIF((\
                 SELECT COUNT(*) FROM student_performance \
                 WHERE {col} IN {levels} AND attendance = 'Present'), 0), 2)::float8 AS percentage \
             FROM student_performance \
             WHERE {col} IN {levels} AND attendance = 'Present' \
             GROUP BY category ORDER BY category"
        );

        let slices = sqlx::query_as::<_, CategorySlice>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(slices)
    }

    /// Mean numeric level per ward among Present students with a valid level
    pub async fn ward_average(&self, subject: Subject) -> DatabaseResult<Vec<WardAverage>> {
        let col = subject.level_column();
        let levels = valid_level_list();
        let score = score_case(col);

        let sql = format!(
            "SELECT ward, COUNT(*) AS total_students, \
             ROUND(AVG({score}), 2)::float8 AS avg_level \
             FROM student_performance \
             WHERE {col} IN {levels} AND attendance = 'Present' \
             GROUP BY ward ORDER BY ward"
        );

        let averages = sqlx::query_as::<_, WardAverage>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(averages)
    }

    /// Read the precomputed ward attendance summary
    ///
    /// The table is refreshed only by the offline seeding process; these
    /// numbers are deliberately stale with respect to live rows.
    pub async fn ward_attendance(&self) -> DatabaseResult<Vec<WardAttendance>> {
        let rows = sqlx::query_as::<_, WardAttendance>(
            "SELECT ward, total_students::int8 AS total_students, \
             present::int8 AS present, absent::int8 AS absent, \
             long_absent::int8 AS long_absent \
             FROM ward_attendance ORDER BY ward ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Attendance indicator sums grouped by class
    pub async fn class_attendance(&self) -> DatabaseResult<Vec<ClassAttendance>> {
        let rows = sqlx::query_as::<_, ClassAttendance>(
            "SELECT \"class\" AS class, COUNT(*) AS total_students, \
             SUM(CASE WHEN attendance = 'Present' THEN 1 ELSE 0 END)::int8 AS present, \
             SUM(CASE WHEN attendance = 'Absent' THEN 1 ELSE 0 END)::int8 AS absent, \
             SUM(CASE WHEN attendance = 'Long Absent' THEN 1 ELSE 0 END)::int8 AS long_absent \
             FROM student_performance \
             WHERE \"class\" IS NOT NULL \
             GROUP BY \"class\" ORDER BY \"class\" ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Present students with a recorded level, counted per subject
    pub async fn subject_totals(&self) -> DatabaseResult<SubjectTotals> {
        let selects: Vec<String> = Subject::ALL
            .iter()
            .map(|s| {
                format!(
                    "(SELECT COUNT(*) FROM student_performance \
                     WHERE attendance = 'Present' AND {} IS NOT NULL) AS {}",
                    s.level_column(),
                    s.as_str()
                )
            })
            .collect();
        let sql = format!("SELECT {}", selects.join(", "));

        let totals = sqlx::query_as::<_, SubjectTotals>(&sql)
            .fetch_one(&self.pool)
            .await?;

        Ok(totals)
    }
}

/// Assemble the level-distribution statement for one subject and scope
///
/// Kept as a standalone builder so the unit tests pin the exact SQL the
/// repository executes, including both `push_conditions` calls.
fn level_distribution_query(
    subject: Subject,
    scope: &AggregateScope,
) -> QueryBuilder<'static, Postgres> {
    let col = subject.level_column();
    let levels = valid_level_list();

    let mut qb: QueryBuilder<'static, Postgres> = QueryBuilder::new(format!(
        "SELECT {col} AS level, COUNT(*) AS total_students, \
         ROUND(COUNT(*)::decimal * 100 / NULLIF((\
             SELECT COUNT(*) FROM student_performance \
             WHERE {col} IN {levels} AND attendance = 'Present'"
    ));
    scope.push_conditions(&mut qb);
    qb.push(format!(
        "), 0), 2)::float8 AS percentage \
         FROM student_performance \
         WHERE {col} IN {levels} AND attendance = 'Present'"
    ));
    scope.push_conditions(&mut qb);
    qb.push(format!(" GROUP BY {col} ORDER BY {col}"));

    qb
}

#[cfg(test)]
mod tests {
    use super::*;

    // The SQL is assembled at runtime; these tests pin the statement the
    // repository executes, without a live database.

    fn level_distribution_sql(scope: &AggregateScope) -> String {
        let mut qb = level_distribution_query(Subject::Reading, scope);
        qb.sql().to_string()
    }

    #[test]
    fn test_level_distribution_denominator_mirrors_numerator() {
        let sql = level_distribution_sql(&AggregateScope::default());
        let predicate = "reading_level IN ('L0','L1','L2','L3','L4','L5') AND attendance = 'Present'";
        assert_eq!(sql.matches(predicate).count(), 2);
        assert!(sql.contains("NULLIF"));
    }

    #[test]
    fn test_level_distribution_scope_applies_to_both_sides() {
        let scope = AggregateScope {
            class: Some("V".to_string()),
            ward: Some("North".to_string()),
        };
        let sql = level_distribution_sql(&scope);
        // Class and ward each appear once in the denominator subquery and
        // once in the outer predicate, with distinct bind positions.
        assert_eq!(sql.matches("\"class\" = ").count(), 2);
        assert_eq!(sql.matches("ward = ").count(), 2);
        for n in 1..=4 {
            assert!(sql.contains(&format!("${n}")));
        }
    }

    #[test]
    fn test_level_distribution_groups_and_orders_by_level() {
        let sql = level_distribution_sql(&AggregateScope::default());
        assert!(sql.ends_with("GROUP BY reading_level ORDER BY reading_level"));
    }
}
