use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};

use crate::models::domain::{quiz::Quiz, submission::Submission};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreFilter {
    Exact(i32),
    Range { min: Option<i32>, max: Option<i32> },
}

impl ScoreFilter {
    /// An exact score always wins over the min/max bounds.
    pub fn resolve(exact: Option<i32>, min: Option<i32>, max: Option<i32>) -> Option<Self> {
        match (exact, min, max) {
            (Some(score), _, _) => Some(ScoreFilter::Exact(score)),
            (None, None, None) => None,
            (None, min, max) => Some(ScoreFilter::Range { min, max }),
        }
    }

    pub fn matches(&self, score: i32) -> bool {
        match *self {
            ScoreFilter::Exact(expected) => score == expected,
            ScoreFilter::Range { min, max } => {
                min.is_none_or(|m| score >= m) && max.is_none_or(|m| score <= m)
            }
        }
    }
}

/// Inclusive creation-time window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime,
    pub to: DateTime,
}

impl DateRange {
    pub fn contains(&self, at: DateTime) -> bool {
        at >= self.from && at <= self.to
    }
}

/// Filters applied to a user's submission history.
///
/// Score and date bounds are pushed down to the submission store; grade and subject
/// are checked against the joined quiz afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub score: Option<ScoreFilter>,
    pub created: Option<DateRange>,
    pub grade: Option<i32>,
    pub subject: Option<String>,
}

impl HistoryFilter {
    pub fn submission_document(&self, user: &ObjectId) -> Document {
        let mut filter = doc! { "user": *user };

        match self.score {
            Some(ScoreFilter::Exact(score)) => {
                filter.insert("score", score);
            }
            Some(ScoreFilter::Range { min, max }) => {
                let mut range = Document::new();
                if let Some(min) = min {
                    range.insert("$gte", min);
                }
                if let Some(max) = max {
                    range.insert("$lte", max);
                }
                filter.insert("score", range);
            }
            None => {}
        }

        if let Some(range) = self.created {
            filter.insert(
                "createdAt",
                doc! { "$gte": range.from, "$lte": range.to },
            );
        }

        filter
    }

    /// In-process counterpart of [`HistoryFilter::submission_document`], for stores that
    /// cannot evaluate a Mongo filter document.
    pub fn matches_submission(&self, submission: &Submission) -> bool {
        self.score.is_none_or(|s| s.matches(submission.score))
            && self.created.is_none_or(|r| r.contains(submission.created_at))
    }

    pub fn matches_quiz(&self, quiz: &Quiz) -> bool {
        self.grade.is_none_or(|g| quiz.grade == g)
            && self.subject.as_deref().is_none_or(|s| quiz.subject == s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::quiz::Difficulty;

    fn submission_with(score: i32, created_at: DateTime) -> Submission {
        let mut submission = Submission::new(ObjectId::new(), ObjectId::new(), vec![], score, vec![]);
        submission.created_at = created_at;
        submission
    }

    #[test]
    fn exact_score_overrides_range() {
        let resolved = ScoreFilter::resolve(Some(5), Some(7), Some(9));
        assert_eq!(resolved, Some(ScoreFilter::Exact(5)));

        let filter = HistoryFilter {
            score: resolved,
            ..Default::default()
        };
        let doc = filter.submission_document(&ObjectId::new());
        assert_eq!(doc.get_i32("score").unwrap(), 5);
    }

    #[test]
    fn range_builds_gte_and_lte() {
        let filter = HistoryFilter {
            score: ScoreFilter::resolve(None, Some(2), Some(4)),
            ..Default::default()
        };
        let doc = filter.submission_document(&ObjectId::new());
        let range = doc.get_document("score").unwrap();

        assert_eq!(range.get_i32("$gte").unwrap(), 2);
        assert_eq!(range.get_i32("$lte").unwrap(), 4);
    }

    #[test]
    fn no_score_bounds_leaves_score_unfiltered() {
        assert_eq!(ScoreFilter::resolve(None, None, None), None);

        let user = ObjectId::new();
        let doc = HistoryFilter::default().submission_document(&user);
        assert_eq!(doc, doc! { "user": user });
    }

    #[test]
    fn score_range_matching_is_inclusive() {
        let range = ScoreFilter::Range { min: Some(2), max: Some(4) };
        assert!(!range.matches(1));
        assert!(range.matches(2));
        assert!(range.matches(4));
        assert!(!range.matches(5));

        let open_max = ScoreFilter::Range { min: Some(3), max: None };
        assert!(open_max.matches(100));
    }

    #[test]
    fn date_range_is_inclusive_on_both_ends() {
        let from = DateTime::from_millis(1_000);
        let to = DateTime::from_millis(2_000);
        let filter = HistoryFilter {
            created: Some(DateRange { from, to }),
            ..Default::default()
        };

        assert!(filter.matches_submission(&submission_with(1, from)));
        assert!(filter.matches_submission(&submission_with(1, to)));
        assert!(!filter.matches_submission(&submission_with(1, DateTime::from_millis(999))));
        assert!(!filter.matches_submission(&submission_with(1, DateTime::from_millis(2_001))));
    }

    #[test]
    fn quiz_matching_checks_grade_and_subject() {
        let quiz = Quiz::new(5, "Science", 1, 1, Difficulty::Easy, vec![]);

        let filter = HistoryFilter {
            grade: Some(5),
            subject: Some("Science".to_string()),
            ..Default::default()
        };
        assert!(filter.matches_quiz(&quiz));

        let wrong_grade = HistoryFilter {
            grade: Some(6),
            ..Default::default()
        };
        assert!(!wrong_grade.matches_quiz(&quiz));

        let wrong_subject = HistoryFilter {
            subject: Some("History".to_string()),
            ..Default::default()
        };
        assert!(!wrong_subject.matches_quiz(&quiz));
    }
}
