//! Read-only projections of the store for rendering: filtered board columns
//! and per-stage pipeline counts.

use serde::Serialize;

use crate::gateway::Applicant;
use crate::pipeline::{ApplicantStatus, BOARD_COLUMNS};
use crate::store::EntityStore;

/// Score thresholds offered by the "min score" filter.
pub const CONSIDER_SCORE: u32 = 55;
pub const STRONG_HIRE_SCORE: u32 = 75;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardFilter {
    /// Only this stage; `None` shows all.
    pub status: Option<ApplicantStatus>,
    /// Unscored applicants count as 0. Zero disables the filter.
    pub min_score: u32,
}

impl BoardFilter {
    pub fn matches(&self, applicant: &Applicant) -> bool {
        if let Some(status) = self.status {
            if applicant.status != status {
                return false;
            }
        }
        if self.min_score > 0 && applicant.score().unwrap_or(0) < self.min_score {
            return false;
        }
        true
    }

    pub fn visible<'a>(&self, store: &'a EntityStore) -> Vec<&'a Applicant> {
        store.applicants().iter().filter(|a| self.matches(a)).collect()
    }

    /// Board columns in display order, each holding its visible applicants.
    pub fn columns<'a>(
        &self,
        store: &'a EntityStore,
    ) -> Vec<(ApplicantStatus, Vec<&'a Applicant>)> {
        let visible = self.visible(store);
        BOARD_COLUMNS
            .iter()
            .map(|&status| {
                let cards = visible
                    .iter()
                    .copied()
                    .filter(|a| a.status == status)
                    .collect();
                (status, cards)
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageSummary {
    pub status: ApplicantStatus,
    pub count: usize,
    pub top_score: Option<u32>,
}

/// Headline counts for the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    /// Applicant count reported by the job posting (may exceed `loaded`).
    pub total: usize,
    pub loaded: usize,
    pub scored: usize,
    pub shortlisted: usize,
    /// Stages in pipeline order, HIRED before REJECTED.
    pub stages: Vec<StageSummary>,
    /// Highest resume score in the snapshot: (name, score).
    pub top_candidate: Option<(String, u32)>,
}

impl PipelineSummary {
    pub fn from_store(store: &EntityStore) -> Self {
        let applicants = store.applicants();
        let order = [
            ApplicantStatus::New,
            ApplicantStatus::Reviewing,
            ApplicantStatus::Shortlisted,
            ApplicantStatus::AwaitingReply,
            ApplicantStatus::Booked,
            ApplicantStatus::Hired,
            ApplicantStatus::Rejected,
        ];
        let stages = order
            .iter()
            .map(|&status| {
                let group = applicants.iter().filter(|a| a.status == status);
                StageSummary {
                    status,
                    count: group.clone().count(),
                    top_score: group.filter_map(Applicant::score).max(),
                }
            })
            .collect();

        let top_candidate = applicants
            .iter()
            .filter_map(|a| a.score().map(|s| (a.display_name(), s)))
            .max_by_key(|(_, s)| *s);

        Self {
            total: store
                .job()
                .map(|j| j.applicant_count as usize)
                .unwrap_or(applicants.len()),
            loaded: applicants.len(),
            scored: applicants.iter().filter(|a| a.score_data.is_some()).count(),
            shortlisted: applicants
                .iter()
                .filter(|a| a.status == ApplicantStatus::Shortlisted)
                .count(),
            stages,
            top_candidate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::ScoreData;
    use crate::store::fixtures::{applicant, job};

    fn scored(id: &str, status: ApplicantStatus, score: u32) -> Applicant {
        let mut a = applicant(id, status);
        a.score_data = Some(ScoreData {
            score,
            max_score: 100,
            recommendation: "Consider".into(),
            badge: String::new(),
            breakdown: Default::default(),
            reasons: Vec::new(),
        });
        a
    }

    fn store() -> EntityStore {
        let mut store = EntityStore::new();
        store.replace(
            job(),
            vec![
                scored("A1", ApplicantStatus::Reviewing, 82),
                scored("A2", ApplicantStatus::Reviewing, 60),
                scored("A3", ApplicantStatus::Shortlisted, 40),
                applicant("A4", ApplicantStatus::New),
            ],
        );
        store
    }

    #[test]
    fn min_score_filter_treats_unscored_as_zero() {
        let store = store();
        let filter = BoardFilter {
            status: None,
            min_score: CONSIDER_SCORE,
        };
        let ids: Vec<_> = filter.visible(&store).iter().map(|a| a.id.0.clone()).collect();
        assert_eq!(ids, vec!["A1", "A2"]);
    }

    #[test]
    fn status_filter_and_columns() {
        let store = store();
        let filter = BoardFilter {
            status: Some(ApplicantStatus::Reviewing),
            min_score: 0,
        };
        let columns = filter.columns(&store);
        assert_eq!(columns.len(), BOARD_COLUMNS.len());
        for (status, cards) in columns {
            if status == ApplicantStatus::Reviewing {
                assert_eq!(cards.len(), 2);
            } else {
                assert!(cards.is_empty());
            }
        }
    }

    #[test]
    fn summary_counts() {
        let summary = PipelineSummary::from_store(&store());
        assert_eq!(summary.total, 3);
        assert_eq!(summary.loaded, 4);
        assert_eq!(summary.scored, 3);
        assert_eq!(summary.shortlisted, 1);
        assert_eq!(summary.top_candidate, Some(("FirstA1 Tester".to_string(), 82)));

        let reviewing = &summary.stages[1];
        assert_eq!(reviewing.status, ApplicantStatus::Reviewing);
        assert_eq!(reviewing.count, 2);
        assert_eq!(reviewing.top_score, Some(82));
        assert_eq!(summary.stages[0].top_score, None);
    }
}
