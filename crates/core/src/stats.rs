//! Participation statistics derived from assignment history.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::schedule::AssignmentStatus;

/// One assignment history row, as the dashboard consumes it.
#[derive(Debug, Clone)]
pub struct ParticipationRecord {
    pub musician_name: String,
    pub status: AssignmentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicianParticipation {
    pub name: String,
    pub confirmed: u64,
    pub total: u64,
}

impl MusicianParticipation {
    pub fn rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.confirmed as f64 / self.total as f64
        }
    }
}

/// Groups assignment rows by musician name into (confirmed, total) and
/// returns the top `limit` by confirmed/total ratio, descending.
///
/// Grouping preserves the first-appearance order of the input and the
/// sort is stable, so musicians with equal ratios keep input order.
pub fn rank_top_musicians(
    records: &[ParticipationRecord],
    limit: usize,
) -> Vec<MusicianParticipation> {
    let mut order: Vec<String> = Vec::new();
    let mut tallies: HashMap<String, (u64, u64)> = HashMap::new();

    for record in records {
        let entry = tallies
            .entry(record.musician_name.clone())
            .or_insert_with(|| {
                order.push(record.musician_name.clone());
                (0, 0)
            });
        entry.1 += 1;
        if record.status == AssignmentStatus::Confirmed {
            entry.0 += 1;
        }
    }

    let mut ranking: Vec<MusicianParticipation> = order
        .into_iter()
        .map(|name| {
            let (confirmed, total) = tallies[&name];
            MusicianParticipation {
                name,
                confirmed,
                total,
            }
        })
        .collect();

    ranking.sort_by(|a, b| b.rate().total_cmp(&a.rate()));
    ranking.truncate(limit);
    ranking
}

/// Per-status tallies over a set of assignment responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseTally {
    pub confirmed: u64,
    pub declined: u64,
    pub pending: u64,
}

impl ResponseTally {
    pub fn add(&mut self, status: AssignmentStatus) {
        match status {
            AssignmentStatus::Confirmed => self.confirmed += 1,
            AssignmentStatus::Declined => self.declined += 1,
            AssignmentStatus::Pending => self.pending += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.confirmed + self.declined + self.pending
    }
}

impl FromIterator<AssignmentStatus> for ResponseTally {
    fn from_iter<I: IntoIterator<Item = AssignmentStatus>>(iter: I) -> Self {
        let mut tally = ResponseTally::default();
        for status in iter {
            tally.add(status);
        }
        tally
    }
}

/// The administrator dashboard payload for the current calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_schedules: i64,
    pub active_musicians: i64,
    pub responses: ResponseTally,
    pub top_musicians: Vec<MusicianParticipation>,
}

/// A musician's personal dashboard numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalStats {
    pub total: u64,
    pub confirmed: u64,
    pub declined: u64,
    pub pending: u64,
    /// 100 * confirmed / total, 0 when there are no assignments.
    pub participation_rate: f64,
}

/// One of a musician's next schedules, with their response status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingAssignment {
    pub schedule_id: uuid::Uuid,
    pub title: String,
    pub date: chrono::NaiveDate,
    pub status: AssignmentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalDashboard {
    pub stats: PersonalStats,
    pub upcoming: Vec<UpcomingAssignment>,
}

pub fn personal_summary<I: IntoIterator<Item = AssignmentStatus>>(statuses: I) -> PersonalStats {
    let tally: ResponseTally = statuses.into_iter().collect();
    let total = tally.total();

    let rate = if total == 0 {
        0.0
    } else {
        (tally.confirmed as f64 / total as f64) * 100.0
    };

    PersonalStats {
        total,
        confirmed: tally.confirmed,
        declined: tally.declined,
        pending: tally.pending,
        participation_rate: rate.clamp(0.0, 100.0),
    }
}
