use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::errors::ParseError;

/// Lowest budget bound shown by the budget filter
pub const DEFAULT_BUDGET_MIN: i64 = 0;

/// Highest budget bound shown by the budget filter
pub const DEFAULT_BUDGET_MAX: i64 = 2000;

/// Jobs closer than this many days to their deadline are flagged as urgent
pub const URGENT_DEADLINE_DAYS: i64 = 3;

// ============================================================================
// Job Models
// ============================================================================

/// Job represents one posting in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub description: String,
    pub budget: u32,
    pub skills: Vec<String>,
    pub deadline: NaiveDate,
    pub status: JobStatus,
    pub applicants: u32,
    pub posted_date: NaiveDate,
}

impl Job {
    /// Calendar days left until the deadline, negative once it has passed
    pub fn days_until_deadline(&self, today: NaiveDate) -> i64 {
        (self.deadline - today).num_days()
    }

    /// A job is urgent while its deadline is still ahead but at most three days away
    pub fn is_urgent(&self, today: NaiveDate) -> bool {
        let days = self.days_until_deadline(today);
        days > 0 && days <= URGENT_DEADLINE_DAYS
    }

    /// Only open jobs accept applications
    pub fn accepts_applications(&self) -> bool {
        self.status == JobStatus::Open
    }

    pub fn has_any_skill(&self, skills: &BTreeSet<String>) -> bool {
        self.skills.iter().any(|skill| skills.contains(skill))
    }
}

/// JobStatus represents the lifecycle state of a posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    Open,
    Assigned,
    Completed,
}

impl JobStatus {
    pub const ALL: [JobStatus; 3] = [JobStatus::Open, JobStatus::Assigned, JobStatus::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Open => "Open",
            JobStatus::Assigned => "Assigned",
            JobStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownStatus(s.to_string()))
    }
}

// ============================================================================
// Sorting
// ============================================================================

/// SortKey selects the ordering of the visible job list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Posted date, latest first
    #[default]
    Recent,
    /// Budget, highest first
    Budget,
    /// Deadline, soonest first
    Deadline,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Recent, SortKey::Budget, SortKey::Deadline];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Recent => "recent",
            SortKey::Budget => "budget",
            SortKey::Deadline => "deadline",
        }
    }

    /// Button label used by the job board
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Recent => "Most Recent",
            SortKey::Budget => "Highest Budget",
            SortKey::Deadline => "Urgent",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ParseError::UnknownSortKey(s.to_string()))
    }
}

// ============================================================================
// Filter State
// ============================================================================

/// FilterState holds the user-chosen constraints narrowing the catalog
///
/// Transitions never mutate in place: each returns the next state so the
/// store can swap it in as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_query: String,
    pub selected_skills: BTreeSet<String>,
    pub budget_min: i64,
    pub budget_max: i64,
    pub status_filter: BTreeSet<JobStatus>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            selected_skills: BTreeSet::new(),
            budget_min: DEFAULT_BUDGET_MIN,
            budget_max: DEFAULT_BUDGET_MAX,
            status_filter: BTreeSet::from([JobStatus::Open]),
        }
    }
}

impl FilterState {
    pub fn with_search_query(self, query: impl Into<String>) -> Self {
        Self {
            search_query: query.into(),
            ..self
        }
    }

    pub fn with_skill_toggled(self, skill: &str) -> Self {
        let mut selected_skills = self.selected_skills;
        if !selected_skills.remove(skill) {
            selected_skills.insert(skill.to_string());
        }
        Self {
            selected_skills,
            ..self
        }
    }

    pub fn with_status_toggled(self, status: JobStatus) -> Self {
        let mut status_filter = self.status_filter;
        if !status_filter.remove(&status) {
            status_filter.insert(status);
        }
        Self {
            status_filter,
            ..self
        }
    }

    /// Bounds are stored as given; min > max is allowed and matches nothing
    pub fn with_budget_range(self, min: i64, max: i64) -> Self {
        Self {
            budget_min: min,
            budget_max: max,
            ..self
        }
    }

    /// Number of filters the job board reports as applied
    ///
    /// Each selected skill counts once, a non-empty status filter counts once
    /// and a narrowed budget range counts once. The search query is not counted.
    pub fn active_filter_count(&self) -> usize {
        let status = usize::from(!self.status_filter.is_empty());
        let budget =
            usize::from(self.budget_min > DEFAULT_BUDGET_MIN || self.budget_max < DEFAULT_BUDGET_MAX);
        self.selected_skills.len() + status + budget
    }
}

/// Parse a typed budget bound the way a number input field does
///
/// Leading whitespace is skipped, then an optional sign and the leading run of
/// digits are read; anything after them is ignored. Input without digits, or
/// that parses to zero, yields `fallback`.
pub fn parse_budget_bound(input: &str, fallback: i64) -> i64 {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];

    // Digit runs too long for i64 saturate rather than fall back
    let magnitude = match digits.parse::<i64>() {
        Ok(value) => value,
        Err(_) if !digits.is_empty() => i64::MAX,
        Err(_) => return fallback,
    };

    match if negative { -magnitude } else { magnitude } {
        0 => fallback,
        value => value,
    }
}

/// Application is the notification emitted when a user applies to an open job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub application_id: uuid::Uuid,
    pub job_id: String,
    pub job_title: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}
