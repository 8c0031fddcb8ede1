// Pure filter and sort functions over the job catalog
// The visible list is always query::sort(query::filter(catalog, state), key).

use crate::models::{FilterState, Job, SortKey};
use std::cmp::Reverse;

/// Return the jobs matching every constraint in `state`, in catalog order
pub fn filter(jobs: &[Job], state: &FilterState) -> Vec<Job> {
    let needle = state.search_query.to_lowercase();

    jobs.iter()
        .filter(|job| matches_search(job, &needle))
        .filter(|job| state.selected_skills.is_empty() || job.has_any_skill(&state.selected_skills))
        .filter(|job| {
            let budget = i64::from(job.budget);
            budget >= state.budget_min && budget <= state.budget_max
        })
        .filter(|job| state.status_filter.is_empty() || state.status_filter.contains(&job.status))
        .cloned()
        .collect()
}

/// `needle` must already be lowercased; an empty needle matches everything
fn matches_search(job: &Job, needle: &str) -> bool {
    needle.is_empty()
        || job.title.to_lowercase().contains(needle)
        || job.company.to_lowercase().contains(needle)
        || job.description.to_lowercase().contains(needle)
}

/// Return a new, stably sorted copy of `jobs`
pub fn sort(jobs: &[Job], key: SortKey) -> Vec<Job> {
    let mut sorted = jobs.to_vec();
    match key {
        SortKey::Recent => sorted.sort_by_key(|job| Reverse(job.posted_date)),
        SortKey::Budget => sorted.sort_by_key(|job| Reverse(job.budget)),
        SortKey::Deadline => sorted.sort_by_key(|job| job.deadline),
    }
    sorted
}

/// Sorted, de-duplicated list of every skill in the catalog
pub fn distinct_skills(jobs: &[Job]) -> Vec<String> {
    let mut skills: Vec<String> = jobs.iter().flat_map(|job| job.skills.iter().cloned()).collect();
    skills.sort();
    skills.dedup();
    skills
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{JobSource, StaticCatalog};
    use crate::models::JobStatus;
    use std::collections::BTreeSet;

    fn catalog() -> Vec<Job> {
        StaticCatalog.list_all().unwrap()
    }

    fn ids(jobs: &[Job]) -> Vec<&str> {
        jobs.iter().map(|job| job.id.as_str()).collect()
    }

    fn any_status() -> FilterState {
        FilterState {
            status_filter: BTreeSet::new(),
            ..FilterState::default()
        }
    }

    #[test]
    fn test_default_state_keeps_open_jobs() {
        let result = filter(&catalog(), &FilterState::default());
        assert_eq!(result.len(), 8);
        assert!(result.iter().all(|job| job.status == JobStatus::Open));
        assert!(!ids(&result).contains(&"4"));
        assert!(!ids(&result).contains(&"8"));
    }

    #[test]
    fn test_skill_filter() {
        let state = any_status().with_skill_toggled("React");
        assert_eq!(ids(&filter(&catalog(), &state)), vec!["2"]);
    }

    #[test]
    fn test_skill_filter_matches_any_selected_skill() {
        let state = any_status()
            .with_skill_toggled("React")
            .with_skill_toggled("PHP");
        assert_eq!(ids(&filter(&catalog(), &state)), vec!["2", "7"]);
    }

    #[test]
    fn test_budget_filter_is_inclusive() {
        // Job 7 (1100) sits inside the range as well
        let state = any_status().with_budget_range(1000, 2000);
        assert_eq!(ids(&filter(&catalog(), &state)), vec!["2", "4", "7", "9"]);

        let state = any_status().with_budget_range(800, 800);
        assert_eq!(ids(&filter(&catalog(), &state)), vec!["1"]);
    }

    #[test]
    fn test_inverted_budget_range_matches_nothing() {
        let state = any_status().with_budget_range(1500, 500);
        assert!(filter(&catalog(), &state).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let state = any_status().with_search_query("python");
        assert_eq!(ids(&filter(&catalog(), &state)), vec!["6"]);

        let state = any_status().with_search_query("FINTECH");
        assert_eq!(ids(&filter(&catalog(), &state)), vec!["5", "9"]);
    }

    #[test]
    fn test_search_matches_company() {
        let state = any_status().with_search_query("marketing hub");
        assert_eq!(ids(&filter(&catalog(), &state)), vec!["3"]);
    }

    #[test]
    fn test_status_filter() {
        let state = FilterState::default()
            .with_status_toggled(JobStatus::Open)
            .with_status_toggled(JobStatus::Completed);
        assert_eq!(ids(&filter(&catalog(), &state)), vec!["8"]);
    }

    #[test]
    fn test_sort_by_deadline() {
        let sorted = sort(&filter(&catalog(), &FilterState::default()), SortKey::Deadline);
        assert_eq!(sorted[0].id, "1");
        assert!(sorted.windows(2).all(|w| w[0].deadline <= w[1].deadline));
    }

    #[test]
    fn test_sort_by_budget() {
        let sorted = sort(&catalog(), SortKey::Budget);
        assert_eq!(ids(&sorted[..3]), vec!["2", "9", "4"]);
        assert!(sorted.windows(2).all(|w| w[0].budget >= w[1].budget));
    }

    #[test]
    fn test_sort_by_recent_keeps_ties_in_catalog_order() {
        let sorted = sort(&catalog(), SortKey::Recent);
        // Jobs 5 and 10 share 2025-01-03, jobs 1 and 7 share 2025-01-02
        assert_eq!(ids(&sorted[..4]), vec!["5", "10", "1", "7"]);
        assert_eq!(sorted.last().map(|job| job.id.as_str()), Some("8"));
    }

    #[test]
    fn test_sort_does_not_modify_input() {
        let jobs = catalog();
        let _ = sort(&jobs, SortKey::Budget);
        assert_eq!(jobs, catalog());
    }

    #[test]
    fn test_distinct_skills() {
        let skills = distinct_skills(&catalog());
        assert_eq!(skills.len(), 31);
        assert!(skills.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(skills.iter().filter(|s| *s == "JavaScript").count(), 1);
    }
}
