// Filter state holder with get / set / subscribe

use crate::models::FilterState;
use tokio::sync::watch;

/// Owns the current FilterState and publishes every replacement
///
/// Each write swaps the whole value, so readers and subscribers never see a
/// half-applied transition.
#[derive(Debug)]
pub struct FilterStore {
    tx: watch::Sender<FilterState>,
}

impl FilterStore {
    pub fn new(initial: FilterState) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    pub fn get(&self) -> FilterState {
        self.tx.borrow().clone()
    }

    /// Replace the state and notify subscribers. Returns the previous state.
    pub fn set(&self, state: FilterState) -> FilterState {
        self.tx.send_replace(state)
    }

    /// Apply a transition to the current state and store the result
    ///
    /// The read and the write happen under the channel's lock, so concurrent
    /// updates never overwrite each other.
    pub fn update<F>(&self, transition: F) -> FilterState
    where
        F: FnOnce(FilterState) -> FilterState,
    {
        let mut next = FilterState::default();
        self.tx.send_modify(|state| {
            *state = transition(std::mem::take(state));
            next = state.clone();
        });
        next
    }

    pub fn subscribe(&self) -> watch::Receiver<FilterState> {
        self.tx.subscribe()
    }
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new(FilterState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_returns_previous_state() {
        let store = FilterStore::default();
        let next = FilterState::default().with_search_query("design");
        let previous = store.set(next.clone());
        assert_eq!(previous, FilterState::default());
        assert_eq!(store.get(), next);
    }

    #[test]
    fn test_update_applies_transition() {
        let store = FilterStore::default();
        let next = store.update(|state| state.with_skill_toggled("SQL"));
        assert!(next.selected_skills.contains("SQL"));
        assert_eq!(store.get(), next);
    }

    #[tokio::test]
    async fn test_subscribers_see_updates() {
        let store = FilterStore::default();
        let mut rx = store.subscribe();

        store.update(|state| state.with_budget_range(100, 900));

        rx.changed().await.unwrap();
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.budget_min, 100);
        assert_eq!(seen.budget_max, 900);
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let store = std::sync::Arc::new(FilterStore::default());
        let skills: Vec<String> = (0..16).map(|i| format!("skill-{i}")).collect();

        let handles: Vec<_> = skills
            .iter()
            .cloned()
            .map(|skill| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.update(|state| state.with_skill_toggled(&skill));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let selected = store.get().selected_skills;
        assert_eq!(selected.len(), skills.len());
        assert!(skills.iter().all(|skill| selected.contains(skill)));
    }

    #[test]
    fn test_set_without_subscribers_still_stores() {
        let store = FilterStore::default();
        store.set(FilterState::default().with_search_query("x"));
        assert_eq!(store.get().search_query, "x");
    }
}
