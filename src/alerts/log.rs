//! Bounded alert history

use std::collections::VecDeque;

use crate::models::Alert;

/// Alerts in arrival order, newest first
///
/// Holds at most `capacity` entries; pushing past it evicts the oldest.
#[derive(Debug, Clone)]
pub struct AlertLog {
    entries: VecDeque<Alert>,
    capacity: usize,
}

impl AlertLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend an alert, returning the evicted one if the log was full
    pub fn push(&mut self, alert: Alert) -> Option<Alert> {
        self.entries.push_front(alert);
        if self.entries.len() > self.capacity {
            self.entries.pop_back()
        } else {
            None
        }
    }

    pub fn latest(&self) -> Option<&Alert> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Contiguous copy, newest first
    pub fn to_vec(&self) -> Vec<Alert> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    fn alert(title: &str) -> Alert {
        Alert::new(Severity::Info, title, "")
    }

    #[test]
    fn test_newest_first() {
        let mut log = AlertLog::new(10);
        log.push(alert("a"));
        log.push(alert("b"));
        log.push(alert("c"));

        let titles: Vec<&str> = log.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "b", "a"]);
        assert_eq!(log.latest().unwrap().title, "c");
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut log = AlertLog::new(2);
        assert!(log.push(alert("a")).is_none());
        assert!(log.push(alert("b")).is_none());
        let evicted = log.push(alert("c")).unwrap();

        assert_eq!(evicted.title, "a");
        assert_eq!(log.len(), 2);
        let titles: Vec<String> = log.to_vec().into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["c", "b"]);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut log = AlertLog::new(0);
        log.push(alert("a"));
        log.push(alert("b"));
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.latest().unwrap().title, "b");
    }
}
