use std::collections::VecDeque;
use crate::models::{AttributeValue, Candidate, Criteria, MatchResult};

/// Largest absolute difference at which two numbers still count as a match
const NUMERIC_TOLERANCE: f64 = 1.0;

/// An item paired with its ordinal priority
#[derive(Debug, Clone, PartialEq)]
pub struct Prioritized<T> {
    pub item: T,
    pub priority: u64,
}

/// Priority queue kept as an insertion-ordered list, highest priority first
///
/// A new entry goes immediately before the first entry with a strictly lower
/// priority, so entries of equal priority leave in the order they arrived.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    items: VecDeque<Prioritized<T>>,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, item: T, priority: u64) {
        let entry = Prioritized { item, priority };
        match self.items.iter().position(|queued| priority > queued.priority) {
            Some(index) => self.items.insert(index, entry),
            None => self.items.push_back(entry),
        }
    }

    /// Remove and return the highest priority entry
    pub fn dequeue(&mut self) -> Option<Prioritized<T>> {
        self.items.pop_front()
    }

    pub fn peek(&self) -> Option<&Prioritized<T>> {
        self.items.front()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Looser attribute test used for priority ranking
///
/// Numbers match within ±1, lists match on any overlap, and a value missing
/// on either side never matches.
pub fn approximately_matches(candidate: Option<&AttributeValue>, desired: Option<&AttributeValue>) -> bool {
    let (Some(have), Some(want)) = (candidate, desired) else {
        return false;
    };

    match (have, want) {
        (AttributeValue::Number(have), AttributeValue::Number(want)) => {
            (have - want).abs() <= NUMERIC_TOLERANCE
        }
        (AttributeValue::List(have), AttributeValue::List(want)) => {
            want.iter().any(|v| have.contains(v))
        }
        (AttributeValue::List(have), want) => have.contains(want),
        (have, want) => have == want,
    }
}

/// Sum of positional weights over the priority attributes a candidate matches
///
/// With `n` attributes, the attribute at index `i` is worth `n - i`. The
/// total is at most `n * (n + 1) / 2`, which fits a `u64` for any list that
/// fits in memory.
pub fn calculate_priority(candidate: &Candidate, criteria: &Criteria, priority_attributes: &[String]) -> u64 {
    let total = priority_attributes.len();

    priority_attributes
        .iter()
        .enumerate()
        .filter(|(_, name)| approximately_matches(candidate.attribute(name), criteria.get(*name)))
        .map(|(index, _)| (total - index) as u64)
        .sum()
}

/// Rank a pool by ordinal priority; `match_score` carries the raw priority
pub fn find_matches_with_priority_queue(
    pool: &[Candidate],
    criteria: &Criteria,
    priority_attributes: &[String],
    limit: usize,
) -> Vec<MatchResult> {
    let mut queue = PriorityQueue::new();
    for candidate in pool {
        queue.enqueue(candidate, calculate_priority(candidate, criteria, priority_attributes));
    }

    std::iter::from_fn(|| queue.dequeue())
        .take(limit)
        .map(|entry| MatchResult {
            animal: entry.item.clone(),
            match_score: entry.priority as f64,
        })
        .collect()
}
