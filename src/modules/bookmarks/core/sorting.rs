// Read only orderings over a snapshot of a collection.
//
// Both functions return a new vector and leave the input as it was.
// `sort_by` is stable, so ties keep insertion order.

use crate::modules::bookmarks::core::bookmarked_job::BookmarkedJob;
use std::cmp::Ordering;

/// Closest deadline first. Records without a deadline go last, in insertion order.
pub fn sort_by_deadline(jobs: &[BookmarkedJob]) -> Vec<BookmarkedJob> {
    let mut sorted = jobs.to_vec();
    sorted.sort_by(|a, b| match (a.deadline, b.deadline) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}

/// Most recently saved first.
pub fn sort_by_saved_date(jobs: &[BookmarkedJob]) -> Vec<BookmarkedJob> {
    let mut sorted = jobs.to_vec();
    sorted.sort_by(|a, b| b.bookmarked_at.cmp(&a.bookmarked_at));
    sorted
}
