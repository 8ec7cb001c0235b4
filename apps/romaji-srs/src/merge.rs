//! Importing source examples as new cards.

use crate::models::{Bucket, Card, Lists, Timestamp, WordGroup};
use crate::store::{ListStore, StoreResult};

/// Append a card to `unknown` for every example whose sentence is not yet
/// tracked in any bucket. Existing cards are never touched.
///
/// Returns the number of cards added.
pub fn merge_examples(groups: &[WordGroup], lists: &mut Lists, now: Timestamp) -> usize {
    let mut tracked = lists.tracked_sentences();
    let mut added = 0;

    for group in groups {
        for example in &group.examples {
            if tracked.insert(example.sentence.clone()) {
                lists[Bucket::Unknown].push(Card::from_example(example, &group.word, now));
                added += 1;
            }
        }
    }

    added
}

/// Merge and persist the `unknown` bucket, but only if something was added.
pub fn import_examples(
    store: &ListStore,
    groups: &[WordGroup],
    lists: &mut Lists,
    now: Timestamp,
) -> StoreResult<usize> {
    let added = merge_examples(groups, lists, now);
    if added > 0 {
        store.save_list(Bucket::Unknown, &lists[Bucket::Unknown])?;
        tracing::info!(added, "imported new examples");
    }
    Ok(added)
}
