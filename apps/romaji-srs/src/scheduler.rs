//! Picking the next due card and moving cards between buckets.

use crate::models::{Bucket, Card, Lists, Timestamp};
use crate::store::{ListStore, StoreResult};

/// First due card, scanning buckets in [`Bucket::PRIORITY`] order and each
/// bucket in stored order. How overdue a card is does not matter.
pub fn next_due(lists: &Lists, now: Timestamp) -> Option<(Bucket, &Card)> {
    Bucket::PRIORITY.into_iter().find_map(|bucket| {
        lists[bucket]
            .iter()
            .find(|card| card.is_due(now))
            .map(|card| (bucket, card))
    })
}

/// Move `card` from `from` to `to`, rescheduling it by the interval of `to`.
///
/// Removal matches on sentence; if the card is no longer in `from` nothing is
/// removed and the card is still appended to `to`.
pub fn move_card(mut card: Card, from: Bucket, to: Bucket, lists: &mut Lists, now: Timestamp) -> Card {
    lists.remove(from, &card.sentence);
    card.next_review = now + to.interval_secs();
    lists[to].push(card.clone());
    card
}

/// [`move_card`], then rewrite all four bucket files.
pub fn transition(
    store: &ListStore,
    card: Card,
    from: Bucket,
    to: Bucket,
    lists: &mut Lists,
    now: Timestamp,
) -> StoreResult<Card> {
    let moved = move_card(card, from, to, lists, now);
    tracing::info!(
        sentence = %moved.sentence,
        from = from.name(),
        to = to.name(),
        interval_minutes = to.interval_minutes(),
        "moved card"
    );
    store.save_all(lists)?;
    Ok(moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::card;
    use tempfile::TempDir;

    const NOW: Timestamp = 1_700_000_000.0;

    #[test]
    fn test_nothing_due() {
        let mut lists = Lists::new();
        lists[Bucket::Hard].push(card("a", NOW + 30.0));
        assert!(next_due(&lists, NOW).is_none());
        assert!(next_due(&Lists::new(), NOW).is_none());
    }

    #[test]
    fn test_hard_before_easy() {
        let mut lists = Lists::new();
        lists[Bucket::Easy].push(card("easy", NOW - 5.0));
        lists[Bucket::Hard].push(card("hard", NOW - 5.0));

        let (bucket, due) = next_due(&lists, NOW).unwrap();
        assert_eq!(bucket, Bucket::Hard);
        assert_eq!(due.sentence, "hard");
    }

    #[test]
    fn test_priority_beats_staleness() {
        let mut lists = Lists::new();
        lists[Bucket::Unknown].push(card("stale", NOW - 3600.0));
        lists[Bucket::Easy].push(card("fresh", NOW - 10.0));

        let (bucket, due) = next_due(&lists, NOW).unwrap();
        assert_eq!(bucket, Bucket::Easy);
        assert_eq!(due.sentence, "fresh");
    }

    #[test]
    fn test_stored_order_within_bucket() {
        let mut lists = Lists::new();
        lists[Bucket::Difficult].push(card("later", NOW + 60.0));
        lists[Bucket::Difficult].push(card("first", NOW - 1.0));
        lists[Bucket::Difficult].push(card("second", NOW - 100.0));

        assert_eq!(next_due(&lists, NOW).unwrap().1.sentence, "first");
    }

    #[test]
    fn test_due_exactly_now() {
        let mut lists = Lists::new();
        lists[Bucket::Unknown].push(card("a", NOW));
        assert!(next_due(&lists, NOW).is_some());
    }

    #[test]
    fn test_move_unknown_to_difficult() {
        let mut lists = Lists::new();
        lists[Bucket::Unknown].push(card("a", NOW));
        lists[Bucket::Unknown].push(card("b", NOW));

        let moved = move_card(card("a", NOW), Bucket::Unknown, Bucket::Difficult, &mut lists, NOW);

        assert_eq!(lists[Bucket::Unknown].len(), 1);
        assert_eq!(lists[Bucket::Difficult].len(), 1);
        assert!((moved.next_review - (NOW + 300.0)).abs() < 1.0);
        assert_eq!(lists[Bucket::Difficult][0], moved);
    }

    #[test]
    fn test_move_missing_card_is_tolerated() {
        let mut lists = Lists::new();
        lists[Bucket::Hard].push(card("other", NOW));

        move_card(card("gone", NOW), Bucket::Hard, Bucket::Easy, &mut lists, NOW);
        assert_eq!(lists[Bucket::Hard].len(), 1);
        assert_eq!(lists[Bucket::Easy][0].sentence, "gone");
        assert_eq!(lists[Bucket::Easy][0].next_review, NOW + 7200.0);
    }

    #[test]
    fn test_move_within_same_bucket_goes_to_back() {
        let mut lists = Lists::new();
        lists[Bucket::Hard].push(card("a", NOW));
        lists[Bucket::Hard].push(card("b", NOW));

        move_card(card("a", NOW), Bucket::Hard, Bucket::Hard, &mut lists, NOW);
        let order: Vec<_> = lists[Bucket::Hard].iter().map(|c| c.sentence.as_str()).collect();
        assert_eq!(order, ["b", "a"]);
    }

    #[test]
    fn test_transition_rewrites_all_files() {
        let dir = TempDir::new().unwrap();
        let store = ListStore::new(dir.path().join("data"));
        let mut lists = Lists::new();
        lists[Bucket::Unknown].push(card("a", NOW));

        let now = crate::models::now();
        transition(&store, card("a", NOW), Bucket::Unknown, Bucket::Difficult, &mut lists, now).unwrap();

        let reloaded = store.load_all().unwrap();
        assert_eq!(reloaded, lists);
        assert!(reloaded[Bucket::Unknown].is_empty());
        assert!((reloaded[Bucket::Difficult][0].next_review - (now + 300.0)).abs() < 1.0);
        for bucket in Bucket::PRIORITY {
            assert!(store.list_path(bucket).exists());
        }
    }
}
