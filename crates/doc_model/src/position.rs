//! Position bookkeeping for ordered child sequences

/// Resolve a requested insertion position against a sequence of `len` items.
///
/// Positions are clamped to `[0, len]`; `None` appends at the end.
pub fn clamp_position(len: usize, position: Option<i64>) -> usize {
    match position {
        None => len,
        Some(p) if p <= 0 => 0,
        Some(p) => usize::try_from(p).map_or(len, |p| p.min(len)),
    }
}

/// Move the item at `from` to the requested position.
///
/// The target is resolved against the length *before* removal, then capped
/// to the shortened sequence, so moving to `len` (or past it) lands the item
/// last. Returns the item's new index.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, position: Option<i64>) -> usize {
    let target = clamp_position(items.len(), position);
    let item = items.remove(from);
    let target = target.min(items.len());
    items.insert(target, item);
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_position() {
        assert_eq!(clamp_position(2, None), 2);
        assert_eq!(clamp_position(2, Some(5)), 2);
        assert_eq!(clamp_position(2, Some(-3)), 0);
        assert_eq!(clamp_position(2, Some(1)), 1);
        assert_eq!(clamp_position(0, Some(4)), 0);
    }

    #[test]
    fn test_move_item_forward_and_back() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        assert_eq!(move_item(&mut items, 0, Some(2)), 2);
        assert_eq!(items, vec!['b', 'c', 'a', 'd']);

        assert_eq!(move_item(&mut items, 3, Some(0)), 0);
        assert_eq!(items, vec!['d', 'b', 'c', 'a']);
    }

    #[test]
    fn test_move_item_past_end_lands_last() {
        let mut items = vec![1, 2, 3];
        assert_eq!(move_item(&mut items, 0, Some(99)), 2);
        assert_eq!(items, vec![2, 3, 1]);

        assert_eq!(move_item(&mut items, 1, None), 2);
        assert_eq!(items, vec![2, 1, 3]);
    }

    mod props {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_move_keeps_items_and_lands_in_range(
                len in 1usize..20,
                from_seed in any::<usize>(),
                position in proptest::option::of(-30i64..30),
            ) {
                let mut items: Vec<usize> = (0..len).collect();
                let from = from_seed % len;
                let target = move_item(&mut items, from, position);

                prop_assert!(target < len);
                prop_assert_eq!(items[target], from);
                let mut sorted = items.clone();
                sorted.sort_unstable();
                prop_assert_eq!(sorted, (0..len).collect::<Vec<_>>());
            }
        }
    }
}
