//! Reusable rules for [`Visitor::combine`](super::Visitor::combine).

/// Keeps the most recent present result.
///
/// Suits clause-level passes where a later child refines an earlier one.
pub fn last_non_empty<T>(acc: Option<T>, next: Option<T>) -> Option<T> {
    next.or(acc)
}

/// Appends `next` to `acc`.
#[must_use]
pub fn concat<T>(mut acc: Vec<T>, mut next: Vec<T>) -> Vec<T> {
    acc.append(&mut next);
    acc
}

/// Keeps the first present result and ignores later ones.
pub fn first_non_null<T>(acc: Option<T>, next: Option<T>) -> Option<T> {
    acc.or(next)
}

/// Ignores both results; for passes run only for their side effects.
pub fn discard<T: Default>(_acc: T, _next: T) -> T {
    T::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_non_empty() {
        assert_eq!(last_non_empty(Some(1), Some(2)), Some(2));
        assert_eq!(last_non_empty(Some(1), None), Some(1));
        assert_eq!(last_non_empty::<i32>(None, None), None);
    }

    #[test]
    fn test_first_non_null() {
        assert_eq!(first_non_null(Some(1), Some(2)), Some(1));
        assert_eq!(first_non_null(None, Some(2)), Some(2));
    }

    #[test]
    fn test_concat_keeps_order() {
        assert_eq!(concat(vec![1, 2], vec![3]), vec![1, 2, 3]);
    }

    #[test]
    fn test_discard() {
        assert_eq!(discard(3, 4), 0);
    }
}
