use std::hash::Hash;

use indexmap::IndexMap;

/// Group `items` by `key`, keeping groups in the order their key first
/// appears. Items inside a group keep their input order.
pub fn group_first_seen<T, K, I, F>(items: I, mut key: F) -> Vec<(K, Vec<T>)>
where
    I: IntoIterator<Item = T>,
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut groups: IndexMap<K, Vec<T>> = IndexMap::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_follow_first_appearance() {
        let words = ["pear", "apple", "plum", "avocado", "peach"];
        let groups = group_first_seen(words, |w| w.chars().next());
        let keys: Vec<_> = groups.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![Some('p'), Some('a')]);
        assert_eq!(groups[0].1, vec!["pear", "plum", "peach"]);
        assert_eq!(groups[1].1, vec!["apple", "avocado"]);
    }

    #[test]
    fn late_key_stays_behind_earlier_ones() {
        let groups = group_first_seen([3, 1, 3, 2, 1, 2, 3], |n| *n);
        let keys: Vec<i32> = groups.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![3, 1, 2]);
        assert_eq!(groups[0].1.len(), 3);
    }

    #[test]
    fn empty_input_gives_no_groups() {
        let groups = group_first_seen(Vec::<u32>::new(), |n| *n % 2);
        assert!(groups.is_empty());
    }
}
