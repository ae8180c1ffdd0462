/// Ordered resolution or quality ladder.
///
/// Entries keep the order in which their key was first inserted; the last
/// entry is the highest quality and backs every default lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ladder<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for Ladder<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> Ladder<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `key`. An existing key keeps its position and
    /// takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn last(&self) -> Option<(&str, &V)> {
        self.entries.last().map(|(k, v)| (k.as_str(), v))
    }

    /// Looks up `key`, or the last entry when no key is given.
    pub fn get_or_last(&self, key: Option<&str>) -> Option<&V> {
        match key {
            Some(key) => self.get(key),
            None => self.last().map(|(_, v)| v),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut ladder = Ladder::new();
        ladder.insert("108x81", "a");
        ladder.insert("640x480", "b");
        ladder.insert("108x81", "c");

        assert_eq!(ladder.keys(), vec!["108x81", "640x480"]);
        assert_eq!(ladder.get("108x81"), Some(&"c"));
        assert_eq!(ladder.last(), Some(("640x480", &"b")));
        assert_eq!(ladder.len(), 2);
    }

    #[test]
    fn test_get_or_last() {
        let mut ladder = Ladder::new();
        assert_eq!(ladder.get_or_last(None), None::<&u32>);

        ladder.insert("360p", 1);
        ladder.insert("720p", 2);
        assert_eq!(ladder.get_or_last(None), Some(&2));
        assert_eq!(ladder.get_or_last(Some("360p")), Some(&1));
        assert_eq!(ladder.get_or_last(Some("1080p")), None);
    }

    #[test]
    fn test_get_mut() {
        let mut ladder = Ladder::new();
        ladder.insert("1x1", String::from("a"));
        ladder.get_mut("1x1").unwrap().push('b');
        assert_eq!(ladder.get("1x1").map(String::as_str), Some("ab"));
        assert!(ladder.get_mut("2x2").is_none());
    }
}
