use std::collections::BTreeSet;

use common::wrapper;
use serde::Serialize;

wrapper!(#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)] pub SignatureKey wraps String);

impl SignatureKey {
    pub fn as_str(&self) -> &str {
        self.get_ref().as_str()
    }
}

impl From<&str> for SignatureKey {
    fn from(s: &str) -> Self {
        SignatureKey::from(s.to_string())
    }
}

impl std::fmt::Display for SignatureKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Always taken: forwarding these from the underlying type would hide the
/// wrapper's own `object` overrides.
pub const RESERVED_KEYS: [&str; 2] = ["GetHashCode()", "ToString()"];

/// Signatures the generator must not produce for one wrapper.
///
/// Built once from the hand-authored members and never grown afterwards.
#[derive(Debug, Clone)]
pub struct ConflictSet {
    keys: BTreeSet<SignatureKey>,
}

impl ConflictSet {
    pub fn contains(&self, key: &SignatureKey) -> bool {
        self.keys.contains(key)
    }
    pub fn len(&self) -> usize {
        self.keys.len()
    }
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &SignatureKey> {
        self.keys.iter()
    }
}

impl FromIterator<SignatureKey> for ConflictSet {
    fn from_iter<I: IntoIterator<Item = SignatureKey>>(iter: I) -> Self {
        let mut keys: BTreeSet<SignatureKey> = RESERVED_KEYS.iter().map(|k| SignatureKey::from(*k)).collect();
        keys.extend(iter);
        Self { keys }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reserved_keys_are_always_present() {
        let set: ConflictSet = std::iter::empty().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&"ToString()".into()));
        assert!(set.contains(&"GetHashCode()".into()));
        assert!(!set.contains(&"ToString(string)".into()));
    }

    #[test]
    fn duplicates_collapse() {
        let set: ConflictSet = vec!["Foo()".into(), "Foo()".into(), "ToString()".into()]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 3);
    }
}
