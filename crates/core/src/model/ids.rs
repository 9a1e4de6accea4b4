use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned question identifier.
///
/// The service is free to use numbers or strings; the id is echoed back in the
/// same JSON shape when an answer is submitted.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(i64),
    Text(String),
}

impl From<i64> for QuestionId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QuestionId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "QuestionId({n})"),
            Self::Text(s) => write!(f, "QuestionId({s:?})"),
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Generation counter for play-throughs.
///
/// Every `Session::start` moves to the next epoch. Async completions are tagged
/// with the epoch they were issued under so late arrivals can be told apart.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SessionEpoch(u64);

impl SessionEpoch {
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Debug for SessionEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionEpoch({})", self.0)
    }
}

impl fmt::Display for SessionEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_id_keeps_its_json_shape() {
        let id: QuestionId = serde_json::from_str("42").unwrap();
        assert_eq!(id, QuestionId::Number(42));
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
    }

    #[test]
    fn string_id_keeps_its_json_shape() {
        let id: QuestionId = serde_json::from_str("\"q-7\"").unwrap();
        assert_eq!(id, QuestionId::from("q-7"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"q-7\"");
    }

    #[test]
    fn epochs_advance() {
        let epoch = SessionEpoch::default();
        assert_eq!(epoch.next().value(), 1);
        assert!(epoch.next() > epoch);
    }
}
