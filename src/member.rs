use crate::key::Key;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A member of the family: a label and the value the tree is ordered by.
///
/// Members compare by key only; labels never participate in ordering.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Member {
    pub label: String,
    pub key: Key,
}

impl Member {
    pub fn new<S>(label: S, key: f64) -> Self
    where
        S: Into<String>,
    {
        Member {
            label: label.into(),
            key: Key::new(key),
        }
    }
}

impl Ord for Member {
    fn cmp(&self, other: &Member) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for Member {
    fn partial_cmp(&self, other: &Member) -> Option<Ordering> {
        Some(self.key.cmp(&other.key))
    }
}

impl PartialEq for Member {
    fn eq(&self, other: &Member) -> bool {
        self.key == other.key
    }
}

impl Eq for Member {}

#[cfg(test)]
mod tests {
    use super::Member;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn test_serde_round_trip() {
        let member = Member::new("Don", 50.0);
        assert_tokens(
            &member,
            &[
                Token::Struct {
                    name: "Member",
                    len: 2,
                },
                Token::Str("label"),
                Token::Str("Don"),
                Token::Str("key"),
                Token::NewtypeStruct { name: "Key" },
                Token::F64(50.0),
                Token::StructEnd,
            ],
        );
    }
}
