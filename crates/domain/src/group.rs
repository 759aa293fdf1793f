use std::fmt;

/// Key under which exercises are clustered into supersets and circuits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Circuit, e.g. `A1`, `A2`, `a3`.
    Letter(char),
    /// Superset, e.g. `1a`, `1b`, `12x`.
    Number(u64),
    /// Any other code forms a group of its own.
    Code(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum GroupKind {
    #[strum(to_string = "circuit")]
    Circuit,
    #[strum(to_string = "superset")]
    Superset,
    #[strum(to_string = "single")]
    Single,
}

impl GroupKey {
    #[must_use]
    pub fn kind(&self) -> GroupKind {
        match self {
            GroupKey::Letter(_) => GroupKind::Circuit,
            GroupKey::Number(_) => GroupKind::Superset,
            GroupKey::Code(_) => GroupKind::Single,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Letter(letter) => write!(f, "{letter}"),
            GroupKey::Number(number) => write!(f, "{number}"),
            GroupKey::Code(code) => write!(f, "{code}"),
        }
    }
}

#[must_use]
pub fn group_id(code: &str) -> GroupKey {
    match code.chars().next() {
        Some(first) if first.is_ascii_alphabetic() => GroupKey::Letter(first.to_ascii_uppercase()),
        Some(first) if first.is_ascii_digit() => {
            let end = code
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(code.len());
            code[..end]
                .parse::<u64>()
                .map_or_else(|_| GroupKey::Code(code.to_string()), GroupKey::Number)
        }
        _ => GroupKey::Code(code.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("A1", GroupKey::Letter('A'))]
    #[case("A", GroupKey::Letter('A'))]
    #[case("b3", GroupKey::Letter('B'))]
    #[case("Warmup", GroupKey::Letter('W'))]
    #[case("1a", GroupKey::Number(1))]
    #[case("1", GroupKey::Number(1))]
    #[case("12x", GroupKey::Number(12))]
    #[case("01b", GroupKey::Number(1))]
    #[case("3-4", GroupKey::Number(3))]
    #[case("#1", GroupKey::Code("#1".to_string()))]
    #[case("-a", GroupKey::Code("-a".to_string()))]
    #[case(" A1", GroupKey::Code(" A1".to_string()))]
    #[case("ä1", GroupKey::Code("ä1".to_string()))]
    #[case("", GroupKey::Code(String::new()))]
    #[case(
        "99999999999999999999999a",
        GroupKey::Code("99999999999999999999999a".to_string())
    )]
    fn test_group_id(#[case] code: &str, #[case] expected: GroupKey) {
        assert_eq!(group_id(code), expected);
    }

    #[test]
    fn test_group_id_deterministic() {
        for code in ["A1", "1a", "?", ""] {
            assert_eq!(group_id(code), group_id(code));
        }
    }

    #[test]
    fn test_group_id_same_group() {
        assert_eq!(group_id("A1"), group_id("a2"));
        assert_eq!(group_id("2a"), group_id("2b"));
        assert_ne!(group_id("1a"), group_id("A1"));
        assert_ne!(group_id("1a"), group_id("11a"));
    }

    #[rstest]
    #[case(GroupKey::Letter('C'), GroupKind::Circuit, "C")]
    #[case(GroupKey::Number(4), GroupKind::Superset, "4")]
    #[case(GroupKey::Code("*".to_string()), GroupKind::Single, "*")]
    fn test_group_key_kind_and_display(
        #[case] key: GroupKey,
        #[case] kind: GroupKind,
        #[case] display: &str,
    ) {
        assert_eq!(key.kind(), kind);
        assert_eq!(key.to_string(), display);
    }

    #[test]
    fn test_group_kind_display() {
        assert_eq!(GroupKind::Superset.to_string(), "superset");
    }
}
