//! Local identifiers.

use std::fmt;

/// A local identifier, without its `%` sigil.
///
/// Numeric identifiers (`%7`) are positional and are distinguished from
/// textual names (`%entry`). An identifier spelled with only digits is always
/// an `Id`, so `LocalIdent::from("7") == LocalIdent::Id(7)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocalIdent {
    Name(String),
    Id(u32),
}

impl LocalIdent {
    /// The numeric position, for `Id` identifiers.
    #[inline]
    pub fn as_id(&self) -> Option<u32> {
        match self {
            LocalIdent::Id(id) => Some(*id),
            LocalIdent::Name(_) => None,
        }
    }
}

impl From<&str> for LocalIdent {
    fn from(text: &str) -> Self {
        let numeric = !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit());
        match text.parse::<u32>() {
            Ok(id) if numeric => LocalIdent::Id(id),
            _ => LocalIdent::Name(text.to_owned()),
        }
    }
}

impl From<u32> for LocalIdent {
    fn from(id: u32) -> Self {
        LocalIdent::Id(id)
    }
}

impl fmt::Display for LocalIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalIdent::Name(name) => write!(f, "%{name}"),
            LocalIdent::Id(id) => write!(f, "%{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LocalIdent;

    #[test]
    fn digits_parse_as_ids() {
        assert_eq!(LocalIdent::from("7"), LocalIdent::Id(7));
        assert_eq!(LocalIdent::from("entry"), LocalIdent::Name("entry".into()));
        assert_eq!(LocalIdent::from("+1"), LocalIdent::Name("+1".into()));
        assert_eq!(LocalIdent::from("1x"), LocalIdent::Name("1x".into()));
    }

    #[test]
    fn display_adds_sigil() {
        assert_eq!(LocalIdent::Id(3).to_string(), "%3");
        assert_eq!(LocalIdent::from("loop").to_string(), "%loop");
    }
}
