use std::fmt::Debug;

use crate::error::{IviError, IviResult};

/// Model-specific spelling of an enumerated attribute.
///
/// `TABLE` lists every value the model supports together with the keyword the
/// instrument uses for it. Keywords must be unique within a table.
pub trait KeywordTable<T: Copy + PartialEq + Debug + 'static> {
    const ATTRIBUTE: &'static str;
    const TABLE: &'static [(T, &'static str)];

    fn encode(value: T) -> IviResult<&'static str> {
        Self::TABLE
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, keyword)| *keyword)
            .ok_or_else(|| IviError::UnsupportedValue {
                attribute: Self::ATTRIBUTE,
                value: format!("{:?}", value),
            })
    }

    /// Replies are matched without regard to case or surrounding whitespace
    fn decode(reply: &str) -> IviResult<T> {
        let keyword = reply.trim();
        Self::TABLE
            .iter()
            .find(|(_, k)| k.eq_ignore_ascii_case(keyword))
            .map(|(v, _)| *v)
            .ok_or_else(|| IviError::decode(Self::ATTRIBUTE, reply))
    }

    fn supported() -> impl Iterator<Item = T> {
        Self::TABLE.iter().map(|(v, _)| *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Polarity {
        Normal,
        Inverted,
        Floating,
    }

    struct Spelling;

    impl KeywordTable<Polarity> for Spelling {
        const ATTRIBUTE: &'static str = "polarity";
        const TABLE: &'static [(Polarity, &'static str)] =
            &[(Polarity::Normal, "NORM"), (Polarity::Inverted, "INV")];
    }

    #[test]
    fn decode_ignores_case_and_whitespace() {
        assert_eq!(Spelling::decode(" inv\n").unwrap(), Polarity::Inverted);
        assert_eq!(Spelling::encode(Polarity::Normal).unwrap(), "NORM");
    }

    #[test]
    fn unmodeled_value_is_unsupported() {
        assert!(matches!(
            Spelling::encode(Polarity::Floating),
            Err(IviError::UnsupportedValue {
                attribute: "polarity",
                ..
            })
        ));
    }

    #[test]
    fn unknown_keyword_is_decode_error() {
        match Spelling::decode("FLO") {
            Err(IviError::Decode { reply, .. }) => assert_eq!(reply, "FLO"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
