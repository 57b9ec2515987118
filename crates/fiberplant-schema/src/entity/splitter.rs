use crate::ids::{EnclosureId, SplitterId};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Splitter
///
/// Passive optical power divider, typically installed in a distribution
/// point. The split ratio fixes its insertion loss.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Splitter {
    pub id: SplitterId,
    pub enclosure: EnclosureId,
    pub ratio: SplitRatio,
}

///
/// SplitRatio
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum SplitRatio {
    #[display("1:2")]
    #[serde(rename = "1:2")]
    OneByTwo,
    #[display("1:4")]
    #[serde(rename = "1:4")]
    OneByFour,
    #[display("1:8")]
    #[serde(rename = "1:8")]
    OneByEight,
    #[display("1:16")]
    #[serde(rename = "1:16")]
    OneBySixteen,
    #[display("1:32")]
    #[serde(rename = "1:32")]
    OneByThirtyTwo,
}

impl SplitRatio {
    /// Typical insertion loss per TIA/EIA splitter datasheets, in dB.
    #[must_use]
    pub const fn insertion_loss_db(self) -> f64 {
        match self {
            Self::OneByTwo => 3.7,
            Self::OneByFour => 7.3,
            Self::OneByEight => 10.5,
            Self::OneBySixteen => 13.8,
            Self::OneByThirtyTwo => 17.1,
        }
    }

    #[must_use]
    pub const fn output_count(self) -> u32 {
        match self {
            Self::OneByTwo => 2,
            Self::OneByFour => 4,
            Self::OneByEight => 8,
            Self::OneBySixteen => 16,
            Self::OneByThirtyTwo => 32,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_loss_grows_with_fanout() {
        let ratios = [
            SplitRatio::OneByTwo,
            SplitRatio::OneByFour,
            SplitRatio::OneByEight,
            SplitRatio::OneBySixteen,
            SplitRatio::OneByThirtyTwo,
        ];
        for pair in ratios.windows(2) {
            assert!(pair[0].insertion_loss_db() < pair[1].insertion_loss_db());
            assert!(pair[0].output_count() < pair[1].output_count());
        }
    }

    #[test]
    fn ratio_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&SplitRatio::OneByEight).unwrap(),
            r#""1:8""#
        );
        assert_eq!(SplitRatio::OneByEight.to_string(), "1:8");
    }
}
