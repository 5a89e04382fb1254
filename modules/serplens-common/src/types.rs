use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// --- Rank tracking ---

/// Whether a ranking record belongs to the tracked site or a competitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankType {
    #[serde(rename = "My Site")]
    Site,
    #[serde(rename = "Competitor")]
    Competitor,
}

impl std::fmt::Display for RankType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankType::Site => write!(f, "My Site"),
            RankType::Competitor => write!(f, "Competitor"),
        }
    }
}

/// One (tracked domain, matching result URL) pair from a results page.
/// Rank is the 1-based position of the URL in the fetched listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingRecord {
    #[serde(rename = "Keyword")]
    pub keyword: String,
    #[serde(rename = "Rank")]
    pub rank: u32,
    #[serde(rename = "URLs")]
    pub url: String,
    #[serde(rename = "Date", with = "date_ddmmyyyy")]
    pub date: NaiveDate,
    #[serde(rename = "Type")]
    pub rank_type: RankType,
}

mod date_ddmmyyyy {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%d-%m-%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

// --- Phrase analysis ---

/// A phrase with its part-of-speech code, as produced by the external tagger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedPhrase {
    pub phrase: String,
    pub tag: String,
}

impl TaggedPhrase {
    pub fn new(phrase: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            tag: tag.into(),
        }
    }
}

/// Category code -> phrase -> occurrence count.
/// Both levels keep first-seen order; report sections depend on it.
pub type CategoryCount = IndexMap<String, IndexMap<String, u64>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseCount {
    pub phrase: String,
    pub count: u64,
}

/// One labeled category section of the analysis report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    pub category: String,
    pub phrases: Vec<PhraseCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_record_serializes_with_report_field_names() {
        let record = RankingRecord {
            keyword: "best coffee".to_string(),
            rank: 3,
            url: "https://example.com/coffee".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 7).unwrap(),
            rank_type: RankType::Site,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["Keyword"], "best coffee");
        assert_eq!(json["Rank"], 3);
        assert_eq!(json["URLs"], "https://example.com/coffee");
        assert_eq!(json["Date"], "07-01-2025");
        assert_eq!(json["Type"], "My Site");
    }

    #[test]
    fn rank_type_round_trips_display_labels() {
        assert_eq!(RankType::Site.to_string(), "My Site");
        assert_eq!(RankType::Competitor.to_string(), "Competitor");
        let parsed: RankType = serde_json::from_str("\"Competitor\"").unwrap();
        assert_eq!(parsed, RankType::Competitor);
    }
}
