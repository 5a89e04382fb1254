use serplens_common::{CategoryCount, PhraseCount, ReportSection, SerpLensError};

const NOUN_PHRASE: &str = "NP";
/// Non-NP phrases must occur strictly more often than this to be reported.
const FREQUENCY_FLOOR: u64 = 5;

pub fn category_label(code: &str) -> &'static str {
    match code {
        "FW" => "Foreign Word",
        "NN" => "Noun",
        "NP" => "Noun Phrase",
        "NNP" => "Proper Noun",
        "DP" => "Data Phrase",
        _ => "Unknown Category",
    }
}

/// Build the categorized report from phrase counts and keyword hints.
///
/// The Noun-Phrase section comes first and keeps only phrases containing a
/// hint (case-insensitive substring). Every other category keeps phrases
/// above the frequency floor, in the counts' first-seen order. Empty
/// sections are omitted; an empty report is a failure, not a success.
pub fn build_report(
    counts: &CategoryCount,
    hints: &[String],
) -> Result<Vec<ReportSection>, SerpLensError> {
    let mut sections = Vec::new();

    if let Some(noun_phrases) = counts.get(NOUN_PHRASE) {
        let matched: Vec<PhraseCount> = noun_phrases
            .iter()
            .filter(|(phrase, _)| {
                let phrase_lower = phrase.to_lowercase();
                hints
                    .iter()
                    .any(|hint| phrase_lower.contains(&hint.to_lowercase()))
            })
            .map(|(phrase, count)| PhraseCount {
                phrase: phrase.clone(),
                count: *count,
            })
            .collect();

        if !matched.is_empty() {
            sections.push(ReportSection {
                category: category_label(NOUN_PHRASE).to_string(),
                phrases: matched,
            });
        }
    }

    for (code, phrases) in counts {
        if code == NOUN_PHRASE {
            continue;
        }
        let frequent: Vec<PhraseCount> = phrases
            .iter()
            .filter(|(_, count)| **count > FREQUENCY_FLOOR)
            .map(|(phrase, count)| PhraseCount {
                phrase: phrase.clone(),
                count: *count,
            })
            .collect();

        if !frequent.is_empty() {
            sections.push(ReportSection {
                category: category_label(code).to_string(),
                phrases: frequent,
            });
        }
    }

    if sections.is_empty() {
        return Err(SerpLensError::EmptyResult(
            "No result found. Please check your input and try again.".to_string(),
        ));
    }
    Ok(sections)
}
