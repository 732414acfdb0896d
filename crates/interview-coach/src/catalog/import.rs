use std::io::Read;

use serde::Deserialize;

use super::domain::{Expectations, Question, QuestionCategory, QuestionId};
use super::CatalogError;

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    category: String,
    prompt: String,
    core_topics: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    bonus_topics: Option<String>,
    min_word_count: u32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    competencies: Option<String>,
    #[serde(default)]
    guidance: String,
}

impl CatalogRow {
    fn into_question(self, line: u64) -> Result<Question, CatalogError> {
        let category =
            QuestionCategory::parse(&self.category).ok_or_else(|| CatalogError::UnknownCategory {
                line,
                value: self.category.clone(),
            })?;

        Ok(Question {
            id: QuestionId(self.id.trim().to_string()),
            category,
            prompt: self.prompt,
            expectations: Expectations {
                core_topics: split_list(&self.core_topics),
                bonus_topics: self.bonus_topics.as_deref().map(split_list).unwrap_or_default(),
                min_word_count: self.min_word_count,
                competencies: self
                    .competencies
                    .as_deref()
                    .map(split_list)
                    .unwrap_or_default(),
                guidance: self.guidance,
            },
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read question rows from a CSV export. List columns are `;`-separated.
pub(crate) fn read_csv<R: Read>(reader: R) -> Result<Vec<Question>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut questions = Vec::new();
    for (index, row) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        // header occupies line 1
        let line = index as u64 + 2;
        questions.push(row?.into_question(line)?);
    }

    Ok(questions)
}
