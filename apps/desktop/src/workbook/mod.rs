//! Topic file readers.
//!
//! `.json` topics hold an array of `{word, meaning, example}` records.
//! Everything else is read as CSV: when the header row names a `word` and a
//! `meaning` column the rows are keyed by those names, otherwise they are
//! taken positionally (word, meaning, example) with the header skipped.

use thiserror::Error;
use vocab_core::{CellValue, RawRecord, RawRow, TopicRows};

#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WorkbookError>;

/// Parse the raw bytes of a topic file.
pub fn parse(topic_id: &str, bytes: &[u8]) -> Result<TopicRows> {
    if topic_id.to_ascii_lowercase().ends_with(".json") {
        let records: Vec<RawRecord> = serde_json::from_slice(bytes)?;
        return Ok(TopicRows::Records(records));
    }
    let delimiter = if topic_id.to_ascii_lowercase().ends_with(".tsv") {
        b'\t'
    } else {
        b','
    };
    read_csv(bytes, delimiter)
}

fn read_csv(bytes: &[u8], delimiter: u8) -> Result<TopicRows> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: csv::StringRecord = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    let named = headers.iter().any(|h| h == "word") && headers.iter().any(|h| h == "meaning");

    if named {
        reader.set_headers(headers);
        let records = reader
            .deserialize::<RawRecord>()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        return Ok(TopicRows::Records(records));
    }

    // the header row stays in place; the normalizer skips it
    let mut rows = vec![to_row(&headers)];
    for record in reader.records() {
        rows.push(to_row(&record?));
    }
    Ok(TopicRows::Positional(rows))
}

fn to_row(record: &csv::StringRecord) -> RawRow {
    record.iter().map(cell).collect()
}

/// CSV carries no cell types, so every non-blank field stays text as written.
fn cell(field: &str) -> CellValue {
    if field.trim().is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(field.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn positional_rows_keep_header() {
        let csv = "Từ vựng,Nghĩa,Ví dụ\ncat,con mèo,The cat sleeps.\n2024,năm,\n";
        let TopicRows::Positional(rows) = parse("animals.csv", csv.as_bytes()).unwrap() else {
            panic!("positional rows expected");
        };
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][0], CellValue::Text("cat".into()));
        assert_eq!(rows[2][0], CellValue::Text("2024".into()));
        assert_eq!(rows[2][2], CellValue::Empty);
    }

    #[test]
    fn numeric_looking_words_are_kept_verbatim() {
        let csv = "word,nghĩa,ví dụ\n007,bond,\nTRUE,đúng,\n1e3,nghìn,\n";
        let TopicRows::Positional(rows) = parse("codes.csv", csv.as_bytes()).unwrap() else {
            panic!("positional rows expected");
        };
        let words: Vec<Option<String>> = rows[1..].iter().map(|r| r[0].as_text()).collect();
        assert_eq!(
            words,
            vec![Some("007".to_string()), Some("TRUE".to_string()), Some("1e3".to_string())]
        );
    }

    #[test]
    fn short_rows_are_accepted() {
        let csv = "a,b,c\ndog\n";
        let TopicRows::Positional(rows) = parse("t.csv", csv.as_bytes()).unwrap() else {
            panic!("positional rows expected");
        };
        assert_eq!(rows[1], vec![CellValue::Text("dog".into())]);
    }

    #[test]
    fn named_headers_produce_records() {
        let csv = "Meaning, Word ,Example\ncon chó,dog,\n";
        let rows = parse("pets.csv", csv.as_bytes()).unwrap();
        assert_eq!(
            rows,
            TopicRows::Records(vec![RawRecord {
                word: Some("dog".into()),
                meaning: Some("con chó".into()),
                example: None,
            }])
        );
    }

    #[test]
    fn json_topics_are_records() {
        let json = r#"[{"Word": "sun", "Meaning": "mặt trời"}]"#;
        let TopicRows::Records(records) = parse("sky.json", json.as_bytes()).unwrap() else {
            panic!("records expected");
        };
        assert_eq!(records[0].word.as_deref(), Some("sun"));
        assert_eq!(records[0].example, None);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(parse("x.json", b"{"), Err(WorkbookError::Json(_))));
    }

    #[test]
    fn tab_separated() {
        let tsv = "w\tm\te\nrain\tmưa\tIt rains.\n";
        let TopicRows::Positional(rows) = parse("weather.tsv", tsv.as_bytes()).unwrap() else {
            panic!("positional rows expected");
        };
        assert_eq!(rows[1][1], CellValue::Text("mưa".into()));
    }
}
