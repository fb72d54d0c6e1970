//! Two-column CSV export of collected answers.
//!
//! The file has a `Pillar,Answer` header and one row per answer. Fields
//! containing a comma, quote, or line break are quoted, with inner quotes
//! doubled. Answers often span several lines.

use pillarwise_core::{AnswerMap, ExportError};
use std::path::Path;

const HEADER: [&str; 2] = ["Pillar", "Answer"];

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render answers as CSV text.
pub fn to_csv(answers: &AnswerMap) -> String {
    let mut out = format!("{}\n", HEADER.join(","));
    for (pillar, answer) in answers.iter() {
        out.push_str(&quote(pillar));
        out.push(',');
        out.push_str(&quote(answer));
        out.push('\n');
    }
    out
}

/// Split CSV text into records, honoring quoted fields.
///
/// Returns each record with the 1-based line it started on.
fn parse_records(text: &str) -> Result<Vec<(usize, Vec<String>)>, ExportError> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push((record_line, std::mem::take(&mut record)));
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(ExportError::Malformed {
            line: record_line,
            reason: "unterminated quoted field".into(),
        });
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push((record_line, record));
    }

    Ok(records)
}

/// Parse CSV text produced by [`to_csv`] back into answers.
pub fn from_csv(text: &str) -> Result<AnswerMap, ExportError> {
    let mut records = parse_records(text)?.into_iter();

    match records.next() {
        Some((_, header)) if header == HEADER => {}
        Some((line, header)) => {
            return Err(ExportError::Malformed {
                line,
                reason: format!("expected header 'Pillar,Answer', found '{}'", header.join(",")),
            });
        }
        None => {
            return Err(ExportError::Malformed {
                line: 1,
                reason: "missing header".into(),
            });
        }
    }

    let mut answers = AnswerMap::new();
    for (line, record) in records {
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        let [pillar, answer]: [String; 2] =
            record.try_into().map_err(|r: Vec<String>| ExportError::Malformed {
                line,
                reason: format!("expected 2 columns, found {}", r.len()),
            })?;
        answers.insert(pillar, answer);
    }
    Ok(answers)
}

/// Write answers to a CSV file.
pub fn write_csv(path: &Path, answers: &AnswerMap) -> Result<(), ExportError> {
    std::fs::write(path, to_csv(answers)).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    tracing::info!(path = %path.display(), rows = answers.len(), "Exported answers");
    Ok(())
}

/// Read answers from a CSV file.
pub fn read_csv(path: &Path) -> Result<AnswerMap, ExportError> {
    let text = std::fs::read_to_string(path).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    from_csv(&text)
}
