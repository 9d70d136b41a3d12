use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use unicode_width::UnicodeWidthStr;

use crate::error::Result;
use crate::extractor::CorpRecord;

pub const DEFAULT_OUTPUT: &str = "jobkorea_test_data.csv";

const QUERY_HEADER: &str = "검색어";
const HEADERS: [&str; 3] = ["기업형태", "지역", "업종"];
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn headers(include_query: bool) -> Vec<&'static str> {
    let mut out = Vec::with_capacity(4);
    if include_query {
        out.push(QUERY_HEADER);
    }
    out.extend(HEADERS);
    out
}

fn row(record: &CorpRecord, include_query: bool) -> Vec<&str> {
    let mut out = Vec::with_capacity(4);
    if include_query {
        out.push(record.query.as_str());
    }
    out.extend([
        record.corp_type.as_str(),
        record.location.as_str(),
        record.industry.as_str(),
    ]);
    out
}

/// Writes BOM-prefixed UTF-8 CSV with a header row and no index column.
pub fn write_csv<W: Write>(writer: W, records: &[CorpRecord], include_query: bool) -> Result<()> {
    let mut writer = writer;
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(headers(include_query))?;
    for record in records {
        csv_writer.write_record(row(record, include_query))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn save_csv<P: AsRef<Path>>(path: P, records: &[CorpRecord], include_query: bool) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_csv(BufWriter::new(file), records, include_query)?;
    info!("Wrote {} rows to {:?}", records.len(), path);
    Ok(())
}

/// Renders the first `n` rows as a plain aligned table, row index first.
///
/// Columns are aligned by terminal display width, so Hangul counts as two cells.
pub fn preview(records: &[CorpRecord], n: usize, include_query: bool) -> String {
    let mut table: Vec<Vec<String>> = Vec::new();
    let mut header = vec![String::new()];
    header.extend(headers(include_query).into_iter().map(String::from));
    table.push(header);

    for (i, record) in records.iter().take(n).enumerate() {
        let mut line = vec![i.to_string()];
        line.extend(row(record, include_query).into_iter().map(String::from));
        table.push(line);
    }

    let cols = table[0].len();
    let widths: Vec<usize> = (0..cols)
        .map(|c| table.iter().map(|r| r[c].width()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for line in &table {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{}{}", cell, " ".repeat(w - cell.width())))
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(query: &str, t: &str, l: &str, i: &str) -> CorpRecord {
        CorpRecord {
            query: query.to_string(),
            corp_type: t.to_string(),
            location: l.to_string(),
            industry: i.to_string(),
        }
    }

    #[test]
    fn test_csv_has_bom_and_header() {
        let mut buf = Vec::new();
        let records = vec![record("벡스", "중소기업", "서울 강남구", "소프트웨어, 솔루션")];
        write_csv(&mut buf, &records, false).unwrap();

        assert!(buf.starts_with(UTF8_BOM));
        let text = String::from_utf8(buf[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text, "기업형태,지역,업종\n중소기업,서울 강남구,\"소프트웨어, 솔루션\"\n");
    }

    #[test]
    fn test_csv_with_query_column() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[record("벡스", "a", "b", "c")], true).unwrap();
        let text = String::from_utf8(buf[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text, "검색어,기업형태,지역,업종\n벡스,a,b,c\n");
    }

    #[test]
    fn test_empty_csv_still_has_header() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[], false).unwrap();
        let text = String::from_utf8(buf[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text, "기업형태,지역,업종\n");
    }

    #[test]
    fn test_preview_limits_rows() {
        let records: Vec<CorpRecord> = (0..8).map(|i| record("q", &i.to_string(), "x", "y")).collect();
        let out = preview(&records, 5, false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "   기업형태  지역  업종");
        assert_eq!(lines[1], format!("0  0{}x{}y", " ".repeat(9), " ".repeat(5)));
        assert!(lines[5].starts_with("4  4"));
    }

    #[test]
    fn test_preview_aligns_hangul_by_display_width() {
        let records = vec![
            record("q", "중소기업", "서울", "IT"),
            record("q", "abc", "부산 해운대구", "조선"),
        ];
        let out = preview(&records, 5, false);
        let lines: Vec<&str> = out.lines().collect();

        // Every row's third column starts at the same display column.
        let col_start = |line: &str, needle: &str| line[..line.find(needle).unwrap()].width();
        assert_eq!(col_start(lines[1], "서울"), col_start(lines[2], "부산"));
        assert_eq!(col_start(lines[1], "IT"), col_start(lines[2], "조선"));
        assert_eq!(col_start(lines[0], "지역"), col_start(lines[1], "서울"));
    }
}
