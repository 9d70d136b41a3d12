use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use calamine::{open_workbook_auto, Reader};
use log::{info, warn};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Header names accepted for the company-name column, matched case-insensitively.
pub const COMPANY_COLUMNS: [&str; 5] = [
    "기업명",
    "company",
    "company name",
    "company_name",
    "corp_name",
];

#[derive(Debug, Deserialize)]
struct InputRecord {
    company: String,
}

/// Reads company names from a CSV or Excel sheet.
///
/// Names are trimmed, blanks dropped and duplicates removed keeping first-seen order.
pub fn load_company_names<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
    let path = filename.as_ref();
    if !path.exists() {
        return Err(Error::InputNotFound(path.to_path_buf()));
    }

    let is_excel = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xls"));

    let names = if is_excel { load_excel(path)? } else { load_csv(path)? };
    let unique = dedup_names(names);
    info!("Loaded {} company names from {:?}", unique.len(), path);
    Ok(unique)
}

/// Trims, drops blanks and removes repeats while keeping order.
pub fn dedup_names<I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty() && seen.insert(n.clone()))
        .collect()
}

fn company_column<'a, I>(headers: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    headers.into_iter().position(|h| {
        let h = h.trim_start_matches('\u{feff}').trim().to_lowercase();
        COMPANY_COLUMNS.iter().any(|c| *c == h)
    })
}

fn missing_column(path: &Path) -> Error {
    Error::MissingColumn {
        path: path.to_path_buf(),
        expected: COMPANY_COLUMNS.join(", "),
    }
}

fn load_csv(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let headers = rdr.headers()?.clone();
    let idx = company_column(headers.iter()).ok_or_else(|| missing_column(path))?;

    // Only the matched column keeps a name serde knows; the rest are ignored.
    let mut renamed = csv::StringRecord::new();
    for i in 0..headers.len() {
        renamed.push_field(if i == idx { "company" } else { "" });
    }

    let mut names = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("Error parsing CSV record {}: {}", line + 2, e);
                continue;
            }
        };
        match record.deserialize::<InputRecord>(Some(&renamed)) {
            Ok(r) => names.push(r.company),
            Err(e) => warn!("Skipping CSV record {}: {}", line + 2, e),
        }
    }
    Ok(names)
}

fn load_excel(path: &Path) -> Result<Vec<String>> {
    let mut workbook = open_workbook_auto(path)?;
    let worksheets = workbook.worksheets();
    let Some((_name, range)) = worksheets.first() else {
        return Ok(Vec::new());
    };

    let mut rows = range.rows();
    let header: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(|c| c.to_string()).collect(),
        None => return Ok(Vec::new()),
    };
    let idx = company_column(header.iter().map(String::as_str)).ok_or_else(|| missing_column(path))?;

    Ok(rows
        .filter_map(|row| row.get(idx).map(|c| c.to_string()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn csv_file(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_loads_korean_header_and_dedups() {
        let f = csv_file("기업명,대표\n벡스인텔리전스,김\n 삼성전자 ,이\n벡스인텔리전스,박\n,최\n");
        let names = load_company_names(f.path()).unwrap();
        assert_eq!(names, vec!["벡스인텔리전스", "삼성전자"]);
    }

    #[test]
    fn test_accepts_alias_header() {
        let f = csv_file("id,Company Name\n1,Acme\n2,Globex\n");
        assert_eq!(load_company_names(f.path()).unwrap(), vec!["Acme", "Globex"]);
    }

    #[test]
    fn test_missing_column() {
        let f = csv_file("name,city\nAcme,Seoul\n");
        assert!(matches!(load_company_names(f.path()), Err(Error::MissingColumn { .. })));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_company_names("/definitely/not/here.csv"),
            Err(Error::InputNotFound(_))
        ));
    }

    fn fixture(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
    }

    #[test]
    fn test_loads_excel_company_column() {
        let names = load_company_names(fixture("companies.xlsx")).unwrap();
        assert_eq!(names, vec!["벡스인텔리전스", "삼성전자", "카카오"]);
    }

    #[test]
    fn test_excel_missing_column() {
        assert!(matches!(
            load_company_names(fixture("no_company_column.xlsx")),
            Err(Error::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_empty_excel_sheet_has_no_names() {
        assert!(load_company_names(fixture("empty.xlsx")).unwrap().is_empty());
    }

    #[test]
    fn test_business_name_is_not_a_company_column() {
        let f = csv_file("Business Name\nAcme\n");
        assert!(matches!(load_company_names(f.path()), Err(Error::MissingColumn { .. })));
    }

    #[test]
    fn test_dedup_names() {
        let names = vec!["a".to_string(), " a ".to_string(), "".to_string(), "b".to_string()];
        assert_eq!(dedup_names(names), vec!["a", "b"]);
    }
}
