use csv::{ReaderBuilder, StringRecord};
use shared_types::{ContactStatus, CreateContactRequest, LeadSource, LeadTier};
use std::collections::HashMap;

use crate::CsvError;

/// Columns understood by the contact importer. Matching is case-insensitive;
/// anything else in the file is ignored.
pub const IMPORT_COLUMNS: [&str; 8] = [
    "Name", "Company", "Email", "Phone", "Industry", "Status", "Tier", "Source",
];

/// A row that could not become a contact.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 1-based line number in the file, header included.
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct ImportBatch {
    pub contacts: Vec<CreateContactRequest>,
    pub skipped: Vec<SkippedRow>,
}

pub struct CsvParser {
    delimiter: u8,
}

impl CsvParser {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parses an import file into create requests. Rows without a name are
    /// skipped and reported rather than failing the whole batch.
    pub fn parse_contacts(&self, content: &[u8]) -> Result<ImportBatch, CsvError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content);

        let columns = ColumnIndex::from_headers(reader.headers()?)?;

        let mut batch = ImportBatch::default();
        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or(0);
                    batch.skipped.push(SkippedRow {
                        line,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            if record.iter().all(|f| f.is_empty()) {
                continue;
            }

            match columns.to_request(&record) {
                Some(request) => batch.contacts.push(request),
                None => batch.skipped.push(SkippedRow {
                    line,
                    reason: "missing name".to_string(),
                }),
            }
        }

        Ok(batch)
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}

struct ColumnIndex {
    positions: HashMap<&'static str, usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, CsvError> {
        let mut positions = HashMap::new();
        for column in IMPORT_COLUMNS {
            if let Some(i) = headers
                .iter()
                .position(|h| h.trim().trim_start_matches('\u{feff}').eq_ignore_ascii_case(column))
            {
                positions.insert(column, i);
            }
        }

        if !positions.contains_key("Name") {
            return Err(CsvError::MissingColumn("Name".to_string()));
        }

        Ok(Self { positions })
    }

    fn get<'r>(&self, record: &'r StringRecord, column: &str) -> Option<&'r str> {
        self.positions
            .get(column)
            .and_then(|&i| record.get(i))
            .filter(|v| !v.is_empty())
    }

    fn to_request(&self, record: &StringRecord) -> Option<CreateContactRequest> {
        let name = self.get(record, "Name")?.to_string();

        Some(CreateContactRequest {
            name,
            company: self.get(record, "Company").unwrap_or_default().to_string(),
            email: self.get(record, "Email").map(str::to_string),
            phone: self.get(record, "Phone").map(str::to_string),
            industry: self.get(record, "Industry").map(str::to_string),
            tier: self.get(record, "Tier").map(LeadTier::parse).unwrap_or_default(),
            status: self.get(record, "Status").map(ContactStatus::parse),
            source: self.get(record, "Source").map(LeadSource::parse).unwrap_or_default(),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Name,Company,Email,Phone,Industry,Status,Tier,Source
\"John Doe\",\"Acme Corp\",\"john@acme.com\",\"(555) 123-4567\",\"Technology\",\"Lead\",\"High\",\"manual\"
\"Jane Smith\",\"Tech Solutions\",\"jane@techsol.com\",\"(555) 234-5678\",\"Software\",\"Contacted\",\"Medium\",\"google\"";

    #[test]
    fn test_parse_contacts() {
        let parser = CsvParser::new();
        let batch = parser.parse_contacts(SAMPLE.as_bytes()).unwrap();

        assert_eq!(batch.contacts.len(), 2);
        assert!(batch.skipped.is_empty());

        let john = &batch.contacts[0];
        assert_eq!(john.name, "John Doe");
        assert_eq!(john.company, "Acme Corp");
        assert_eq!(john.tier, LeadTier::High);
        assert_eq!(john.status, Some(ContactStatus::Lead));
        assert_eq!(john.source, LeadSource::Manual);

        let jane = &batch.contacts[1];
        assert_eq!(jane.status, Some(ContactStatus::Contacted));
        assert_eq!(jane.source, LeadSource::Google);
    }

    #[test]
    fn test_headers_are_case_insensitive_and_partial() {
        let csv = "email,NAME,notes\nbob@example.com,Bob,ignored\n,,\n";
        let batch = CsvParser::new().parse_contacts(csv.as_bytes()).unwrap();

        assert_eq!(batch.contacts.len(), 1);
        assert_eq!(batch.contacts[0].name, "Bob");
        assert_eq!(batch.contacts[0].email.as_deref(), Some("bob@example.com"));
        assert_eq!(batch.contacts[0].tier, LeadTier::Medium);
        assert_eq!(batch.contacts[0].company, "");
    }

    #[test]
    fn test_rows_without_name_are_skipped() {
        let csv = "Name,Company\nAlice,Acme\n,Orphan Co\n";
        let batch = CsvParser::new().parse_contacts(csv.as_bytes()).unwrap();

        assert_eq!(batch.contacts.len(), 1);
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].line, 3);
    }

    #[test]
    fn test_missing_name_column_is_an_error() {
        let csv = "Company,Email\nAcme,a@acme.com\n";
        let err = CsvParser::new().parse_contacts(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, CsvError::MissingColumn(ref c) if c == "Name"));
    }

    #[test]
    fn test_custom_delimiter() {
        let csv = "Name;Company;Tier\nAlice;Acme, Inc;High\n";
        let batch = CsvParser::new()
            .with_delimiter(b';')
            .parse_contacts(csv.as_bytes())
            .unwrap();

        assert_eq!(batch.contacts.len(), 1);
        assert_eq!(batch.contacts[0].company, "Acme, Inc");
        assert_eq!(batch.contacts[0].tier, LeadTier::High);
    }
}
