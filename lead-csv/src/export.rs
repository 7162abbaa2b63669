use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};
use shared_types::Contact;
use std::io::Write;

use crate::CsvError;

/// Fixed export header, in column order.
pub const EXPORT_HEADERS: [&str; 11] = [
    "Name", "Company", "Email", "Phone", "Industry", "Status", "Tier", "Source", "City", "State",
    "Website",
];

/// Writes one header row and one row per contact. Every field is quoted and
/// missing values become empty strings.
pub fn write_contacts<W: Write>(writer: W, contacts: &[Contact]) -> Result<(), CsvError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    writer.write_record(EXPORT_HEADERS)?;
    for contact in contacts {
        writer.write_record(contact_row(contact))?;
    }
    writer.flush()?;

    Ok(())
}

pub fn export_contacts(contacts: &[Contact]) -> Result<Vec<u8>, CsvError> {
    let mut buf = Vec::new();
    write_contacts(&mut buf, contacts)?;
    Ok(buf)
}

/// `contacts-YYYY-MM-DD.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("contacts-{}.csv", date.format("%Y-%m-%d"))
}

fn contact_row(contact: &Contact) -> [String; 11] {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    [
        contact.name.clone(),
        opt(&contact.company),
        opt(&contact.email),
        opt(&contact.phone),
        opt(&contact.industry),
        contact.status.to_string(),
        contact.tier.as_ref().map(|t| t.to_string()).unwrap_or_default(),
        contact.source.as_ref().map(|s| s.to_string()).unwrap_or_default(),
        opt(&contact.city),
        opt(&contact.state),
        opt(&contact.website_url),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{ContactStatus, LeadSource, LeadTier};

    fn contact(id: i64, name: &str) -> Contact {
        Contact {
            id,
            name: name.to_string(),
            company: Some("Acme \"Best\" Roofing".to_string()),
            email: Some(format!("{}@acme.com", id)),
            tier: Some(LeadTier::High),
            status: ContactStatus::NotInterested,
            source: Some(LeadSource::Yelp),
            ..Default::default()
        }
    }

    #[test]
    fn test_one_row_per_contact_plus_header() {
        let contacts = vec![contact(1, "Ann"), contact(2, "Ben"), contact(3, "Cy")];
        let bytes = export_contacts(&contacts).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "\"Name\",\"Company\",\"Email\",\"Phone\",\"Industry\",\"Status\",\"Tier\",\"Source\",\"City\",\"State\",\"Website\""
        );
    }

    #[test]
    fn test_every_field_quoted() {
        let bytes = export_contacts(&[contact(9, "Dee")]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let row = text.lines().nth(1).unwrap();

        assert_eq!(
            row,
            "\"Dee\",\"Acme \"\"Best\"\" Roofing\",\"9@acme.com\",\"\",\"\",\"Not Interested\",\"High\",\"yelp\",\"\",\"\",\"\""
        );
    }

    #[test]
    fn test_empty_export_has_only_header() {
        let bytes = export_contacts(&[]).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        assert_eq!(export_file_name(date), "contacts-2025-01-09.csv");
    }
}
