//! Downloadable CSV template with sample rows.
//!
//! The header set matches the field-pattern registry so a filled-in template
//! maps every column at full confidence.

use std::io::Write;

use csv::WriterBuilder;

use crate::error::{IngestError, Result};

/// Template header row.
pub const TEMPLATE_HEADERS: [&str; 17] = [
    "Organizations",
    "Priority-Focus",
    "Segment",
    "Distributor",
    "Primary Account Manager",
    "Secondary Account Manager",
    "Address",
    "City",
    "State",
    "Zip",
    "Phone",
    "Website",
    "Contact",
    "Contact Email",
    "Contact Phone",
    "Title",
    "Notes",
];

/// Sample rows shipped with the template.
pub const TEMPLATE_ROWS: [[&str; 17]; 3] = [
    [
        "Harbor Street Bistro",
        "A",
        "",
        "No",
        "Dana Whitfield",
        "",
        "412 Harbor St",
        "Portland",
        "ME",
        "04101",
        "207-555-0142",
        "https://harborstreetbistro.example",
        "Reyes, Marco",
        "marco@harborstreetbistro.example",
        "207-555-0199",
        "Executive Chef",
        "Prefers Tuesday deliveries",
    ],
    [
        "Harbor Street Bistro",
        "A",
        "",
        "No",
        "Dana Whitfield",
        "",
        "412 Harbor St",
        "Portland",
        "ME",
        "04101",
        "207-555-0142",
        "https://harborstreetbistro.example",
        "Lena Ortiz",
        "lena@harborstreetbistro.example",
        "",
        "General Manager",
        "",
    ],
    [
        "Northeast Foodservice Supply",
        "B",
        "Broadline Distributor",
        "Yes",
        "Sam Okafor",
        "Dana Whitfield",
        "90 Commerce Way",
        "Worcester",
        "MA",
        "01608",
        "508-555-0110",
        "",
        "Priya Nair",
        "priya.nair@nefs.example",
        "508-555-0123",
        "Purchasing Director",
        "Quarterly review, \"key account\"",
    ],
];

/// Write the template header and sample rows with standard CSV quoting.
pub fn write_template<W: Write>(output: W) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(output);
    writer.write_record(TEMPLATE_HEADERS)?;
    for row in &TEMPLATE_ROWS {
        writer.write_record(row)?;
    }
    writer.flush().map_err(IngestError::Write)?;
    Ok(())
}

/// The template as a string.
pub fn template_csv() -> Result<String> {
    let mut buffer = Vec::new();
    write_template(&mut buffer)?;
    String::from_utf8(buffer).map_err(|e| IngestError::Write(std::io::Error::other(e)))
}
