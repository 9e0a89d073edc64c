use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crm_map::{ConfidenceLevel, LOW_CONFIDENCE_THRESHOLD, MappingState};
use crm_model::{ImportResult, MappingTarget, ValidationResult};
use crm_validate::ImportPreview;

pub fn print_mappings(state: &MappingState, validation: &ValidationResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Field"),
        header_cell("Confidence"),
        header_cell("Source"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for mapping in state.mappings() {
        let field_cell = match mapping.maps_to {
            MappingTarget::Field(field) => Cell::new(field.label()),
            MappingTarget::Skip => dim_cell("skip"),
        };
        let source_cell = if mapping.user_overridden {
            Cell::new("override").fg(Color::Blue)
        } else {
            dim_cell("auto")
        };
        table.add_row(vec![
            Cell::new(&mapping.csv_column),
            field_cell,
            confidence_cell(mapping.confidence, mapping.maps_to.is_skip()),
            source_cell,
        ]);
    }
    println!("{table}");
    print_validation(validation);
}

pub fn print_validation(validation: &ValidationResult) {
    for error in &validation.errors {
        eprintln!("error: {error}");
    }
    for warning in &validation.warnings {
        eprintln!("warning: {warning}");
    }
}

pub fn print_preview(preview: &ImportPreview, groups: usize, contacts: usize) {
    let mut counts = Table::new();
    counts.set_header(vec![
        header_cell("Rows"),
        header_cell("Valid"),
        header_cell("Invalid"),
        header_cell("With warnings"),
        header_cell("Organizations"),
        header_cell("Contacts"),
    ]);
    apply_table_style(&mut counts);
    counts.add_row(vec![
        Cell::new(preview.total_rows).add_attribute(Attribute::Bold),
        count_cell(preview.valid_count, Color::Green),
        count_cell(preview.invalid_count, Color::Red),
        count_cell(preview.warning_count, Color::Yellow),
        Cell::new(groups),
        Cell::new(contacts),
    ]);
    println!("{counts}");

    if !preview.valid_sample.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Organization"),
            header_cell("Type"),
            header_cell("Priority"),
            header_cell("Segment"),
            header_cell("City"),
        ]);
        apply_table_style(&mut table);
        for organization in &preview.valid_sample {
            table.add_row(vec![
                Cell::new(&organization.name),
                Cell::new(organization.organization_type),
                Cell::new(organization.priority),
                Cell::new(&organization.segment),
                optional_cell(organization.city.as_deref()),
            ]);
        }
        println!();
        println!("Sample rows:");
        println!("{table}");
    }

    if !preview.invalid_sample.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Row"),
            header_cell("Organization"),
            header_cell("Errors"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 0, CellAlignment::Right);
        for row in &preview.invalid_sample {
            table.add_row(vec![
                Cell::new(row.row_number),
                optional_cell(Some(row.organization_name.as_str()).filter(|n| !n.is_empty())),
                Cell::new(row.errors.join("; ")).fg(Color::Red),
            ]);
        }
        println!();
        println!("Invalid rows:");
        println!("{table}");
    }

    for warning in &preview.warnings {
        eprintln!("warning: {warning}");
    }
}

pub fn print_import(result: &ImportResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Created"),
        header_cell("Skipped"),
        header_cell("Failed"),
        header_cell("Contacts"),
        header_cell("Contacts failed"),
    ]);
    apply_summary_table_style(&mut table);
    table.add_row(vec![
        count_cell(result.organizations_created, Color::Green),
        count_cell(result.organizations_skipped, Color::Yellow),
        count_cell(result.organizations_failed, Color::Red),
        Cell::new(result.contacts_created),
        count_cell(result.contacts_failed, Color::Red),
    ]);
    println!("{table}");

    if !result.batch_errors.is_empty() {
        let mut errors = Table::new();
        errors.set_header(vec![
            header_cell("Batch"),
            header_cell("Records"),
            header_cell("Error"),
        ]);
        apply_table_style(&mut errors);
        align_column(&mut errors, 0, CellAlignment::Right);
        align_column(&mut errors, 1, CellAlignment::Right);
        for error in &result.batch_errors {
            errors.add_row(vec![
                Cell::new(error.batch_index + 1),
                Cell::new(error.record_count),
                Cell::new(&error.message).fg(Color::Red),
            ]);
        }
        println!();
        println!("Failed batches:");
        println!("{errors}");
    }
    for failure in &result.failures {
        eprintln!("warning: {}: {}", failure.name, failure.error);
    }
    println!("{}", result.message);
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn confidence_cell(confidence: u8, skipped: bool) -> Cell {
    if skipped {
        return dim_cell("-");
    }
    let color = match ConfidenceLevel::categorize(confidence, LOW_CONFIDENCE_THRESHOLD) {
        ConfidenceLevel::High => Color::Green,
        ConfidenceLevel::Medium => Color::Yellow,
        ConfidenceLevel::Low => Color::Red,
    };
    Cell::new(format!("{confidence}%")).fg(color)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
