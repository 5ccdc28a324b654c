//! Table output formatting

use tabled::{
    Table, Tabled,
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Format rows as a table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "Aucun résultat.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// Format a single record vertically, one `FIELD | value` line per column
pub fn format_record<T: Tabled>(record: &T) -> String {
    let mut builder = Builder::default();
    for (header, value) in T::headers().into_iter().zip(record.fields()) {
        builder.push_record([header.to_string(), value.to_string()]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}
