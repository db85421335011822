use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::core::{Layout, Record};

pub fn build_records_table(layout: &Layout, records: &[Record]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    let mut header = vec!["Date", "Time"];
    header.extend(layout.columns().map(|column| column.output));
    table.set_header(header);
    for record in records {
        let Record::Observation(observation) = record else {
            continue;
        };
        let mut row = vec![
            Cell::new(observation.date()).add_attribute(Attribute::Dim),
            Cell::new(observation.time()),
        ];
        row.extend(layout.columns().map(|column| match observation.value(column.output) {
            Some(value) => Cell::new(value).set_alignment(CellAlignment::Right),
            None => Cell::new("-").set_alignment(CellAlignment::Right).fg(Color::DarkGrey),
        }));
        table.add_row(row);
    }
    table
}
