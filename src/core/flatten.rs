use std::iter;

use chrono::NaiveDateTime;

use crate::{
    core::{
        document::{Detail, Document},
        layout::Layout,
        record::{Observation, Record},
    },
    error::Error,
    prelude::*,
};

/// Upstream timestamp format, month first.
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

pub fn flatten_demand(text: &str) -> Result<Vec<Record>, Error> {
    flatten(text, &Layout::DEMAND)
}

pub fn flatten_production(text: &str) -> Result<Vec<Record>, Error> {
    flatten(text, &Layout::PRODUCTION)
}

/// Flatten the feed document into the metadata record followed by the observations.
///
/// Details without a date or without the primary value are skipped. A date in any other format
/// fails the whole document.
#[instrument(skip_all, fields(kind = %layout.kind))]
pub fn flatten(text: &str, layout: &Layout) -> Result<Vec<Record>, Error> {
    let (metadata, details) = serde_json::from_str::<Document>(text)
        .and_then(Document::into_parts)
        .map_err(Error::Parse)?;

    let mut records = Vec::with_capacity(details.len() + 1);
    records.push(Record::Metadata(metadata));
    let mut n_skipped = 0_usize;
    for detail in &details {
        match observe(detail, layout)? {
            Some(observation) => records.push(Record::Observation(observation)),
            None => n_skipped += 1,
        }
    }

    debug!(n_details = details.len(), n_records = records.len(), n_skipped, "flattened");
    Ok(records)
}

fn observe(detail: &Detail, layout: &Layout) -> Result<Option<Observation>, Error> {
    // All the values are read upfront, so that a malformed one fails even a skipped detail.
    let primary = detail.value(layout.primary.source).map_err(Error::Parse)?;
    let secondary = layout
        .secondary
        .iter()
        .map(|column| Ok((column.output, detail.value(column.source)?)))
        .collect::<Result<Vec<_>, serde_json::Error>>()
        .map_err(Error::Parse)?;
    let (Some(date), Some(primary)) =
        (detail.date().filter(|date| !date.is_empty()), primary.filter(|value| !value.is_empty()))
    else {
        return Ok(None);
    };
    let values = iter::once((layout.primary.output, Some(primary))).chain(secondary).collect();
    Ok(Some(Observation { timestamp: parse_timestamp(date)?, values }))
}

/// Parse the timestamp strictly: the value must render back to itself.
fn parse_timestamp(value: &str) -> Result<NaiveDateTime, Error> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .ok()
        .filter(|timestamp| timestamp.format(TIMESTAMP_FORMAT).to_string() == value)
        .ok_or_else(|| Error::DateParse { value: value.to_owned() })
}
