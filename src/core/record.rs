use chrono::NaiveDateTime;
use serde::{Serialize, Serializer, ser::SerializeMap};

pub const DATE_FORMAT: &str = "%m/%d/%Y";
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Flattened feed entry. The first one in a response is always [`Record::Metadata`].
#[must_use]
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Metadata(Metadata),
    Observation(Observation),
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Metadata {
    #[serde(rename = "dateStart")]
    pub date_start: Option<String>,

    #[serde(rename = "dateEnd")]
    pub date_end: Option<String>,

    #[serde(rename = "recentHour")]
    pub recent_hour: Option<String>,

    #[serde(rename = "indexDonneePlusRecent")]
    pub most_recent_index: i64,

    #[serde(rename = "nbDateAvecData")]
    pub n_dates_with_data: i64,
}

/// Single timestamped observation.
///
/// Serialized as `date`, `time`, and then the values in the layout order.
#[must_use]
#[derive(Debug, PartialEq, Eq)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub values: Vec<(&'static str, Option<String>)>,
}

impl Observation {
    pub fn date(&self) -> String {
        self.timestamp.format(DATE_FORMAT).to_string()
    }

    pub fn time(&self) -> String {
        self.timestamp.format(TIME_FORMAT).to_string()
    }

    pub fn value(&self, output: &str) -> Option<&str> {
        self.values.iter().find(|(name, _)| *name == output)?.1.as_deref()
    }
}

impl Serialize for Observation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 2))?;
        map.serialize_entry("date", &self.date())?;
        map.serialize_entry("time", &self.time())?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
