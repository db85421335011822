use serde::{
    Deserialize,
    Deserializer,
    de::{self, Unexpected},
};
use serde_json::{Map, Value};
use serde_with::{DeserializeAs, serde_as};

use crate::core::record::Metadata;

/// Upstream feed document, as published on the open-data portal.
///
/// Both demand and production feeds share the envelope, only the keys inside `valeurs` differ.
#[must_use]
#[serde_as]
#[derive(Deserialize)]
pub struct Document {
    #[serde(rename = "dateStart")]
    pub date_start: Option<Text>,

    #[serde(rename = "dateEnd")]
    pub date_end: Option<Text>,

    #[serde(rename = "recentHour")]
    pub recent_hour: Option<Text>,

    /// Index of the most recent detail that carries data.
    #[serde_as(as = "Option<serde_with::PickFirst<(_, RoundedFloat, serde_with::DisplayFromStr)>>")]
    #[serde(rename = "indexDonneePlusRecent")]
    pub most_recent_index: Option<i64>,

    #[serde_as(as = "Option<serde_with::PickFirst<(_, RoundedFloat, serde_with::DisplayFromStr)>>")]
    #[serde(rename = "nbDateAvecData")]
    pub n_dates_with_data: Option<i64>,

    #[serde(rename = "details")]
    pub details: Vec<Value>,
}

impl Document {
    /// Split off the metadata and parse the details.
    ///
    /// Non-object entries are dropped, any object that is not a valid detail fails the document.
    pub fn into_parts(self) -> Result<(Metadata, Vec<Detail>), serde_json::Error> {
        let metadata = Metadata {
            date_start: self.date_start.map(String::from),
            date_end: self.date_end.map(String::from),
            recent_hour: self.recent_hour.map(String::from),
            most_recent_index: self.most_recent_index.unwrap_or_default(),
            n_dates_with_data: self.n_dates_with_data.unwrap_or_default(),
        };
        let details = self
            .details
            .into_iter()
            .filter(Value::is_object)
            .map(serde_json::from_value::<Detail>)
            .collect::<Result<_, _>>()?;
        Ok((metadata, details))
    }
}

#[must_use]
#[derive(Deserialize)]
pub struct Detail {
    #[serde(rename = "date")]
    pub date: Option<Text>,

    /// Only the looked-up keys are parsed, the rest may be anything.
    #[serde(rename = "valeurs")]
    pub values: Option<Map<String, Value>>,
}

impl Detail {
    pub fn date(&self) -> Option<&str> {
        self.date.as_ref().map(Text::as_str)
    }

    /// Value under `valeurs.<source>`, `None` when the key is missing or `null`.
    ///
    /// Fails when the value is not a scalar.
    pub fn value(&self, source: &str) -> Result<Option<String>, serde_json::Error> {
        match self.values.as_ref().and_then(|values| values.get(source)) {
            Some(value) => Ok(Option::<Text>::deserialize(value)?.map(String::from)),
            None => Ok(None),
        }
    }
}

/// Scalar kept in its textual form.
///
/// The feed is not consistent about quoting the numbers, so both strings and numbers are accepted,
/// and numbers keep their JSON representation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Text(String);

impl Text {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Text> for String {
    fn from(text: Text) -> Self {
        text.0
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Scalar {
            String(String),
            Number(serde_json::Number),
            Bool(bool),
        }

        Ok(Self(match Scalar::deserialize(deserializer)? {
            Scalar::String(string) => string,
            Scalar::Number(number) => number.to_string(),
            Scalar::Bool(true) => "True".to_owned(),
            Scalar::Bool(false) => "False".to_owned(),
        }))
    }
}

/// Counter sent as a float, rounded half to even.
struct RoundedFloat;

impl<'de> DeserializeAs<'de, i64> for RoundedFloat {
    #[expect(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn deserialize_as<D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let value = f64::deserialize(deserializer)?;
        let rounded = value.round_ties_even();
        if rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64 {
            Ok(rounded as i64)
        } else {
            Err(de::Error::invalid_value(Unexpected::Float(value), &"an integer"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn test_deserialize_demand_document_ok() -> Result {
        // language=json
        let body = r#"{
            "dateStart": "01/05/2024 00:00:00",
            "dateEnd": "01/06/2024 00:00:00",
            "recentHour": "01/05/2024 13:00:00",
            "indexDonneePlusRecent": 52,
            "nbDateAvecData": "53",
            "details": [
                {"date": "01/05/2024 13:00:00", "valeurs": {"demandeTotal": 21640.5}},
                {"date": "01/05/2024 13:15:00", "valeurs": {"demandeTotal": "21702"}},
                {"date": "01/05/2024 13:30:00", "valeurs": {}},
                {"date": "01/05/2024 13:45:00"},
                null,
                42
            ]
        }"#;
        let (metadata, details) = serde_json::from_str::<Document>(body)?.into_parts()?;
        assert_eq!(metadata.most_recent_index, 52);
        assert_eq!(metadata.n_dates_with_data, 53);
        assert_eq!(details.len(), 4);
        assert_eq!(details[0].value("demandeTotal")?.as_deref(), Some("21640.5"));
        assert_eq!(details[1].value("demandeTotal")?.as_deref(), Some("21702"));
        assert_eq!(details[2].value("demandeTotal")?, None);
        assert_eq!(details[3].value("demandeTotal")?, None);
        Ok(())
    }

    #[test]
    fn test_missing_counters_default_to_zero() -> Result {
        // language=json
        let body = r#"{"dateStart": null, "details": []}"#;
        let (metadata, details) = serde_json::from_str::<Document>(body)?.into_parts()?;
        assert_eq!(metadata.date_start, None);
        assert_eq!(metadata.most_recent_index, 0);
        assert_eq!(metadata.n_dates_with_data, 0);
        assert!(details.is_empty());
        Ok(())
    }

    #[test]
    fn test_float_counters_are_rounded() -> Result {
        // language=json
        let body = r#"{"indexDonneePlusRecent": 52.0, "nbDateAvecData": 52.5, "details": []}"#;
        let (metadata, _) = serde_json::from_str::<Document>(body)?.into_parts()?;
        assert_eq!(metadata.most_recent_index, 52);
        assert_eq!(metadata.n_dates_with_data, 52);

        // language=json
        let body = r#"{"indexDonneePlusRecent": 53.5, "details": []}"#;
        let (metadata, _) = serde_json::from_str::<Document>(body)?.into_parts()?;
        assert_eq!(metadata.most_recent_index, 54);
        Ok(())
    }

    #[test]
    fn test_non_numeric_counter_is_error() {
        // language=json
        let body = r#"{"indexDonneePlusRecent": "latest", "details": []}"#;
        assert!(serde_json::from_str::<Document>(body).is_err());
    }

    #[test]
    fn test_missing_details_is_error() {
        // language=json
        let body = r#"{"dateStart": "01/05/2024 00:00:00"}"#;
        assert!(serde_json::from_str::<Document>(body).is_err());
    }

    #[test]
    fn test_invalid_detail_object_is_error() -> Result {
        // language=json
        let body = r#"{"details": [{"date": ["01/05/2024 13:00:00"], "valeurs": {}}]}"#;
        assert!(serde_json::from_str::<Document>(body)?.into_parts().is_err());
        Ok(())
    }

    #[test]
    fn test_null_value_is_absent() -> Result {
        // language=json
        let body = r#"{"date": "01/05/2024 13:00:00", "valeurs": {"total": "100", "eolien": null}}"#;
        let detail = serde_json::from_str::<Detail>(body)?;
        assert_eq!(detail.value("total")?.as_deref(), Some("100"));
        assert_eq!(detail.value("eolien")?, None);
        assert_eq!(detail.value("solaire")?, None);
        Ok(())
    }

    #[test]
    fn test_unrelated_values_are_not_parsed() -> Result {
        // language=json
        let body = r#"{"date": "01/05/2024 13:00:00", "valeurs": {"total": "100", "meta": {"x": 1}}}"#;
        let detail = serde_json::from_str::<Detail>(body)?;
        assert_eq!(detail.value("total")?.as_deref(), Some("100"));
        assert!(detail.value("meta").is_err());
        Ok(())
    }

    #[test]
    fn test_bool_value_text() -> Result {
        // language=json
        let body = r#"{"valeurs": {"total": true, "eolien": false}}"#;
        let detail = serde_json::from_str::<Detail>(body)?;
        assert_eq!(detail.value("total")?.as_deref(), Some("True"));
        assert_eq!(detail.value("eolien")?.as_deref(), Some("False"));
        Ok(())
    }
}
