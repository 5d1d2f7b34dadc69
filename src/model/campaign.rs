//! Campaign analytics report payload.
//!
//! Every field is optional on decode: the endpoint is not validated beyond
//! guarding missing values, and renderers show `-` where a value is absent.
//! Numeric fields also accept numeric strings.

use crate::table::row::lookup_in_fields;
use crate::table::{CellValue, TableRow};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Top-level report document: `{ "report": { "campaigns": [...] } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Report body.
    #[serde(default)]
    pub report: ReportBody,
}

impl Report {
    /// Campaign rows in endpoint order.
    pub fn campaigns(&self) -> &[Campaign] {
        &self.report.campaigns
    }

    /// Take ownership of the campaign rows.
    pub fn into_campaigns(self) -> Vec<Campaign> {
        self.report.campaigns
    }
}

/// `report` object of the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportBody {
    /// Campaign rows.
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
}

/// One marketing campaign row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    /// Campaign name.
    #[serde(default)]
    pub name: Option<String>,
    /// Marketing channel.
    #[serde(default)]
    pub channel: Option<String>,
    /// Campaign type, the field the type filter matches.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Audience the campaign targets.
    #[serde(default)]
    pub target_audience: Option<String>,
    /// Amount spent, in dollars.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub spend: Option<f64>,
    /// Delivery metrics.
    #[serde(default)]
    pub metrics: Option<Metrics>,
    /// Campaign run dates.
    #[serde(default)]
    pub dates: Option<CampaignDates>,
    /// Fields the dashboard does not model; still searchable.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Delivery metrics of one campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Times the campaign was shown.
    #[serde(default, deserialize_with = "lenient_u64")]
    pub impressions: Option<u64>,
    /// Clicks received.
    #[serde(default, deserialize_with = "lenient_u64")]
    pub clicks: Option<u64>,
    /// Conversions attributed.
    #[serde(default, deserialize_with = "lenient_u64")]
    pub conversions: Option<u64>,
    /// Return on investment as a ratio.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub roi: Option<f64>,
}

/// Start and end dates as sent by the endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDates {
    /// First day of the campaign.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Last day of the campaign.
    #[serde(default)]
    pub end_date: Option<String>,
}

impl Campaign {
    /// `metrics.impressions`
    pub fn impressions(&self) -> Option<u64> {
        self.metrics.as_ref().and_then(|m| m.impressions)
    }

    /// `metrics.clicks`
    pub fn clicks(&self) -> Option<u64> {
        self.metrics.as_ref().and_then(|m| m.clicks)
    }

    /// `metrics.conversions`
    pub fn conversions(&self) -> Option<u64> {
        self.metrics.as_ref().and_then(|m| m.conversions)
    }

    /// `metrics.roi`
    pub fn roi(&self) -> Option<f64> {
        self.metrics.as_ref().and_then(|m| m.roi)
    }

    /// `dates.startDate`
    pub fn start_date(&self) -> Option<&str> {
        self.dates.as_ref().and_then(|d| d.start_date.as_deref())
    }

    /// `dates.endDate`
    pub fn end_date(&self) -> Option<&str> {
        self.dates.as_ref().and_then(|d| d.end_date.as_deref())
    }

    /// Clicks per impression. `None` without impressions.
    pub fn click_through_rate(&self) -> Option<f64> {
        ratio(self.clicks()?, self.impressions()?)
    }

    /// Conversions per click. `None` without clicks.
    pub fn conversion_rate(&self) -> Option<f64> {
        ratio(self.conversions()?, self.clicks()?)
    }

    /// Spend per conversion. `None` without conversions.
    pub fn cost_per_conversion(&self) -> Option<f64> {
        let conversions = self.conversions()?;
        if conversions == 0 {
            return None;
        }
        Some(self.spend? / conversions as f64)
    }
}

fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

impl TableRow for Campaign {
    fn fields(&self) -> Vec<(String, CellValue)> {
        let text = |v: &Option<String>| CellValue::from_option(v.as_ref());
        let metrics = self.metrics.as_ref().map(|m| {
            CellValue::Map(vec![
                ("impressions".to_string(), CellValue::from_option(m.impressions)),
                ("clicks".to_string(), CellValue::from_option(m.clicks)),
                ("conversions".to_string(), CellValue::from_option(m.conversions)),
                ("roi".to_string(), CellValue::from_option(m.roi)),
            ])
        });
        let dates = self.dates.as_ref().map(|d| {
            CellValue::Map(vec![
                ("startDate".to_string(), text(&d.start_date)),
                ("endDate".to_string(), text(&d.end_date)),
            ])
        });

        let mut fields = vec![
            ("name".to_string(), text(&self.name)),
            ("channel".to_string(), text(&self.channel)),
            ("type".to_string(), text(&self.kind)),
            ("targetAudience".to_string(), text(&self.target_audience)),
            ("spend".to_string(), CellValue::from_option(self.spend)),
            ("metrics".to_string(), metrics.unwrap_or(CellValue::Empty)),
            ("dates".to_string(), dates.unwrap_or(CellValue::Empty)),
        ];
        fields.extend(self.extra.iter().map(|(k, v)| (k.clone(), CellValue::from(v))));
        fields
    }

    fn lookup(&self, path: &str) -> CellValue {
        match path {
            "name" => CellValue::from_option(self.name.as_ref()),
            "channel" => CellValue::from_option(self.channel.as_ref()),
            "type" => CellValue::from_option(self.kind.as_ref()),
            "targetAudience" => CellValue::from_option(self.target_audience.as_ref()),
            "spend" => CellValue::from_option(self.spend),
            "metrics.impressions" => CellValue::from_option(self.impressions()),
            "metrics.clicks" => CellValue::from_option(self.clicks()),
            "metrics.conversions" => CellValue::from_option(self.conversions()),
            "metrics.roi" => CellValue::from_option(self.roi()),
            "dates.startDate" => CellValue::from_option(self.start_date()),
            "dates.endDate" => CellValue::from_option(self.end_date()),
            other => lookup_in_fields(self.fields(), other),
        }
    }

    fn type_tag(&self) -> Option<String> {
        self.kind.clone()
    }
}

// ===== Lenient numeric decoding =====

fn number_from_json(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_json).filter(|x| x.is_finite()))
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(number_from_json)
        .filter(|x| x.is_finite() && *x >= 0.0)
        .map(|x| x.round() as u64))
}
