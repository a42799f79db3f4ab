use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Required input keys, in the order the field validator checks them.
pub const REQUIRED_FIELDS: [&str; 9] = [
    "ticker",
    "target_from",
    "target_to",
    "company",
    "action",
    "brokerage",
    "rating_from",
    "rating_to",
    "time",
];

/// One analyst price-target / rating action, fully validated and normalized.
///
/// Only the record builder produces these; there is no partially populated
/// form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub ticker: String,
    pub target_from: f64,
    pub target_to: f64,
    pub company: String,
    pub action: String,
    pub brokerage: String,
    pub rating_from: String,
    pub rating_to: String,
    /// Zone-less inputs are stored with a zero offset.
    pub time: DateTime<FixedOffset>,
}

/// Loosely-typed rating input as it arrives from a client or data feed.
///
/// Absent keys and JSON `null` both deserialize to `None`. Every value is
/// still raw text at this point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingInput {
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub target_from: Option<String>,
    #[serde(default)]
    pub target_to: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub brokerage: Option<String>,
    #[serde(default)]
    pub rating_from: Option<String>,
    #[serde(default)]
    pub rating_to: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

impl RatingInput {
    /// Looks up a field by its input key.
    ///
    /// Returns `None` for unknown keys as well as for absent values.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "ticker" => &self.ticker,
            "target_from" => &self.target_from,
            "target_to" => &self.target_to,
            "company" => &self.company,
            "action" => &self.action,
            "brokerage" => &self.brokerage,
            "rating_from" => &self.rating_from,
            "rating_to" => &self.rating_to,
            "time" => &self.time,
            _ => return None,
        };
        value.as_deref()
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
        match name {
            "ticker" => Some(&mut self.ticker),
            "target_from" => Some(&mut self.target_from),
            "target_to" => Some(&mut self.target_to),
            "company" => Some(&mut self.company),
            "action" => Some(&mut self.action),
            "brokerage" => Some(&mut self.brokerage),
            "rating_from" => Some(&mut self.rating_from),
            "rating_to" => Some(&mut self.rating_to),
            "time" => Some(&mut self.time),
            _ => None,
        }
    }
}

impl<K, V> FromIterator<(K, V)> for RatingInput
where
    K: AsRef<str>,
    V: Into<String>,
{
    /// Builds an input from `(key, text)` pairs. Unknown keys are dropped.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut input = Self::default();
        for (key, value) in iter {
            if let Some(slot) = input.slot_mut(key.as_ref()) {
                *slot = Some(value.into());
            }
        }
        input
    }
}
