use serde::de::{self, MapAccess, Unexpected, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::{LoanError, Result};

/// 1-based month number within a schedule
pub type MonthNumber = u32;

/// extra principal payments keyed by month number
///
/// Keys need not be contiguous or bounded by the loan tenure; entries for
/// months past payoff are never read. Serializes as a JSON object keyed by
/// month number; keys are accepted back as strings or numbers so the type
/// survives flattening into message envelopes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtraPayments(BTreeMap<MonthNumber, f64>);

impl Serialize for ExtraPayments {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (month, amount) in &self.0 {
            map.serialize_entry(&month.to_string(), amount)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ExtraPayments {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ExtraPaymentsVisitor;

        impl<'de> Visitor<'de> for ExtraPaymentsVisitor {
            type Value = ExtraPayments;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of month numbers to amounts")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut map = BTreeMap::new();
                while let Some((MonthKey(month), amount)) = access.next_entry::<MonthKey, f64>()? {
                    map.insert(month, amount);
                }
                Ok(ExtraPayments(map))
            }
        }

        deserializer.deserialize_map(ExtraPaymentsVisitor)
    }
}

struct MonthKey(MonthNumber);

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct MonthKeyVisitor;

        impl Visitor<'_> for MonthKeyVisitor {
            type Value = MonthKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a month number")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<MonthKey, E> {
                u32::try_from(v)
                    .map(MonthKey)
                    .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<MonthKey, E> {
                v.parse()
                    .map(MonthKey)
                    .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(MonthKeyVisitor)
    }
}

impl ExtraPayments {
    pub fn new() -> Self {
        Self::default()
    }

    /// set the extra payment for a month, replacing any existing entry
    pub fn add(&mut self, month: MonthNumber, amount: f64) -> Result<()> {
        if month < 1 {
            return Err(LoanError::InvalidMonth { month });
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LoanError::InvalidPaymentAmount { amount });
        }
        self.0.insert(month, amount);
        Ok(())
    }

    /// remove the extra payment for a month
    pub fn remove(&mut self, month: MonthNumber) -> Option<f64> {
        self.0.remove(&month)
    }

    /// extra amount applied in a month, 0 if none
    pub fn amount_for(&self, month: MonthNumber) -> f64 {
        self.0.get(&month).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MonthNumber, f64)> + '_ {
        self.0.iter().map(|(m, a)| (*m, *a))
    }
}

impl From<BTreeMap<MonthNumber, f64>> for ExtraPayments {
    fn from(map: BTreeMap<MonthNumber, f64>) -> Self {
        ExtraPayments(map)
    }
}

impl FromIterator<(MonthNumber, f64)> for ExtraPayments {
    fn from_iter<I: IntoIterator<Item = (MonthNumber, f64)>>(iter: I) -> Self {
        ExtraPayments(iter.into_iter().collect())
    }
}

/// payment progress status against the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// recorded payments match the scheduled total
    OnTrack,
    /// more paid than scheduled
    ExtraPaid,
    /// less paid than scheduled
    Pending,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_replaces_existing_entry() {
        let mut extras = ExtraPayments::new();
        extras.add(5, 10_000.0).unwrap();
        extras.add(5, 7_500.0).unwrap();

        assert_eq!(extras.len(), 1);
        assert_eq!(extras.amount_for(5), 7_500.0);
    }

    #[test]
    fn test_add_rejects_invalid_entries() {
        let mut extras = ExtraPayments::new();

        assert!(extras.add(0, 1_000.0).is_err());
        assert!(extras.add(3, 0.0).is_err());
        assert!(extras.add(3, -50.0).is_err());
        assert!(extras.add(3, f64::NAN).is_err());
        assert!(extras.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut extras: ExtraPayments = [(5, 10_000.0)].into_iter().collect();

        assert_eq!(extras.remove(5), Some(10_000.0));
        assert_eq!(extras.remove(5), None);
        assert!(extras.is_empty());
    }

    #[test]
    fn test_amount_for_missing_month_is_zero() {
        let extras: ExtraPayments = [(3, 5_000.0)].into_iter().collect();

        assert_eq!(extras.amount_for(3), 5_000.0);
        assert_eq!(extras.amount_for(4), 0.0);
    }

    #[test]
    fn test_serializes_as_object_keyed_by_month() {
        let extras: ExtraPayments = [(5, 10_000.0)].into_iter().collect();
        let json = serde_json::to_string(&extras).unwrap();

        assert_eq!(json, r#"{"5":10000.0}"#);

        let back: ExtraPayments = serde_json::from_str(&json).unwrap();
        assert_eq!(back, extras);
    }
}
