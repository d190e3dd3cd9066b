//! Raw range inputs, clamping against bounds, and the wire query.

use crate::bounds::Bounds;
use crate::bounds::Envelope;
use crate::listing::Listing;
use crate::taxonomy::Category;
use crate::taxonomy::RangeField;
use serde::Serialize;
use std::collections::BTreeMap;

/// The two text boxes of one range, exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RangeInput {
    pub lo: String,
    pub hi: String,
    /// Set once the user typed into either end. Seeding only touches
    /// entries where this is false.
    pub edited: bool,
}

impl RangeInput {
    pub fn is_unset(&self) -> bool {
        !self.edited || (self.lo.trim().is_empty() && self.hi.trim().is_empty())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ClampedRange {
    pub lo: f64,
    pub hi: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
    inputs: BTreeMap<RangeField, RangeInput>,
}

impl FilterState {
    pub fn get(&self, field: RangeField) -> Option<&RangeInput> {
        self.inputs.get(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RangeField, &RangeInput)> + '_ {
        self.inputs.iter().map(|(field, input)| (*field, input))
    }

    pub fn set_range(&mut self, field: RangeField, lo: impl Into<String>, hi: impl Into<String>) {
        self.inputs.insert(
            field,
            RangeInput {
                lo: lo.into(),
                hi: hi.into(),
                edited: true,
            },
        );
    }

    /// Writes the envelope ends into every unset entry.
    pub fn seed(&mut self, bounds: &Bounds) {
        for (field, envelope) in bounds.iter() {
            let input = self.inputs.entry(field).or_default();
            if input.is_unset() {
                *input = RangeInput {
                    lo: format_bound(envelope.min),
                    hi: format_bound(envelope.max),
                    edited: false,
                };
            }
        }
    }

    pub fn clear(&mut self) {
        self.inputs.clear();
    }

    /// Clamps one field's inputs: `min <= lo <= hi <= max`, never rejecting.
    pub fn clamp(&self, field: RangeField, envelope: Envelope) -> ClampedRange {
        let input = self.inputs.get(&field);
        let lo = input
            .and_then(|i| parse_bound(&i.lo))
            .unwrap_or(envelope.min);
        let lo = envelope.clamp(lo);
        let hi = input
            .and_then(|i| parse_bound(&i.hi))
            .unwrap_or(envelope.max);
        let hi = envelope.clamp(hi).max(lo);
        ClampedRange { lo, hi }
    }

    /// Edited fields that apply to `category`, clamped against `bounds` or
    /// against [`Envelope::UNBOUNDED`] when no bounds are available.
    pub fn to_query(&self, category: Category, bounds: Option<&Bounds>) -> RangeQuery {
        let ranges = category
            .range_fields()
            .iter()
            .copied()
            .filter(|field| self.inputs.get(field).is_some_and(|input| !input.is_unset()))
            .map(|field| {
                let envelope = bounds
                    .and_then(|b| b.get(field))
                    .unwrap_or(Envelope::UNBOUNDED);
                (field, self.clamp(field, envelope))
            })
            .collect();
        RangeQuery { ranges }
    }
}

fn parse_bound(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    (!value.is_nan()).then_some(value)
}

fn format_bound(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Clamped ranges ready to be sent with a filter request.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RangeQuery {
    ranges: BTreeMap<RangeField, ClampedRange>,
}

impl RangeQuery {
    pub fn get(&self, field: RangeField) -> Option<ClampedRange> {
        self.ranges.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RangeField, ClampedRange)> + '_ {
        self.ranges.iter().map(|(field, range)| (*field, *range))
    }

    /// `(key, value)` query parameters. Counts are sent as integers and an
    /// unbounded upper end is left out.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(self.ranges.len() * 2);
        for (field, range) in self.iter() {
            let (min_key, max_key) = field.query_keys();
            params.push((min_key, wire_number(field, range.lo, f64::ceil)));
            if range.hi != f64::MAX {
                params.push((max_key, wire_number(field, range.hi, f64::floor)));
            }
        }
        params
    }

    /// Applies the ranges the way the catalog service does: a listing that
    /// lacks a field is not constrained by it.
    pub fn matches(&self, listing: &Listing) -> bool {
        self.iter().all(|(field, range)| {
            listing
                .metric(field)
                .is_none_or(|value| value >= range.lo && value <= range.hi)
        })
    }
}

/// Integral ends are rounded inward by `round` so the service never widens
/// the range the user asked for.
fn wire_number(field: RangeField, value: f64, round: fn(f64) -> f64) -> String {
    if field.is_integral() {
        (round(value) as i64).to_string()
    } else {
        value.to_string()
    }
}
