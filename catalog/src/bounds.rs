//! Per-category numeric envelopes reported by the catalog service.

use crate::listing::Listing;
use crate::taxonomy::Category;
use crate::taxonomy::RangeField;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub min: f64,
    pub max: f64,
}

impl Envelope {
    /// Stand-in used when a filter is applied before bounds have arrived.
    pub const UNBOUNDED: Envelope = Envelope {
        min: 0.0,
        max: f64::MAX,
    };

    /// Orders the two ends. Returns `None` if either is NaN.
    pub fn new(a: f64, b: f64) -> Option<Self> {
        if a.is_nan() || b.is_nan() {
            return None;
        }
        Some(Self {
            min: a.min(b),
            max: a.max(b),
        })
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn is_unbounded_above(&self) -> bool {
        self.max == f64::MAX
    }
}

/// Envelopes for the fields that apply to one category.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bounds {
    envelopes: BTreeMap<RangeField, Envelope>,
}

impl Bounds {
    /// Keeps only pairs that apply to `category` and have both ends.
    pub fn from_pairs<I>(category: Category, pairs: I) -> Self
    where
        I: IntoIterator<Item = (RangeField, Option<f64>, Option<f64>)>,
    {
        let envelopes = pairs
            .into_iter()
            .filter(|(field, _, _)| category.allows_field(*field))
            .filter_map(|(field, min, max)| {
                let envelope = Envelope::new(min?, max?)?;
                Some((field, envelope))
            })
            .collect();
        Self { envelopes }
    }

    pub fn get(&self, field: RangeField) -> Option<Envelope> {
        self.envelopes.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RangeField, Envelope)> + '_ {
        self.envelopes.iter().map(|(field, envelope)| (*field, *envelope))
    }

    pub fn is_empty(&self) -> bool {
        self.envelopes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.envelopes.len()
    }
}

/// Bounds of at most one category: whichever was fetched last for the
/// category that was current at the time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundsCache {
    scope: Option<Category>,
    bounds: Bounds,
}

impl BoundsCache {
    pub fn replace(&mut self, category: Category, bounds: Bounds) {
        self.scope = Some(category);
        self.bounds = bounds;
    }

    pub fn scope(&self) -> Option<Category> {
        self.scope
    }

    /// Cached bounds, only if they were fetched for `category`.
    pub fn for_category(&self, category: Category) -> Option<&Bounds> {
        (self.scope == Some(category)).then_some(&self.bounds)
    }
}

/// The flat `/stats` answer. Every key is present; absent values are null.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsReport {
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_room_count: Option<f64>,
    pub max_room_count: Option<f64>,
    pub min_floor_count: Option<f64>,
    pub max_floor_count: Option<f64>,
    pub min_yard_area: Option<f64>,
    pub max_yard_area: Option<f64>,
    pub min_mortgage_price: Option<f64>,
    pub max_mortgage_price: Option<f64>,
}

impl StatsReport {
    pub fn pair(&self, field: RangeField) -> (Option<f64>, Option<f64>) {
        match field {
            RangeField::Price => (self.min_price, self.max_price),
            RangeField::MortgagePrice => (self.min_mortgage_price, self.max_mortgage_price),
            RangeField::Area => (self.min_area, self.max_area),
            RangeField::RoomCount => (self.min_room_count, self.max_room_count),
            RangeField::YardArea => (self.min_yard_area, self.max_yard_area),
            RangeField::FloorCount => (self.min_floor_count, self.max_floor_count),
        }
    }

    fn pair_mut(&mut self, field: RangeField) -> (&mut Option<f64>, &mut Option<f64>) {
        match field {
            RangeField::Price => (&mut self.min_price, &mut self.max_price),
            RangeField::MortgagePrice => {
                (&mut self.min_mortgage_price, &mut self.max_mortgage_price)
            }
            RangeField::Area => (&mut self.min_area, &mut self.max_area),
            RangeField::RoomCount => (&mut self.min_room_count, &mut self.max_room_count),
            RangeField::YardArea => (&mut self.min_yard_area, &mut self.max_yard_area),
            RangeField::FloorCount => (&mut self.min_floor_count, &mut self.max_floor_count),
        }
    }

    /// Min/max of every applicable field over `listings`.
    pub fn from_listings<'a>(
        category: Category,
        listings: impl IntoIterator<Item = &'a Listing>,
    ) -> Self {
        let mut report = StatsReport::default();
        for listing in listings {
            for &field in category.range_fields() {
                let Some(value) = listing.metric(field) else {
                    continue;
                };
                let (min, max) = report.pair_mut(field);
                *min = Some(min.map_or(value, |m| m.min(value)));
                *max = Some(max.map_or(value, |m| m.max(value)));
            }
        }
        report
    }

    pub fn into_bounds(self, category: Category) -> Bounds {
        Bounds::from_pairs(
            category,
            category.range_fields().iter().map(|&field| {
                let (min, max) = self.pair(field);
                (field, min, max)
            }),
        )
    }
}
