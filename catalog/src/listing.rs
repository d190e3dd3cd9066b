use crate::taxonomy::Category;
use crate::taxonomy::Ownership;
use crate::taxonomy::PropertyType;
use crate::taxonomy::RangeField;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;

/// Fields shared by every listing. Which price fields are present depends on
/// the ownership: sale listings carry `fullPrice`, rent listings carry
/// `rentPrice` and `mortgagePrice`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingData {
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub area: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub owner_full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mortgage_price: Option<f64>,
}

/// The service sends `null` for blank fields; treat it like a missing one.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ListingData {
    /// The headline price: full price for sale, rent price for rent.
    pub fn price(&self) -> Option<f64> {
        self.full_price.or(self.rent_price)
    }
}

/// A single advertisement as returned by the catalog service.
///
/// Search and filter endpoints return these without any category metadata;
/// see [`crate::reconcile`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: ListingData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub what_use: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yard_area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_count: Option<i64>,
}

impl Listing {
    pub fn metric(&self, field: RangeField) -> Option<f64> {
        match field {
            RangeField::Price => self.data.price(),
            RangeField::MortgagePrice => self.data.mortgage_price,
            RangeField::Area => Some(self.data.area),
            RangeField::RoomCount => self.room_count.map(|v| v as f64),
            RangeField::YardArea => self.yard_area,
            RangeField::FloorCount => self.floor_count.map(|v| v as f64),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommercialBranch {
    pub office: Vec<Listing>,
    pub shop: Vec<Listing>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResidentialBranch {
    pub villa: Vec<Listing>,
    pub apartment: Vec<Listing>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnershipBranch {
    pub land: Vec<Listing>,
    pub commercial: CommercialBranch,
    pub residential: ResidentialBranch,
}

/// The canonical, fully categorized dataset (`GET /api/v1/real-estate`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSnapshot {
    pub sale: OwnershipBranch,
    pub rent: OwnershipBranch,
}

impl CatalogSnapshot {
    pub fn bucket(&self, category: Category) -> &[Listing] {
        let branch = match category.ownership {
            Ownership::Sale => &self.sale,
            Ownership::Rent => &self.rent,
        };
        match category.property_type {
            PropertyType::Land => &branch.land,
            PropertyType::Office => &branch.commercial.office,
            PropertyType::Shop => &branch.commercial.shop,
            PropertyType::Villa => &branch.residential.villa,
            PropertyType::Apartment => &branch.residential.apartment,
        }
    }

    pub fn bucket_mut(&mut self, category: Category) -> &mut Vec<Listing> {
        let branch = match category.ownership {
            Ownership::Sale => &mut self.sale,
            Ownership::Rent => &mut self.rent,
        };
        match category.property_type {
            PropertyType::Land => &mut branch.land,
            PropertyType::Office => &mut branch.commercial.office,
            PropertyType::Shop => &mut branch.commercial.shop,
            PropertyType::Villa => &mut branch.residential.villa,
            PropertyType::Apartment => &mut branch.residential.apartment,
        }
    }

    /// Every listing paired with its category, in canonical order.
    pub fn entries(&self) -> impl Iterator<Item = (Category, &Listing)> + '_ {
        Category::all().flat_map(move |category| {
            self.bucket(category)
                .iter()
                .map(move |listing| (category, listing))
        })
    }

    pub fn len(&self) -> usize {
        Category::all().map(|c| self.bucket(c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn summary(&self) -> CatalogSummary {
        let by_category: Vec<(Category, usize)> = Category::all()
            .map(|category| (category, self.bucket(category).len()))
            .collect();
        let total_for = |ownership: Ownership| -> usize {
            by_category
                .iter()
                .filter(|(category, _)| category.ownership == ownership)
                .map(|(_, count)| count)
                .sum()
        };
        let sale = total_for(Ownership::Sale);
        let rent = total_for(Ownership::Rent);
        CatalogSummary {
            by_category,
            sale,
            rent,
            total: sale + rent,
        }
    }
}

/// Listing counts per category plus ownership totals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogSummary {
    pub by_category: Vec<(Category, usize)>,
    pub sale: usize,
    pub rent: usize,
    pub total: usize,
}

impl CatalogSummary {
    pub fn count(&self, category: Category) -> usize {
        self.by_category
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

/// User input for a new listing. Unset numbers are sent as zero and left to
/// the catalog service to reject.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListingDraft {
    pub address: String,
    pub email: String,
    pub area: Option<f64>,
    pub owner_full_name: String,
    pub full_price: Option<f64>,
    pub rent_price: Option<f64>,
    pub mortgage_price: Option<f64>,
    pub what_use: Option<String>,
    pub room_count: Option<i64>,
    pub yard_area: Option<f64>,
    pub floor_count: Option<i64>,
}

impl ListingDraft {
    /// JSON body for the create endpoint of `category`.
    pub fn payload(&self, category: Category) -> Value {
        let data = match category.ownership {
            Ownership::Sale => json!({
                "address": self.address,
                "email": self.email,
                "area": self.area.unwrap_or(0.0),
                "fullPrice": self.full_price.unwrap_or(0.0),
                "ownerFullName": self.owner_full_name,
            }),
            Ownership::Rent => json!({
                "address": self.address,
                "email": self.email,
                "area": self.area.unwrap_or(0.0),
                "rentPrice": self.rent_price.unwrap_or(0.0),
                "mortgagePrice": self.mortgage_price.unwrap_or(0.0),
                "ownerFullName": self.owner_full_name,
            }),
        };
        match category.property_type {
            PropertyType::Land => json!({
                "whatUse": self.what_use.clone().unwrap_or_default(),
                "data": data,
            }),
            PropertyType::Office | PropertyType::Shop => json!({
                "roomCount": self.room_count.unwrap_or(0),
                "data": data,
            }),
            PropertyType::Villa => json!({
                "yardArea": self.yard_area.unwrap_or(0.0),
                "data": data,
            }),
            PropertyType::Apartment => json!({
                "floorCount": self.floor_count.unwrap_or(0),
                "roomCount": self.room_count.unwrap_or(0),
                "data": data,
            }),
        }
    }
}
