//! The fixed two-level taxonomy: ownership × property group × property type.
//!
//! Everything that used to branch on `(ownership, property type)` reads the
//! single [`CATEGORY_TABLE`] instead.

use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use strum_macros::AsRefStr;
use strum_macros::Display;
use strum_macros::EnumIter;
use strum_macros::EnumString;
use strum_macros::IntoStaticStr;

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Ownership {
    #[default]
    Sale,
    Rent,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PropertyGroup {
    #[default]
    Residential,
    Commercial,
    Land,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PropertyType {
    #[default]
    Apartment,
    Villa,
    Office,
    Shop,
    Land,
}

impl PropertyGroup {
    /// Property types offered under this group. The first entry is the type
    /// the selector falls back to when the group changes.
    pub fn allowed_types(self) -> &'static [PropertyType] {
        match self {
            PropertyGroup::Residential => &[PropertyType::Apartment, PropertyType::Villa],
            PropertyGroup::Commercial => &[PropertyType::Office, PropertyType::Shop],
            PropertyGroup::Land => &[PropertyType::Land],
        }
    }

    pub fn default_type(self) -> PropertyType {
        match self {
            PropertyGroup::Residential => PropertyType::Apartment,
            PropertyGroup::Commercial => PropertyType::Office,
            PropertyGroup::Land => PropertyType::Land,
        }
    }

    pub fn allows(self, property_type: PropertyType) -> bool {
        self.allowed_types().contains(&property_type)
    }
}

impl PropertyType {
    pub fn group(self) -> PropertyGroup {
        match self {
            PropertyType::Apartment | PropertyType::Villa => PropertyGroup::Residential,
            PropertyType::Office | PropertyType::Shop => PropertyGroup::Commercial,
            PropertyType::Land => PropertyGroup::Land,
        }
    }
}

/// Numeric dimensions a listing can be filtered on.
///
/// Declaration order is the display order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RangeField {
    Price,
    MortgagePrice,
    Area,
    RoomCount,
    YardArea,
    FloorCount,
}

impl RangeField {
    /// Query-string keys used by the catalog service for the lower and upper end.
    pub fn query_keys(self) -> (&'static str, &'static str) {
        match self {
            RangeField::Price => ("minPrice", "maxPrice"),
            RangeField::MortgagePrice => ("minMortgagePrice", "maxMortgagePrice"),
            RangeField::Area => ("minArea", "maxArea"),
            RangeField::RoomCount => ("minRoomCount", "maxRoomCount"),
            RangeField::YardArea => ("minYardArea", "maxYardArea"),
            RangeField::FloorCount => ("minFloorCount", "maxFloorCount"),
        }
    }

    /// Counts travel as integers on the wire.
    pub fn is_integral(self) -> bool {
        matches!(self, RangeField::RoomCount | RangeField::FloorCount)
    }

    pub fn label(self) -> &'static str {
        match self {
            RangeField::Price => "Price",
            RangeField::MortgagePrice => "Mortgage price",
            RangeField::Area => "Area (m²)",
            RangeField::RoomCount => "Room count",
            RangeField::YardArea => "Yard area",
            RangeField::FloorCount => "Floor count",
        }
    }
}

/// The scope of bounds, categorical searches and filters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub ownership: Ownership,
    pub property_type: PropertyType,
}

impl Category {
    pub const fn new(ownership: Ownership, property_type: PropertyType) -> Self {
        Self {
            ownership,
            property_type,
        }
    }

    pub fn group(self) -> PropertyGroup {
        self.property_type.group()
    }

    pub fn entry(self) -> &'static CategoryEntry {
        &CATEGORY_TABLE[self.table_index()]
    }

    pub fn range_fields(self) -> &'static [RangeField] {
        self.entry().range_fields
    }

    pub fn allows_field(self, field: RangeField) -> bool {
        self.range_fields().contains(&field)
    }

    /// Every category in canonical order: sale before rent, then land,
    /// office, shop, villa, apartment.
    pub fn all() -> impl Iterator<Item = Category> {
        CATEGORY_TABLE.iter().map(CategoryEntry::category)
    }

    fn table_index(self) -> usize {
        let ownership = match self.ownership {
            Ownership::Sale => 0,
            Ownership::Rent => 1,
        };
        let property_type = match self.property_type {
            PropertyType::Land => 0,
            PropertyType::Office => 1,
            PropertyType::Shop => 2,
            PropertyType::Villa => 3,
            PropertyType::Apartment => 4,
        };
        ownership * 5 + property_type
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.ownership, self.property_type)
    }
}

/// One row of the taxonomy lookup table.
#[derive(Debug, PartialEq, Eq)]
pub struct CategoryEntry {
    pub ownership: Ownership,
    pub group: PropertyGroup,
    pub property_type: PropertyType,
    /// Path below the service root that accepts new listings of this category.
    pub create_path: &'static str,
    pub range_fields: &'static [RangeField],
}

impl CategoryEntry {
    pub fn category(&self) -> Category {
        Category::new(self.ownership, self.property_type)
    }
}

use RangeField::Area;
use RangeField::FloorCount;
use RangeField::MortgagePrice;
use RangeField::Price;
use RangeField::RoomCount;
use RangeField::YardArea;

const SALE_LAND: &[RangeField] = &[Price, Area];
const SALE_COMMERCIAL: &[RangeField] = &[Price, Area, RoomCount];
const SALE_VILLA: &[RangeField] = &[Price, Area, YardArea];
const SALE_APARTMENT: &[RangeField] = &[Price, Area, RoomCount, FloorCount];
const RENT_LAND: &[RangeField] = &[Price, MortgagePrice, Area];
const RENT_COMMERCIAL: &[RangeField] = &[Price, MortgagePrice, Area, RoomCount];
const RENT_VILLA: &[RangeField] = &[Price, MortgagePrice, Area, YardArea];
const RENT_APARTMENT: &[RangeField] = &[Price, MortgagePrice, Area, RoomCount, FloorCount];

const fn row(
    ownership: Ownership,
    property_type: PropertyType,
    group: PropertyGroup,
    create_path: &'static str,
    range_fields: &'static [RangeField],
) -> CategoryEntry {
    CategoryEntry {
        ownership,
        group,
        property_type,
        create_path,
        range_fields,
    }
}

pub static CATEGORY_TABLE: [CategoryEntry; 10] = [
    row(Ownership::Sale, PropertyType::Land, PropertyGroup::Land, "sale/land", SALE_LAND),
    row(
        Ownership::Sale,
        PropertyType::Office,
        PropertyGroup::Commercial,
        "sale/commercial/office",
        SALE_COMMERCIAL,
    ),
    row(
        Ownership::Sale,
        PropertyType::Shop,
        PropertyGroup::Commercial,
        "sale/commercial/shop",
        SALE_COMMERCIAL,
    ),
    row(
        Ownership::Sale,
        PropertyType::Villa,
        PropertyGroup::Residential,
        "sale/residential/villa",
        SALE_VILLA,
    ),
    row(
        Ownership::Sale,
        PropertyType::Apartment,
        PropertyGroup::Residential,
        "sale/residential/apartment",
        SALE_APARTMENT,
    ),
    row(Ownership::Rent, PropertyType::Land, PropertyGroup::Land, "rent/land", RENT_LAND),
    row(
        Ownership::Rent,
        PropertyType::Office,
        PropertyGroup::Commercial,
        "rent/commercial/office",
        RENT_COMMERCIAL,
    ),
    row(
        Ownership::Rent,
        PropertyType::Shop,
        PropertyGroup::Commercial,
        "rent/commercial/shop",
        RENT_COMMERCIAL,
    ),
    row(
        Ownership::Rent,
        PropertyType::Villa,
        PropertyGroup::Residential,
        "rent/residential/villa",
        RENT_VILLA,
    ),
    row(
        Ownership::Rent,
        PropertyType::Apartment,
        PropertyGroup::Residential,
        "rent/residential/apartment",
        RENT_APARTMENT,
    ),
];
