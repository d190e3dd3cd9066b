mod browser_flow;
mod stale_responses;

use estate_catalog::CatalogSnapshot;

/// Two sale offices, one sale apartment, one rent villa and one rent land.
pub(crate) const CATALOG_JSON: &str = r#"{
  "sale": {
    "land": [],
    "commercial": {
      "office": [
        {"id": "so-1", "roomCount": 2, "data": {"address": "1 Dock Road", "email": "dock@example.com", "area": 80.0, "fullPrice": 120000.0, "ownerFullName": "Sara Nouri"}},
        {"id": "so-2", "roomCount": 5, "data": {"address": "9 Tower Lane", "email": "tower@example.com", "area": 240.0, "fullPrice": 410000.0, "ownerFullName": "Reza Kamali"}}
      ],
      "shop": []
    },
    "residential": {
      "villa": [],
      "apartment": [
        {"id": "sa-1", "floorCount": 4, "roomCount": 3, "data": {"address": "22 Palm Street", "email": "palm@example.com", "area": 110.0, "fullPrice": 210000.0, "ownerFullName": "Lale Tahmasebi"}}
      ]
    }
  },
  "rent": {
    "land": [
      {"id": "rl-1", "whatUse": "agricultural", "data": {"address": "Route 7", "email": "farm@example.com", "area": 5000.0, "rentPrice": 300.0, "mortgagePrice": 2000.0, "ownerFullName": "Omid Farahani"}}
    ],
    "commercial": {"office": [], "shop": []},
    "residential": {
      "villa": [
        {"id": "rv-1", "yardArea": 60.0, "data": {"address": "3 Hill Road", "email": "hill@example.com", "area": 300.0, "rentPrice": 1800.0, "mortgagePrice": 15000.0, "ownerFullName": "Nima Sadeghi"}}
      ],
      "apartment": []
    }
  }
}"#;

pub(crate) fn catalog() -> CatalogSnapshot {
    serde_json::from_str(CATALOG_JSON).expect("fixture parses")
}
