//! Restaurant Profile / Space Models
//!
//! Owned and written by the venue management side; this platform only reads
//! them (inspection tooling, consultation context).

use serde::{Deserialize, Serialize};

/// Restaurant profile (餐厅档案)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantProfile {
    /// Record key; queries project it as `key`
    #[serde(alias = "key")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Bookable space inside a restaurant (包厢、露台、宴会厅等)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSpace {
    #[serde(alias = "key")]
    pub id: String,
    /// Owning restaurant profile id
    #[serde(alias = "restaurant_id")]
    pub restaurant_id: String,
    pub name: String,
    #[serde(default, alias = "min_capacity")]
    pub min_capacity: u32,
    #[serde(default, alias = "max_capacity")]
    pub max_capacity: u32,
    #[serde(default, alias = "event_styles")]
    pub event_styles: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl RestaurantSpace {
    /// `min_capacity <= max_capacity`
    pub fn has_valid_capacity(&self) -> bool {
        self.min_capacity <= self.max_capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_space_accepts_snake_case_documents() {
        let space: RestaurantSpace = serde_json::from_value(json!({
            "key": "s1",
            "restaurant_id": "r1",
            "name": "Garden Terrace",
            "min_capacity": 10,
            "max_capacity": 40,
            "event_styles": ["cocktail", "banquet"],
            "features": ["projector"]
        }))
        .unwrap();
        assert_eq!(space.id, "s1");
        assert_eq!(space.restaurant_id, "r1");
        assert_eq!(space.event_styles, vec!["cocktail", "banquet"]);
        assert_eq!((space.min_capacity, space.max_capacity), (10, 40));
        assert!(space.has_valid_capacity());
    }

    #[test]
    fn test_inverted_capacity_is_invalid() {
        let space = RestaurantSpace {
            id: "s2".into(),
            restaurant_id: "r1".into(),
            name: "Broken".into(),
            min_capacity: 50,
            max_capacity: 10,
            event_styles: vec![],
            features: vec![],
        };
        assert!(!space.has_valid_capacity());
    }
}
