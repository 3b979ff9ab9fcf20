use serde::{Deserialize, Serialize};

/// Listing body accepted by the products endpoint.
///
/// The gateway itself accepts any serializable body; this type exists for
/// callers that build listings from user input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: String,
    #[serde(rename = "type")]
    pub category: String,
    pub phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_category_as_type() {
        let product = NewProduct {
            name: "Tomato".into(),
            price: 80.0,
            description: "Fresh, 1kg".into(),
            category: "vegetable".into(),
            phone: "9841234567".into(),
        };
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["type"], "vegetable");
        assert!(value.get("category").is_none());
        assert_eq!(value["price"], 80.0);
    }
}
