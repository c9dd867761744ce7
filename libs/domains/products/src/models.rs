use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Generated on create, never changes
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Monitor Curvo de 49 Pulgadas")]
    pub name: String,
    /// Always greater than zero
    #[serde(serialize_with = "serialize_price")]
    #[schema(example = 300)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
}

/// Whole prices go out as JSON integers (`300`, not `300.0`)
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53

    if price.fract() == 0.0 && price.abs() < MAX_EXACT {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

/// Request body for create and update, exactly as the client sent it.
///
/// Fields stay untyped until the route's rules have run, so a wrong type is
/// reported as a field error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPayload {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub availability: Option<Value>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Monitor Curvo de 49 Pulgadas")]
    pub name: String,
    #[validate(range(exclusive_min = 0.0))]
    #[schema(example = 300)]
    pub price: f64,
    /// Defaults to `true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<bool>,
}

/// DTO for replacing every editable field of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Monitor Curvo de 49 Pulgadas")]
    pub name: String,
    #[validate(range(exclusive_min = 0.0))]
    #[schema(example = 399)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
}

impl Product {
    pub fn new(id: i32, input: CreateProduct) -> Self {
        Self {
            id,
            name: input.name,
            price: input.price,
            availability: input.availability.unwrap_or(true),
        }
    }

    /// Replace every editable field
    pub fn apply_update(&mut self, update: UpdateProduct) {
        self.name = update.name;
        self.price = update.price;
        self.availability = update.availability;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(name: &str, price: f64) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            price,
            availability: None,
        }
    }

    #[test]
    fn test_new_product_defaults_to_available() {
        let product = Product::new(1, create("Monitor", 300.0));
        assert!(product.availability);

        let hidden = Product::new(
            2,
            CreateProduct {
                availability: Some(false),
                ..create("Mouse", 20.0)
            },
        );
        assert!(!hidden.availability);
    }

    #[test]
    fn test_whole_price_serializes_as_integer() {
        let product = Product::new(1, create("Monitor", 300.0));
        assert_eq!(
            serde_json::to_value(&product).unwrap(),
            json!({"id": 1, "name": "Monitor", "price": 300, "availability": true})
        );
        assert!(serde_json::to_string(&product).unwrap().contains(r#""price":300,"#));
    }

    #[test]
    fn test_fractional_price_serializes_as_float() {
        let product = Product::new(1, create("Cable", 19.99));
        assert_eq!(serde_json::to_value(&product).unwrap()["price"], json!(19.99));
    }

    #[test]
    fn test_product_deserializes_integer_price() {
        let product: Product =
            serde_json::from_value(json!({"id": 3, "name": "Teclado", "price": 50, "availability": false}))
                .unwrap();
        assert_eq!(product.price, 50.0);
    }

    #[test]
    fn test_apply_update_replaces_all_fields() {
        let mut product = Product::new(1, create("Monitor", 300.0));
        product.apply_update(UpdateProduct {
            name: "Monitor 4K".to_string(),
            price: 450.5,
            availability: false,
        });
        assert_eq!(product.name, "Monitor 4K");
        assert_eq!(product.price, 450.5);
        assert!(!product.availability);
        assert_eq!(product.id, 1);
    }

    #[test]
    fn test_create_product_validation() {
        assert!(create("Monitor", 300.0).validate().is_ok());
        assert!(create("", 300.0).validate().is_err());
        assert!(create("Monitor", 0.0).validate().is_err());
        assert!(create(&"x".repeat(101), 10.0).validate().is_err());
    }

    #[test]
    fn test_payload_missing_fields() {
        let payload: ProductPayload = serde_json::from_value(json!({"name": "Monitor"})).unwrap();
        assert_eq!(payload.name, Some(json!("Monitor")));
        assert!(payload.price.is_none());
        assert!(payload.availability.is_none());
    }
}
