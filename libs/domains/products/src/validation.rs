//! Field rules for the product routes.
//!
//! Messages are part of the HTTP contract; clients match on them.

use axum_helpers::extractors::IdPath;
use axum_helpers::validation::predicates::{
    as_bool, as_number, as_text, is_boolean, is_numeric, is_optional_boolean, is_positive,
    is_present,
};
use axum_helpers::{FieldError, Location, Rule, ValidateInput, ValidationErrors, run_rules};
use serde_json::Value;

use crate::models::{CreateProduct, ProductPayload, UpdateProduct};

pub const NAME_REQUIRED: &str = "El nombre de Producto no puede ir vacio";
pub const NAME_TOO_LONG: &str = "El nombre de Producto no puede superar los 100 caracteres";
pub const PRICE_NOT_NUMERIC: &str = "Valor no válido";
pub const PRICE_REQUIRED: &str = "El precio de Producto no puede ir vacio";
pub const PRICE_NOT_POSITIVE: &str = "Precio no válido";
const NAME_MAX_CHARS: usize = 100;

pub const AVAILABILITY_NOT_BOOLEAN: &str = "Valor para disponibilidad no válido";

fn name(payload: &ProductPayload) -> Option<&Value> {
    payload.name.as_ref()
}

fn price(payload: &ProductPayload) -> Option<&Value> {
    payload.price.as_ref()
}

fn availability(payload: &ProductPayload) -> Option<&Value> {
    payload.availability.as_ref()
}

/// Non-empty and representable as text (objects and arrays are not names)
fn is_name(value: Option<&Value>) -> bool {
    is_present(value) && value.and_then(as_text).is_some()
}

/// Fits the `varchar(100)` column; a missing name is reported by [`is_name`]
fn is_short_name(value: Option<&Value>) -> bool {
    value
        .and_then(as_text)
        .is_none_or(|name| name.chars().count() <= NAME_MAX_CHARS)
}

const fn body_rule(
    field: &'static str,
    message: &'static str,
    value: fn(&ProductPayload) -> Option<&Value>,
    check: fn(Option<&Value>) -> bool,
) -> Rule<ProductPayload> {
    Rule {
        location: Location::Body,
        field,
        message,
        value,
        check,
    }
}

/// `POST /`: availability may be omitted
pub const CREATE_RULES: &[Rule<ProductPayload>] = &[
    body_rule("name", NAME_REQUIRED, name, is_name),
    body_rule("name", NAME_TOO_LONG, name, is_short_name),
    body_rule("price", PRICE_NOT_NUMERIC, price, is_numeric),
    body_rule("price", PRICE_REQUIRED, price, is_present),
    body_rule("price", PRICE_NOT_POSITIVE, price, is_positive),
    body_rule("availability", AVAILABILITY_NOT_BOOLEAN, availability, is_optional_boolean),
];

/// `PUT /{id}`: full replacement, availability required
pub const UPDATE_RULES: &[Rule<ProductPayload>] = &[
    body_rule("name", NAME_REQUIRED, name, is_name),
    body_rule("name", NAME_TOO_LONG, name, is_short_name),
    body_rule("price", PRICE_NOT_NUMERIC, price, is_numeric),
    body_rule("price", PRICE_REQUIRED, price, is_present),
    body_rule("price", PRICE_NOT_POSITIVE, price, is_positive),
    body_rule("availability", AVAILABILITY_NOT_BOOLEAN, availability, is_boolean),
];

/// Read a field the rules already accepted
fn field<T>(
    raw: Option<&Value>,
    convert: fn(&Value) -> Option<T>,
    field: &str,
    message: &str,
) -> Result<T, ValidationErrors> {
    raw.and_then(convert).ok_or_else(|| {
        ValidationErrors::single(FieldError::new(
            Location::Body,
            field,
            message,
            raw.cloned(),
        ))
    })
}

impl ValidateInput for ProductPayload {
    type Output = CreateProduct;

    fn validate_input(self) -> Result<CreateProduct, ValidationErrors> {
        run_rules(&self, CREATE_RULES).into_result()?;

        Ok(CreateProduct {
            name: field(name(&self), as_text, "name", NAME_REQUIRED)?,
            price: field(price(&self), as_number, "price", PRICE_NOT_NUMERIC)?,
            availability: availability(&self).and_then(as_bool),
        })
    }
}

/// Validate `PUT /{id}`: id and body errors are reported together, id first.
pub fn validate_update(
    raw_id: &str,
    payload: ProductPayload,
) -> Result<(i32, UpdateProduct), ValidationErrors> {
    let id = IdPath::parse(raw_id);

    let mut errors = match &id {
        Ok(_) => ValidationErrors::new(),
        Err(id_errors) => id_errors.clone(),
    };
    errors.extend(run_rules(&payload, UPDATE_RULES));
    errors.into_result()?;

    let update = UpdateProduct {
        name: field(name(&payload), as_text, "name", NAME_REQUIRED)?,
        price: field(price(&payload), as_number, "price", PRICE_NOT_NUMERIC)?,
        availability: field(
            availability(&payload),
            as_bool,
            "availability",
            AVAILABILITY_NOT_BOOLEAN,
        )?,
    };

    Ok((id?, update))
}
