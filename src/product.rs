//! Product records.
//!
//! A product is an open-schema JSON object. Only `id` is managed by the
//! service; `name`, `category`, and `price` are conventional and get typed
//! accessors, everything else passes through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use store::{Record, ID_FIELD};

pub const NAME_FIELD: &str = "name";
pub const CATEGORY_FIELD: &str = "category";
pub const PRICE_FIELD: &str = "price";

/// A stored product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Product(Record);

/// Price as the client sent it. Strings and numbers are both accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Price<'a> {
    Text(&'a str),
    Number(&'a Number),
}

impl fmt::Display for Price<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Text(s) => f.write_str(s),
            Price::Number(n) => write!(f, "{n}"),
        }
    }
}

impl Product {
    /// Build a new product with `id` as its first field followed by `fields`.
    /// An `id` inside `fields` is ignored.
    pub fn new(id: impl Into<String>, fields: Record) -> Self {
        let mut record = Record::new();
        record.insert(ID_FIELD.to_string(), Value::String(id.into()));
        for (key, value) in fields {
            if key != ID_FIELD {
                record.insert(key, value);
            }
        }
        Self(record)
    }

    /// Wrap a record read back from the store.
    pub fn from_record(record: Record) -> Self {
        Self(record)
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field(ID_FIELD)
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field(NAME_FIELD)
    }

    pub fn category(&self) -> Option<&str> {
        self.str_field(CATEGORY_FIELD)
    }

    pub fn price(&self) -> Option<Price<'_>> {
        match self.0.get(PRICE_FIELD)? {
            Value::String(s) => Some(Price::Text(s)),
            Value::Number(n) => Some(Price::Number(n)),
            _ => None,
        }
    }

    /// Any field, including the ones without a typed accessor.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> &Record {
        &self.0
    }

    pub fn into_record(self) -> Record {
        self.0
    }

    fn str_field(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }
}

impl From<Product> for Value {
    fn from(product: Product) -> Self {
        Value::Object(product.0)
    }
}
