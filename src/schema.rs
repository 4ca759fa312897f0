//! Dataset Schema Module
//!
//! Declares which dataset types exist and the JSON shape each one must have.
//! Both the client and the service validate payloads against it.

use std::collections::HashMap;

use serde_json::{Map, Value};
use thiserror::Error;

/// Maximum dataset name length in bytes
pub const MAX_DATASET_NAME_LENGTH: usize = 64;

// == Shape ==
/// Top-level JSON shape of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// JSON array
    List,
    /// JSON object
    Object,
    /// Anything
    Any,
}

impl Shape {
    /// Returns true if `value` has this shape.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Shape::List => value.is_array(),
            Shape::Object => value.is_object(),
            Shape::Any => true,
        }
    }

    /// Value of a dataset that has never been saved.
    pub fn empty_value(&self) -> Value {
        match self {
            Shape::List => Value::Array(Vec::new()),
            Shape::Object | Shape::Any => Value::Object(Map::new()),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Shape::List => "an array",
            Shape::Object => "an object",
            Shape::Any => "any value",
        }
    }
}

// == Schema Error ==
/// Reason a dataset name or payload was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{0}")]
    InvalidName(String),

    #[error("'{dataset}' must be {}", .expected.describe())]
    ShapeMismatch { dataset: String, expected: Shape },
}

// == Dataset Schema ==
/// Registry mapping dataset type names to their shapes.
#[derive(Debug, Clone, Default)]
pub struct DatasetSchema {
    shapes: HashMap<String, Shape>,
}

impl DatasetSchema {
    /// Creates an empty registry; every name resolves to [`Shape::Any`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry of the game's datasets.
    pub fn game() -> Self {
        let mut schema = Self::new();
        for name in [
            "users",
            "applications",
            "purchase_requests",
            "task_submissions",
            "reward_history",
            "leaderboard",
            "cell_tasks",
            "shop_items",
        ] {
            schema.register(name, Shape::List);
        }
        schema.register("game_states", Shape::Object);
        schema.register("shopping_carts", Shape::Object);
        schema
    }

    /// Adds or replaces a dataset type.
    pub fn register(&mut self, name: impl Into<String>, shape: Shape) {
        self.shapes.insert(name.into(), shape);
    }

    /// Shape of a registered dataset.
    pub fn shape_of(&self, name: &str) -> Option<Shape> {
        self.shapes.get(name).copied()
    }

    /// Returns true if the dataset type is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.shapes.contains_key(name)
    }

    /// Registered dataset names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.shapes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Checks `value` against the dataset's shape. Unregistered names accept anything.
    pub fn validate(&self, name: &str, value: &Value) -> Result<(), SchemaError> {
        let shape = self.shape_of(name).unwrap_or(Shape::Any);
        if shape.matches(value) {
            Ok(())
        } else {
            Err(SchemaError::ShapeMismatch {
                dataset: name.to_string(),
                expected: shape,
            })
        }
    }
}

// == Name Validation ==
/// Checks that a dataset name is usable as a URL path segment and a file name.
pub fn validate_name(name: &str) -> Result<(), SchemaError> {
    if name.is_empty() {
        return Err(SchemaError::InvalidName(
            "Dataset name cannot be empty".to_string(),
        ));
    }
    if name.len() > MAX_DATASET_NAME_LENGTH {
        return Err(SchemaError::InvalidName(format!(
            "Dataset name exceeds maximum length of {} bytes",
            MAX_DATASET_NAME_LENGTH
        )));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(SchemaError::InvalidName(format!(
            "Dataset name contains invalid character '{}'",
            c
        )));
    }
    Ok(())
}
