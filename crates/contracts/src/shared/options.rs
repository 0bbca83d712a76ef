use serde::{Deserialize, Serialize};

/// `{value, label}` pair served by the option endpoints for selection lists
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption<V> {
    pub value: V,
    pub label: String,
}

impl<V> SelectOption<V> {
    pub fn new(value: V, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Label of `value` in `options`, if listed
pub fn label_of<'a, V: PartialEq>(options: &'a [SelectOption<V>], value: &V) -> Option<&'a str> {
    options
        .iter()
        .find(|o| &o.value == value)
        .map(|o| o.label.as_str())
}
