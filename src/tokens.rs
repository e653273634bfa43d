//! # Visual Tokens
//!
//! A [`TokenRow`] is the renderable projection of a [`Dataset`]: one
//! [`VisualToken`] per element, in dataset order. Rows are always built as a
//! batch from a dataset and carry its generation, so index `i` of the row is
//! index `i` of the data it was built from.

use crate::dataset::Dataset;

/// Renderable marker for one dataset element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualToken {
    pub index: usize,
    pub value: i32,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenRow {
    generation: u64,
    tokens: Vec<VisualToken>,
}

impl TokenRow {
    /// Build a fresh row for the current contents of `dataset`.
    pub fn build(dataset: &Dataset) -> Self {
        let tokens = dataset
            .values()
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(index, &value)| VisualToken {
                index,
                value,
                label: value.to_string(),
            })
            .collect();

        Self {
            generation: dataset.generation(),
            tokens,
        }
    }

    /// Generation of the dataset this row was built from.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Handle to the token at `index`.
    pub fn get(&self, index: usize) -> Option<&VisualToken> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VisualToken> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Width of the widest label, used to give every token the same cell size.
    pub fn label_width(&self) -> usize {
        self.tokens
            .iter()
            .map(|t| t.label.chars().count())
            .max()
            .unwrap_or(0)
    }
}
