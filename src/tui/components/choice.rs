//! Ordered, immutable list of choices shared by the list widgets.

use super::PromptError;

/// One entry of a choice list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceItem {
    /// The text shown to the user and returned when the item is chosen
    pub label: String,
    /// Optional description shown next to the label (may be empty)
    pub description: String,
}

impl ChoiceItem {
    /// Creates an item without description.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: String::new(),
        }
    }

    /// Sets the description shown next to the label.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Ordered sequence of choices. Items are identified by position, so
/// duplicate labels are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceList {
    items: Vec<ChoiceItem>,
}

impl ChoiceList {
    #[must_use]
    pub fn new(items: Vec<ChoiceItem>) -> Self {
        Self { items }
    }

    /// Builds a list of description-less items.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(labels.into_iter().map(ChoiceItem::new).collect())
    }

    /// Pairs labels with descriptions position by position.
    ///
    /// # Errors
    ///
    /// Returns `PromptError::MismatchedInput` when the two lists differ in length.
    pub fn zip(labels: Vec<String>, descriptions: Vec<String>) -> Result<Self, PromptError> {
        if labels.len() != descriptions.len() {
            return Err(PromptError::MismatchedInput {
                labels: labels.len(),
                descriptions: descriptions.len(),
            });
        }

        let items = labels
            .into_iter()
            .zip(descriptions)
            .map(|(label, description)| ChoiceItem { label, description })
            .collect();

        Ok(Self::new(items))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ChoiceItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChoiceItem> {
        self.items.iter()
    }

    /// Width (in characters) of the longest label of the whole list.
    #[must_use]
    pub fn label_width(&self) -> usize {
        self.items
            .iter()
            .map(|item| item.label.chars().count())
            .max()
            .unwrap_or(0)
    }
}

impl From<Vec<ChoiceItem>> for ChoiceList {
    fn from(items: Vec<ChoiceItem>) -> Self {
        Self::new(items)
    }
}
