//! Element tree data model
//!
//! An [`Element`] is a named node with ordered attributes, ordered children,
//! and optional inner text. Attribute order is preserved because it affects
//! the byte layout (not the semantics) of the encoded map.

/// A typed attribute value
///
/// Integers are carried as `i64` at construction time; the encoder narrows
/// them to the smallest wire representation that fits (u8, i16, i32). Values
/// outside the i32 range are rejected at encode time.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f32),
    Str(String),
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        AttributeValue::Bool(v)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Int(v)
    }
}

impl From<i32> for AttributeValue {
    fn from(v: i32) -> Self {
        AttributeValue::Int(i64::from(v))
    }
}

impl From<f32> for AttributeValue {
    fn from(v: f32) -> Self {
        AttributeValue::Float(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::Str(v.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        AttributeValue::Str(v)
    }
}

/// A node in the map tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Tag name (e.g. "Map", "levels", "solids")
    pub name: String,
    /// Attributes in insertion order
    pub attributes: Vec<(String, AttributeValue)>,
    /// Child elements in order
    pub children: Vec<Element>,
    /// Optional text body, encoded as an extra attribute under
    /// [`crate::INNER_TEXT_KEY`]
    pub inner_text: Option<String>,
}

impl Element {
    /// Create an element with the given tag name and nothing else
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            ..Element::default()
        }
    }

    /// Set an attribute, replacing the value in place if the key exists
    ///
    /// Replacing keeps the key's original position so re-setting an
    /// attribute does not reorder the encoded layout.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.attributes.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.attributes.push((key, value));
        }
    }

    /// Append a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Set the inner text body
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.inner_text = Some(text.into());
    }

    /// Builder form of [`set_attr`](Self::set_attr)
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder form of [`add_child`](Self::add_child)
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.add_child(child);
        self
    }

    /// Builder form of [`set_text`](Self::set_text)
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Attribute count as it will appear on the wire (inner text included)
    pub(crate) fn wire_attr_count(&self) -> usize {
        self.attributes.len() + usize::from(self.inner_text.is_some())
    }
}
