use super::validation::FieldError;

/// One user-editable input and its derived validity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormField {
    pub value: String,
    pub error: Option<FieldError>,
    /// Set on blur; gates "required" errors until the user has left the field.
    pub touched: bool,
}

impl FormField {
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Ordered fields of one form, keyed by the schema's field type.
#[derive(Clone, Debug)]
pub struct FieldSet<F> {
    entries: Vec<(F, FormField)>,
}

impl<F: Copy + Eq> FieldSet<F> {
    pub fn new(fields: &[F]) -> Self {
        Self {
            entries: fields
                .iter()
                .map(|field| (*field, FormField::default()))
                .collect(),
        }
    }

    pub fn get(&self, field: F) -> Option<&FormField> {
        self.entries
            .iter()
            .find(|(key, _)| *key == field)
            .map(|(_, entry)| entry)
    }

    pub(crate) fn get_mut(&mut self, field: F) -> Option<&mut FormField> {
        self.entries
            .iter_mut()
            .find(|(key, _)| *key == field)
            .map(|(_, entry)| entry)
    }

    /// Current value, empty for unknown fields.
    pub fn value(&self, field: F) -> &str {
        self.get(field).map_or("", |entry| entry.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &FormField)> {
        self.entries.iter().map(|(key, entry)| (*key, entry))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (F, &mut FormField)> {
        self.entries.iter_mut().map(|(key, entry)| (*key, entry))
    }
}
