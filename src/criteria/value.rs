//! Search-value parsing: one raw string, two shapes.

/// A parsed search input: per-field pairs, a scalar fallback, or both.
///
/// The grammar is deliberately small. Input containing `:` or `;` is
/// compound: `;`-separated segments, each recorded as a `field:value`
/// pair when it splits into exactly two parts on `:`. Segments that do
/// not are skipped, except that the first segment with no `:` at all
/// becomes the scalar fallback for fields without a pair. Input with
/// neither delimiter is a scalar applied to every resolved field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchValue {
    pairs: Vec<(String, String)>,
    scalar: Option<String>,
}

impl SearchValue {
    /// Parse a raw search value.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if !raw.contains(':') && !raw.contains(';') {
            return Self::scalar(raw);
        }

        let mut pairs = Vec::new();
        let mut scalar = None;
        for segment in raw.split(';') {
            let parts: Vec<&str> = segment.split(':').collect();
            match parts.as_slice() {
                [field, value] => pairs.push(((*field).to_string(), (*value).to_string())),
                [text] if scalar.is_none() && !text.trim().is_empty() => {
                    scalar = Some((*text).to_string());
                }
                // malformed segment, skipped
                _ => {}
            }
        }
        Self { pairs, scalar }
    }

    /// Force free-text interpretation, for values that legitimately
    /// contain `:` or `;` (searching for "9:00am").
    #[must_use]
    pub fn scalar(raw: &str) -> Self {
        Self {
            pairs: Vec::new(),
            scalar: Some(raw.to_string()),
        }
    }

    /// Effective value for a field: its pair if one exists, else the
    /// scalar fallback.
    #[must_use]
    pub fn value_for(&self, field: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
            .or(self.scalar.as_deref())
    }

    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    #[must_use]
    pub fn scalar_value(&self) -> Option<&str> {
        self.scalar.as_deref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.scalar.is_none()
    }
}
