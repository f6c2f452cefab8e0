//! Content-line parameters.

/// A content-line parameter.
///
/// Parameters can have multiple values (e.g., TYPE=home,work). The name is
/// absent for vCard 2.1 shorthand such as `TEL;WORK;VOICE:...`. Names are
/// stored exactly as written and compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCardParameter {
    /// Parameter name, case preserved.
    pub name: Option<String>,
    /// Parameter values. Never empty.
    pub values: Vec<String>,
}

impl VCardParameter {
    /// Creates a new parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            values: vec![value.into()],
        }
    }

    /// Creates a parameter with multiple values.
    ///
    /// An empty list is stored as a single empty value.
    #[must_use]
    pub fn multi(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: Some(name.into()),
            values: non_empty(values),
        }
    }

    /// Creates a nameless parameter (vCard 2.1 only).
    #[must_use]
    pub fn nameless(value: impl Into<String>) -> Self {
        Self {
            name: None,
            values: vec![value.into()],
        }
    }

    /// Returns the first value.
    #[must_use]
    pub fn value(&self) -> &str {
        self.values.first().map_or("", String::as_str)
    }

    /// Returns whether the parameter is called `name` (case-insensitive).
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref().is_some_and(|n| n.eq_ignore_ascii_case(name))
    }

    /// Returns whether the parameter has the specified value (case-insensitive).
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.eq_ignore_ascii_case(value))
    }

    /// Creates a TYPE parameter.
    #[must_use]
    pub fn type_param(value: impl Into<String>) -> Self {
        Self::new(names::TYPE, value)
    }

    /// Creates an `ENCODING=QUOTED-PRINTABLE` parameter.
    #[must_use]
    pub fn quoted_printable() -> Self {
        Self::new(names::ENCODING, QUOTED_PRINTABLE)
    }

    /// Creates a CHARSET parameter.
    #[must_use]
    pub fn charset(label: impl Into<String>) -> Self {
        Self::new(names::CHARSET, label)
    }
}

fn non_empty(mut values: Vec<String>) -> Vec<String> {
    if values.is_empty() {
        values.push(String::new());
    }
    values
}

/// The `ENCODING` value that marks a quoted-printable property value.
pub const QUOTED_PRINTABLE: &str = "QUOTED-PRINTABLE";

/// Parameter names the engine itself looks at.
pub mod names {
    pub const TYPE: &str = "TYPE";
    pub const ENCODING: &str = "ENCODING";
    pub const CHARSET: &str = "CHARSET";
    pub const VALUE: &str = "VALUE";
}

/// Ordered list of parameters.
///
/// Insertion order is kept for output; lookups are case-insensitive on the
/// name. The same name may appear more than once (`TYPE=work;TYPE=dom`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parameters(Vec<VCardParameter>);

impl Parameters {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VCardParameter> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, VCardParameter> {
        self.0.iter_mut()
    }

    /// Appends a parameter.
    pub fn push(&mut self, param: VCardParameter) {
        self.0.push(param);
    }

    /// Returns the first parameter with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&VCardParameter> {
        self.0.iter().find(|p| p.is_named(name))
    }

    /// Returns the first value of the first parameter with the given name.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).map(VCardParameter::value)
    }

    /// Returns every value of every parameter with the given name, in order.
    #[must_use]
    pub fn values_of(&self, name: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|p| p.is_named(name))
            .flat_map(|p| p.values.iter().map(String::as_str))
            .collect()
    }

    /// Returns the values of the nameless parameters, in order.
    #[must_use]
    pub fn nameless_values(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|p| p.name.is_none())
            .flat_map(|p| p.values.iter().map(String::as_str))
            .collect()
    }

    /// Returns whether any parameter with the given name has the value.
    #[must_use]
    pub fn contains_value(&self, name: &str, value: &str) -> bool {
        self.0
            .iter()
            .any(|p| p.is_named(name) && p.has_value(value))
    }

    /// Adds a value to the first parameter with the given name, or appends a
    /// new parameter if there is none.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        if let Some(param) = self.0.iter_mut().find(|p| p.is_named(name)) {
            param.values.push(value.into());
        } else {
            self.0.push(VCardParameter::new(name, value));
        }
    }

    /// Replaces every parameter with the given name by a single one, kept at
    /// the position of the first occurrence.
    pub fn replace(&mut self, name: &str, value: impl Into<String>) {
        let position = self.0.iter().position(|p| p.is_named(name));
        self.remove(name);
        let param = VCardParameter::new(name, value);
        match position {
            Some(index) => self.0.insert(index, param),
            None => self.0.push(param),
        }
    }

    /// Removes every parameter with the given name and returns them.
    pub fn remove(&mut self, name: &str) -> Vec<VCardParameter> {
        let (removed, kept) = std::mem::take(&mut self.0)
            .into_iter()
            .partition(|p| p.is_named(name));
        self.0 = kept;
        removed
    }

    /// Returns whether the value is marked as quoted-printable.
    ///
    /// vCard 2.1 also allows the bare shorthand `;QUOTED-PRINTABLE`.
    #[must_use]
    pub fn is_quoted_printable(&self) -> bool {
        self.contains_value(names::ENCODING, QUOTED_PRINTABLE)
            || self
                .nameless_values()
                .iter()
                .any(|v| v.eq_ignore_ascii_case(QUOTED_PRINTABLE))
    }

    /// Removes the quoted-printable markers (named or nameless).
    pub fn remove_quoted_printable(&mut self) {
        self.0.retain(|p| {
            let marker = p.is_named(names::ENCODING) || p.name.is_none();
            !(marker && p.has_value(QUOTED_PRINTABLE))
        });
    }

    /// Returns the CHARSET parameter value.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.first(names::CHARSET)
    }
}

impl From<Vec<VCardParameter>> for Parameters {
    fn from(params: Vec<VCardParameter>) -> Self {
        Self(params)
    }
}

impl FromIterator<VCardParameter> for Parameters {
    fn from_iter<I: IntoIterator<Item = VCardParameter>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a VCardParameter;
    type IntoIter = std::slice::Iter<'a, VCardParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Parameters {
    type Item = VCardParameter;
    type IntoIter = std::vec::IntoIter<VCardParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
