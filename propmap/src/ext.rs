use propmap_core::{ConversionError, Field, Record, Typed};
use propmap_reflect::materialize;
use propmap_validate::ValidationError;
use propmap_value::{PropertyMap, Value};

/// Typed access to a [`PropertyMap`] through [`Field`] tokens.
///
/// Reads convert the stored value to the field's type on the way out; writes store values
/// as given. Null and absence both read as `None`.
///
/// ```
/// use propmap::{PropertyMap, PropertyMapExt, Typed};
///
/// #[derive(Typed)]
/// struct Counter {
///     hits: i64,
/// }
///
/// let mut map = PropertyMap::new();
/// map.set(Counter::HITS, 3);
/// assert_eq!(map.get(Counter::HITS).unwrap(), Some(3));
/// assert!(map.has_changed_from(Counter::HITS, &Counter { hits: 4 }).unwrap());
/// ```
pub trait PropertyMapExt {
    /// Lowers a record into a map with one key per field.
    fn from_record<R: Record>(record: &R) -> Self
    where
        Self: Sized;

    /// The converted value of `field`, `None` if absent or null.
    fn get<R, T: Typed>(&self, field: Field<R, T>) -> Result<Option<T::Present>, ConversionError>;

    /// Stores `value` under the field's key without converting it.
    fn set<R, T>(&mut self, field: Field<R, T>, value: impl Into<Value>);

    /// Stores the property map form of `value` under the field's key.
    fn set_typed<R, T: Typed>(&mut self, field: Field<R, T>, value: &T);

    /// Removes `field` and returns its converted value, as [`get`](Self::get) would have.
    ///
    /// The key is removed even when conversion fails.
    fn remove<R, T: Typed>(
        &mut self,
        field: Field<R, T>,
    ) -> Result<Option<T::Present>, ConversionError>;

    /// Whether the map has a key for `field`, null or not.
    fn contains<R, T>(&self, field: Field<R, T>) -> bool;

    /// The value of `field`, which must be present and non-null.
    fn required<R, T: Typed>(&self, field: Field<R, T>) -> Result<T::Present, ValidationError>;

    /// The value of `field`, which must be present but may be null.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not nullable; use [`required`](Self::required) for those fields.
    fn required_nullable<R, T: Typed>(
        &self,
        field: Field<R, T>,
    ) -> Result<Option<T::Present>, ValidationError>;

    /// Whether the map holds a value for `field` that differs from the one in `current`.
    ///
    /// An absent field has not changed.
    fn has_changed_from<R, T>(&self, field: Field<R, T>, current: &R) -> Result<bool, ConversionError>
    where
        T: Typed,
        T::Present: PartialEq;

    /// Whether the map holds a value for `field` that differs from `current()`.
    ///
    /// An absent field has not changed, and `current` is then not called.
    fn has_changed_with<R, T>(
        &self,
        field: Field<R, T>,
        current: impl FnOnce() -> T,
    ) -> Result<bool, ConversionError>
    where
        T: Typed,
        T::Present: PartialEq;

    /// Runs `block` with the new value if [`has_changed_from`](Self::has_changed_from).
    fn with_changed_from<R, T>(
        &self,
        field: Field<R, T>,
        current: &R,
        block: impl FnOnce(Option<T::Present>),
    ) -> Result<(), ConversionError>
    where
        T: Typed,
        T::Present: PartialEq,
    {
        if self.has_changed_from(field, current)? {
            block(self.get(field)?);
        }
        Ok(())
    }

    /// Runs `block` with the new value if [`has_changed_with`](Self::has_changed_with).
    fn with_changed_with<R, T>(
        &self,
        field: Field<R, T>,
        current: impl FnOnce() -> T,
        block: impl FnOnce(Option<T::Present>),
    ) -> Result<(), ConversionError>
    where
        T: Typed,
        T::Present: PartialEq,
    {
        if self.has_changed_with(field, current)? {
            block(self.get(field)?);
        }
        Ok(())
    }

    /// The new value if [`has_changed_from`](Self::has_changed_from), otherwise `None`.
    fn changed_from<R, T>(
        &self,
        field: Field<R, T>,
        current: &R,
    ) -> Result<Option<T::Present>, ConversionError>
    where
        T: Typed,
        T::Present: PartialEq,
    {
        if self.has_changed_from(field, current)? {
            self.get(field)
        } else {
            Ok(None)
        }
    }

    /// The new value if [`has_changed_with`](Self::has_changed_with), otherwise `None`.
    fn changed_with<R, T>(
        &self,
        field: Field<R, T>,
        current: impl FnOnce() -> T,
    ) -> Result<Option<T::Present>, ConversionError>
    where
        T: Typed,
        T::Present: PartialEq,
    {
        if self.has_changed_with(field, current)? {
            self.get(field)
        } else {
            Ok(None)
        }
    }

    /// Keys that name no field of the record `R`.
    fn keys_not_in_fields<R: Record>(&self) -> Vec<String>;
}

fn read<T: Typed>(value: &Value, name: &str) -> Result<Option<T::Present>, ConversionError> {
    if value.is_null() {
        return Ok(None);
    }
    Ok(materialize::<T>(value, name)?.into_present())
}

impl PropertyMapExt for PropertyMap {
    fn from_record<R: Record>(record: &R) -> Self {
        record.to_property_map()
    }

    fn get<R, T: Typed>(&self, field: Field<R, T>) -> Result<Option<T::Present>, ConversionError> {
        match self.get_value(field.name()) {
            Some(value) => read::<T>(value, field.name()),
            None => Ok(None),
        }
    }

    fn set<R, T>(&mut self, field: Field<R, T>, value: impl Into<Value>) {
        self.insert(field.name(), value);
    }

    fn set_typed<R, T: Typed>(&mut self, field: Field<R, T>, value: &T) {
        self.insert(field.name(), value.to_value());
    }

    fn remove<R, T: Typed>(
        &mut self,
        field: Field<R, T>,
    ) -> Result<Option<T::Present>, ConversionError> {
        match self.remove_value(field.name()) {
            Some(value) => read::<T>(&value, field.name()),
            None => Ok(None),
        }
    }

    fn contains<R, T>(&self, field: Field<R, T>) -> bool {
        self.contains_key(field.name())
    }

    fn required<R, T: Typed>(&self, field: Field<R, T>) -> Result<T::Present, ValidationError> {
        self.get(field)?.ok_or_else(|| {
            ValidationError::field_required(vec![field.name().to_owned()], Vec::new())
        })
    }

    fn required_nullable<R, T: Typed>(
        &self,
        field: Field<R, T>,
    ) -> Result<Option<T::Present>, ValidationError> {
        assert!(
            field.is_nullable(),
            "required_nullable must only be used with nullable fields, `{}` is not",
            field.name()
        );
        if !self.contains(field) {
            return Err(ValidationError::field_required(
                vec![field.name().to_owned()],
                Vec::new(),
            ));
        }
        Ok(self.get(field)?)
    }

    fn has_changed_from<R, T>(&self, field: Field<R, T>, current: &R) -> Result<bool, ConversionError>
    where
        T: Typed,
        T::Present: PartialEq,
    {
        if !self.contains(field) {
            return Ok(false);
        }
        let stored = self.get(field)?;
        Ok(stored.as_ref() != field.get(current).as_present())
    }

    fn has_changed_with<R, T>(
        &self,
        field: Field<R, T>,
        current: impl FnOnce() -> T,
    ) -> Result<bool, ConversionError>
    where
        T: Typed,
        T::Present: PartialEq,
    {
        if !self.contains(field) {
            return Ok(false);
        }
        let stored = self.get(field)?;
        Ok(stored != current().into_present())
    }

    fn keys_not_in_fields<R: Record>(&self) -> Vec<String> {
        match R::SHAPE.as_record() {
            Some(record) => self.keys_not_in(record.field_names()),
            None => self.keys().map(str::to_owned).collect(),
        }
    }
}
