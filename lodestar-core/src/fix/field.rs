//! Validity-tagged measured quantity

/// A measured quantity plus whether the sensor vouches for it
///
/// When `valid` is false the value is leftover or default and must not be
/// interpreted. Prefer [`FixField::get`], which makes the branch explicit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixField<T> {
    value: T,
    valid: bool,
}

impl<T: Copy> FixField<T> {
    /// A field the sensor vouches for
    pub const fn valid(value: T) -> Self {
        Self { value, valid: true }
    }

    /// A field carrying `value` with an explicit validity flag
    pub const fn new(value: T, valid: bool) -> Self {
        Self { value, valid }
    }

    /// The value, only if valid
    pub fn get(&self) -> Option<T> {
        if self.valid {
            Some(self.value)
        } else {
            None
        }
    }

    /// Whether the value may be interpreted
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl<T: Copy + Default> FixField<T> {
    /// A field with no usable value
    pub fn invalid() -> Self {
        Self {
            value: T::default(),
            valid: false,
        }
    }
}
