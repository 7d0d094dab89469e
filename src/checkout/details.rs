//! Delivery details

use std::{fmt, ops::RangeInclusive};

use serde::{Deserialize, Serialize};

/// A field of the delivery form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Recipient name
    Name,

    /// Contact phone number
    Phone,

    /// Street address
    Address,

    /// City
    City,

    /// Free-form courier instructions
    Instructions,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::City => "city",
            Self::Instructions => "instructions",
        })
    }
}

/// One validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Offending field.
    pub field: Field,

    /// Message shown next to the field.
    pub message: &'static str,
}

/// Every validation failure of a form, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Message for a field, if it failed.
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }

    /// Iterate over the failures.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether every field passed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn check(
        &mut self,
        field: Field,
        value: &str,
        range: RangeInclusive<usize>,
        message: &'static str,
    ) {
        if !range.contains(&value.chars().count()) {
            self.0.push(FieldError { field, message });
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }

            write!(f, "{}: {}", error.field, error.message)?;
        }

        Ok(())
    }
}

/// Where and to whom the order is delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    /// Recipient name, 2 to 100 characters.
    pub name: String,

    /// Contact phone number, 10 to 15 characters.
    pub phone: String,

    /// Street address, 10 to 500 characters.
    pub address: String,

    /// City, 2 to 100 characters.
    pub city: String,

    /// Courier instructions, at most 500 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl DeliveryDetails {
    /// Checks every field and collects all failures.
    ///
    /// # Errors
    ///
    /// Returns the [`FieldErrors`] when at least one field fails.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        errors.check(
            Field::Name,
            &self.name,
            2..=100,
            "Name must be at least 2 characters",
        );
        errors.check(Field::Phone, &self.phone, 10..=15, "Enter a valid phone number");
        errors.check(
            Field::Address,
            &self.address,
            10..=500,
            "Enter a complete address",
        );
        errors.check(Field::City, &self.city, 2..=100, "Enter a valid city");

        if let Some(instructions) = &self.instructions {
            errors.check(
                Field::Instructions,
                instructions,
                0..=500,
                "Instructions must be at most 500 characters",
            );
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
