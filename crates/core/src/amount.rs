//! Unit-tagged exact-decimal monetary amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::value_object::ValueObject;

/// A quantity tagged with a unit of measurement (e.g. `inr`, `usd`).
///
/// Arithmetic never mutates the receiver; `add`/`subtract` return a new
/// amount. Units are free-form strings and only identical units combine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount {
    unit: String,
    value: Decimal,
}

impl ValueObject for Amount {}

impl Amount {
    /// Unit used when none is given.
    pub const DEFAULT_UNIT: &'static str = "inr";

    /// Amount in the default unit.
    pub fn new(value: Decimal) -> Self {
        Self::with_unit(value, Self::DEFAULT_UNIT)
    }

    pub fn with_unit(value: Decimal, unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            value,
        }
    }

    /// Zero in the default unit.
    pub fn zero() -> Self {
        Self::new(Decimal::ZERO)
    }

    pub fn builder() -> AmountBuilder {
        AmountBuilder::default()
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn is_positive(&self) -> bool {
        self.value > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.value < Decimal::ZERO
    }

    pub fn same_unit(&self, other: &Amount) -> bool {
        self.unit == other.unit
    }

    /// `self + other`, defined only for matching units.
    pub fn add(&self, other: &Amount) -> LedgerResult<Amount> {
        self.ensure_same_unit(other)?;
        Ok(Self {
            unit: self.unit.clone(),
            value: self.value + other.value,
        })
    }

    /// `self - other`.
    ///
    /// Fails with `InsufficientBalance` whenever the receiver is not positive,
    /// before looking at `other` at all. The result itself may be negative.
    pub fn subtract(&self, other: &Amount) -> LedgerResult<Amount> {
        if !self.is_positive() {
            return Err(LedgerError::insufficient_balance(self));
        }
        self.ensure_same_unit(other)?;
        Ok(Self {
            unit: self.unit.clone(),
            value: self.value - other.value,
        })
    }

    fn ensure_same_unit(&self, other: &Amount) -> LedgerResult<()> {
        if self.same_unit(other) {
            Ok(())
        } else {
            Err(LedgerError::unit_mismatch(&self.unit, &other.unit))
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Builder for [`Amount`]; defaults to zero in [`Amount::DEFAULT_UNIT`].
#[derive(Debug, Clone)]
pub struct AmountBuilder {
    unit: String,
    value: Decimal,
}

impl Default for AmountBuilder {
    fn default() -> Self {
        Self {
            unit: Amount::DEFAULT_UNIT.to_string(),
            value: Decimal::ZERO,
        }
    }
}

impl AmountBuilder {
    pub fn value(mut self, value: Decimal) -> Self {
        self.value = value;
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn build(self) -> Amount {
        Amount {
            unit: self.unit,
            value: self.value,
        }
    }
}
