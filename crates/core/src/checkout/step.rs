//! Checkout steps and progress indicator state.

use serde::{Deserialize, Serialize};

/// One of the four linear checkout steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    #[default]
    Shipping,
    Delivery,
    Payment,
    Review,
}

impl CheckoutStep {
    /// All steps in order.
    pub const ALL: [Self; 4] = [Self::Shipping, Self::Delivery, Self::Payment, Self::Review];

    /// 1-based position of the step.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Shipping => 1,
            Self::Delivery => 2,
            Self::Payment => 3,
            Self::Review => 4,
        }
    }

    /// Step for a 1-based position.
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Shipping),
            2 => Some(Self::Delivery),
            3 => Some(Self::Payment),
            4 => Some(Self::Review),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Shipping => "Shipping",
            Self::Delivery => "Delivery",
            Self::Payment => "Payment",
            Self::Review => "Review",
        }
    }

    /// The following step, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// The preceding step, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How a step renders in the progress indicator relative to the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Complete,
    Current,
    Upcoming,
}

impl StepStatus {
    /// Status of `step` while the flow sits at `current`.
    #[must_use]
    pub fn of(step: CheckoutStep, current: CheckoutStep) -> Self {
        match step.cmp(&current) {
            std::cmp::Ordering::Less => Self::Complete,
            std::cmp::Ordering::Equal => Self::Current,
            std::cmp::Ordering::Greater => Self::Upcoming,
        }
    }
}
