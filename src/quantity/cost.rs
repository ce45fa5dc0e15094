use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// US dollars.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::Sum,
)]
pub struct Cost(pub f64);

impl Cost {
    pub const ZERO: Self = Self(0.0);
}

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}
