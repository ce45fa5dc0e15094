use std::{
    fmt::{Display, Formatter},
    ops::Mul,
};

use serde::{Deserialize, Serialize};

use crate::quantity::{cost::Cost, energy::KilowattHours};

/// Dollars per kilowatt-hour.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::From,
    derive_more::FromStr,
)]
#[serde(transparent)]
pub struct KilowattHourRate(pub f64);

impl Mul<KilowattHours> for KilowattHourRate {
    type Output = Cost;

    fn mul(self, rhs: KilowattHours) -> Self::Output {
        Cost(self.0 * rhs.0)
    }
}

impl Display for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.5}/kWh", self.0)
    }
}
