//! inside

use qti_types::{Coords, QtiScalar};

use super::{Output, null, value};
use crate::processor::OperatorProcessor;

impl OperatorProcessor<'_> {
    /// True when the point, or any point of a container, lies in the area
    pub(crate) fn process_inside(&self, coords: &Coords) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_contract(
            (self.operands.anything_but_record(), "single, multiple or ordered"),
            (self.operands.exclusively_point(), "point"),
        )?;
        let Some(points) = self.flattened_scalars() else {
            return null();
        };
        value(
            points
                .into_iter()
                .filter_map(QtiScalar::as_point)
                .any(|point| coords.inside(point)),
        )
    }
}
