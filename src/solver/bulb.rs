//! Lagged light-bulb resistance update.

use crate::circuit::Circuit;
use crate::components::{ElementKind, LightBulb};

/// Set every bulb's filament resistance for this frame from the power it
/// dissipated in the previous frame.
///
/// This closes a one-frame-lagged loop; it does not iterate to a fixed point.
pub fn update_bulb_resistances(circuit: &mut Circuit, use_real_bulbs: bool) {
    for element in circuit.branches_mut() {
        if let ElementKind::LightBulb(ref mut bulb) = element.kind {
            bulb.resistance = LightBulb::resistance_for(element.readings.power, use_real_bulbs);
        }
    }
}
