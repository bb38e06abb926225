//! WASM bindings for CircuitLab Core.
//!
//! This module exposes the circuit model and the per-frame solver to a
//! browser editor. The editor keeps the returned handles alongside its own
//! drawing state and calls `solve` once per `requestAnimationFrame`.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCircuit } from 'circuitlab_core';
//!
//! await init();
//!
//! const circuit = new WasmCircuit();
//! const a = circuit.add_node(100, 100);
//! const b = circuit.add_node(200, 100);
//! circuit.add_battery(a, b, 9.0, 0.0);
//! const bulb = circuit.add_bulb(a, b);
//!
//! function frame() {
//!   circuit.solve(realBulbs);
//!   draw(circuit.element_power(bulb));
//!   requestAnimationFrame(frame);
//! }
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{ElementId, NodeId};
use crate::components::{
    Ammeter, Battery, ElementKind, LightBulb, Readings, Resistor, Switch, Voltmeter,
};
use crate::error::CircuitError;
use crate::solver::{SolveStatus, Solver};
use crate::Circuit;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: CircuitError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM-compatible circuit plus solver.
///
/// Node and element handles are plain integers on the JavaScript side.
#[wasm_bindgen]
#[derive(Default)]
pub struct WasmCircuit {
    circuit: Circuit,
    solver: Solver,
}

impl WasmCircuit {
    fn add(&mut self, kind: ElementKind, n1: usize, n2: usize) -> Result<usize, JsValue> {
        self.circuit
            .add_element(kind, NodeId(n1), NodeId(n2))
            .map(|id| id.0)
            .map_err(to_js)
    }

    fn readings(&self, id: usize) -> Option<Readings> {
        self.circuit.element(ElementId(id)).map(|e| e.readings)
    }
}

#[wasm_bindgen]
impl WasmCircuit {
    /// Create an empty circuit.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmCircuit {
        WasmCircuit::default()
    }

    /// Add a node at a canvas position and return its handle.
    #[wasm_bindgen]
    pub fn add_node(&mut self, x: f64, y: f64) -> usize {
        self.circuit.add_node(x, y).0
    }

    /// Add a battery; `nodes[0]` is the positive terminal.
    #[wasm_bindgen]
    pub fn add_battery(
        &mut self,
        n1: usize,
        n2: usize,
        voltage: f64,
        internal_resistance: f64,
    ) -> Result<usize, JsValue> {
        let battery = Battery::with_internal_resistance(voltage, internal_resistance);
        self.add(ElementKind::Battery(battery), n1, n2)
    }

    /// Add a resistor.
    #[wasm_bindgen]
    pub fn add_resistor(&mut self, n1: usize, n2: usize, resistance: f64) -> Result<usize, JsValue> {
        self.add(ElementKind::Resistor(Resistor::new(resistance)), n1, n2)
    }

    /// Add a light bulb.
    #[wasm_bindgen]
    pub fn add_bulb(&mut self, n1: usize, n2: usize) -> Result<usize, JsValue> {
        self.add(ElementKind::LightBulb(LightBulb::new()), n1, n2)
    }

    /// Add a switch.
    #[wasm_bindgen]
    pub fn add_switch(&mut self, n1: usize, n2: usize, closed: bool) -> Result<usize, JsValue> {
        self.add(ElementKind::Switch(Switch::new(closed)), n1, n2)
    }

    /// Add an ideal voltmeter.
    #[wasm_bindgen]
    pub fn add_voltmeter(&mut self, n1: usize, n2: usize) -> Result<usize, JsValue> {
        self.add(ElementKind::Voltmeter(Voltmeter), n1, n2)
    }

    /// Add an ammeter.
    #[wasm_bindgen]
    pub fn add_ammeter(&mut self, n1: usize, n2: usize) -> Result<usize, JsValue> {
        self.add(ElementKind::Ammeter(Ammeter::default()), n1, n2)
    }

    /// Add a wire with the default resistivity.
    #[wasm_bindgen]
    pub fn add_wire(&mut self, n1: usize, n2: usize) -> Result<usize, JsValue> {
        self.circuit
            .add_wire(NodeId(n1), NodeId(n2))
            .map(|id| id.0)
            .map_err(to_js)
    }

    /// Remove an element or wire (and any nodes left unused).
    #[wasm_bindgen]
    pub fn remove_element(&mut self, id: usize) -> Result<(), JsValue> {
        self.circuit
            .remove_element(ElementId(id))
            .map(|_| ())
            .map_err(to_js)
    }

    /// Merge node `remove` into node `keep` (wire snapping).
    #[wasm_bindgen]
    pub fn merge_nodes(&mut self, keep: usize, remove: usize) -> Result<(), JsValue> {
        self.circuit
            .merge_nodes(NodeId(keep), NodeId(remove))
            .map_err(to_js)
    }

    /// Toggle a switch, returning its new state (`true` = closed).
    #[wasm_bindgen]
    pub fn toggle_switch(&mut self, id: usize) -> Result<bool, JsValue> {
        self.circuit.toggle_switch(ElementId(id)).map_err(to_js)
    }

    /// Remove everything.
    #[wasm_bindgen]
    pub fn clear(&mut self) {
        self.circuit.clear();
    }

    /// Solve one frame. Returns `false` if the frame was degenerate and the
    /// previous readings were kept.
    #[wasm_bindgen]
    pub fn solve(&mut self, use_real_bulbs: bool) -> bool {
        !matches!(
            self.solver.solve(&mut self.circuit, use_real_bulbs),
            SolveStatus::Degenerate { .. }
        )
    }

    /// Get a node's voltage, or `undefined` if the node doesn't exist.
    #[wasm_bindgen]
    pub fn node_voltage(&self, id: usize) -> Option<f64> {
        self.circuit.node(NodeId(id)).map(|n| n.voltage)
    }

    /// Get an element's current in amps.
    #[wasm_bindgen]
    pub fn element_current(&self, id: usize) -> Option<f64> {
        self.readings(id).map(|r| r.current)
    }

    /// Get an element's voltage drop in volts.
    #[wasm_bindgen]
    pub fn element_voltage_drop(&self, id: usize) -> Option<f64> {
        self.readings(id).map(|r| r.voltage_drop)
    }

    /// Get an element's dissipated power in watts (bulbs only).
    #[wasm_bindgen]
    pub fn element_power(&self, id: usize) -> Option<f64> {
        self.readings(id).map(|r| r.power)
    }

    /// Check whether an element is flagged as short-circuited.
    #[wasm_bindgen]
    pub fn is_short_circuit(&self, id: usize) -> bool {
        self.readings(id).is_some_and(|r| r.is_short_circuit)
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
