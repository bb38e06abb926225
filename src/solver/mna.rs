//! MNA matrix assembly.

use crate::circuit::{Circuit, NodeId};
use crate::components::ElementKind;

use super::SolverConfig;

/// Mapping from node handles to matrix rows for one frame.
///
/// Rows are assigned to live nodes in insertion order; the first live node is
/// the ground reference.
#[derive(Debug, Clone)]
pub struct NodeIndex {
    rows: Vec<Option<usize>>,
    num_nodes: usize,
}

impl NodeIndex {
    /// Build the index for the circuit's current node set.
    pub fn new(circuit: &Circuit) -> Self {
        let mut rows = vec![None; circuit.node_capacity()];
        let mut num_nodes = 0;
        for node in circuit.nodes() {
            rows[node.id.0] = Some(num_nodes);
            num_nodes += 1;
        }
        Self { rows, num_nodes }
    }

    /// Matrix row of a node, or `None` if the handle no longer resolves.
    pub fn row(&self, node: NodeId) -> Option<usize> {
        self.rows.get(node.0).copied().flatten()
    }

    /// Number of indexed nodes.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Voltage of a node in a solution vector.
    ///
    /// An unresolved terminal reads as 0 V.
    pub fn voltage(&self, x: &[f64], node: NodeId) -> f64 {
        match self.row(node) {
            Some(i) => x[i],
            None => 0.0,
        }
    }
}

/// MNA system `G x = I` (row-major, dense).
#[derive(Debug, Clone)]
pub struct MnaSystem {
    /// System matrix G
    pub g: Vec<f64>,
    /// Source vector I
    pub i: Vec<f64>,
    /// Matrix dimension
    pub size: usize,
}

impl MnaSystem {
    /// Create a zeroed system of the given dimension.
    pub fn new(size: usize) -> Self {
        Self {
            g: vec![0.0; size * size],
            i: vec![0.0; size],
            size,
        }
    }

    /// Get matrix element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.g[row * self.size + col]
    }

    /// Add to matrix element at (row, col).
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        self.g[row * self.size + col] += value;
    }

    /// Stamp a conductance between two nodes.
    /// For a conductance g between nodes n1 and n2:
    ///   G[n1,n1] += g
    ///   G[n2,n2] += g
    ///   G[n1,n2] -= g
    ///   G[n2,n1] -= g
    ///
    /// A missing terminal drops the whole stamp; a half-attached branch
    /// carries no current.
    pub fn stamp_conductance(&mut self, n1: Option<usize>, n2: Option<usize>, g: f64) {
        if let (Some(i), Some(j)) = (n1, n2) {
            self.add(i, i, g);
            self.add(j, j, g);
            self.add(i, j, -g);
            self.add(j, i, -g);
        }
    }

    /// Stamp a battery with series internal resistance at branch row `br`.
    ///
    /// The branch variable is the current entering the positive terminal from
    /// the circuit side, so the constraint row reads
    /// `V[n+] - V[n-] - I_br * R_int = E`.
    pub fn stamp_battery(
        &mut self,
        n_pos: Option<usize>,
        n_neg: Option<usize>,
        br: usize,
        voltage: f64,
        internal_resistance: f64,
    ) {
        if let Some(i) = n_pos {
            self.add(i, br, 1.0);
            self.add(br, i, 1.0);
        }
        if let Some(j) = n_neg {
            self.add(j, br, -1.0);
            self.add(br, j, -1.0);
        }
        self.add(br, br, -internal_resistance);
        self.i[br] = voltage;
    }

    /// Add a shunt conductance from a row to the implicit reference.
    pub fn add_shunt(&mut self, row: usize, g: f64) {
        self.add(row, row, g);
    }
}

/// Result of assembling one frame.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub system: MnaSystem,
    pub index: NodeIndex,
    /// Number of batteries (extra rows after the node rows)
    pub num_batteries: usize,
}

/// Assemble the MNA system for the circuit's current state.
///
/// Rows `0..N` are node voltages, rows `N..N+M` are battery branch currents
/// in component order. Node 0 is pinned near 0 V by a large conductance and
/// every diagonal gets a small leakage term so floating sub-networks stay
/// solvable.
pub fn assemble(circuit: &Circuit, config: &SolverConfig) -> Assembly {
    let index = NodeIndex::new(circuit);
    let num_nodes = index.num_nodes();
    let num_batteries = circuit
        .branches()
        .filter(|e| matches!(e.kind, ElementKind::Battery(_)))
        .count();

    let mut system = MnaSystem::new(num_nodes + num_batteries);
    let mut battery = 0;

    for element in circuit.branches() {
        let n1 = index.row(element.nodes[0]);
        let n2 = index.row(element.nodes[1]);
        if n1.is_none() || n2.is_none() {
            tracing::warn!(
                element = %element.id,
                kind = element.kind.name(),
                "skipping unresolved terminal"
            );
        }

        match &element.kind {
            ElementKind::Battery(b) => {
                let br = num_nodes + battery;
                battery += 1;
                let r_int = b.effective_internal_resistance(config.default_internal_resistance);
                system.stamp_battery(n1, n2, br, b.voltage, r_int);
            }

            // Ideal voltmeter: no current draw
            ElementKind::Voltmeter(_) => {}

            kind => {
                if let Some(r) = kind.resistance() {
                    let g = 1.0 / config.clamp_resistance(r);
                    system.stamp_conductance(n1, n2, g);
                }
            }
        }
    }

    if num_nodes > 0 {
        system.add_shunt(0, config.ground_conductance);
    }
    for row in 0..system.size {
        system.add_shunt(row, config.leakage_conductance);
    }

    Assembly {
        system,
        index,
        num_batteries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Battery, Resistor, Voltmeter};

    #[test]
    fn test_conductance_stamp_pattern() {
        let mut m = MnaSystem::new(2);
        m.stamp_conductance(Some(0), Some(1), 0.5);
        assert_eq!(m.get(0, 0), 0.5);
        assert_eq!(m.get(1, 1), 0.5);
        assert_eq!(m.get(0, 1), -0.5);
        assert_eq!(m.get(1, 0), -0.5);
    }

    #[test]
    fn test_conductance_stamp_missing_terminal() {
        let mut m = MnaSystem::new(2);
        m.stamp_conductance(None, Some(1), 2.0);
        m.stamp_conductance(Some(0), None, 2.0);
        assert!(m.g.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_assemble_battery_and_resistor() {
        let mut c = Circuit::new();
        let a = c.add_node(0.0, 0.0);
        let b = c.add_node(1.0, 0.0);
        c.add_element(ElementKind::Battery(Battery::new(9.0)), a, b).unwrap();
        c.add_element(ElementKind::Resistor(Resistor::new(9.0)), a, b).unwrap();
        c.add_element(ElementKind::Voltmeter(Voltmeter), a, b).unwrap();

        let config = SolverConfig::default();
        let asm = assemble(&c, &config);
        let m = &asm.system;
        let leak = config.leakage_conductance;

        assert_eq!(m.size, 3);
        assert_eq!(asm.num_batteries, 1);
        assert!((m.get(0, 0) - (1.0 / 9.0 + config.ground_conductance + leak)).abs() < 1e-9);
        assert!((m.get(1, 1) - (1.0 / 9.0 + leak)).abs() < 1e-12);
        assert_eq!(m.get(0, 2), 1.0);
        assert_eq!(m.get(2, 0), 1.0);
        assert_eq!(m.get(1, 2), -1.0);
        assert_eq!(m.get(2, 1), -1.0);
        assert!((m.get(2, 2) - (leak - 0.01)).abs() < 1e-15);
        assert_eq!(m.i, vec![0.0, 0.0, 9.0]);
    }

    #[test]
    fn test_resistance_floor_applied() {
        let mut c = Circuit::new();
        let a = c.add_node(0.0, 0.0);
        let b = c.add_node(1.0, 0.0);
        c.add_element(ElementKind::Resistor(Resistor::new(0.0)), a, b).unwrap();

        let config = SolverConfig::default();
        let asm = assemble(&c, &config);
        assert!((asm.system.get(0, 1) + 1.0 / config.min_resistance).abs() < 1e-6);
    }

    #[test]
    fn test_node_index_skips_tombstones() {
        let mut c = Circuit::new();
        let a = c.add_node(0.0, 0.0);
        let b = c.add_node(1.0, 0.0);
        let d = c.add_node(2.0, 0.0);
        c.remove_node(b);

        let index = NodeIndex::new(&c);
        assert_eq!(index.num_nodes(), 2);
        assert_eq!(index.row(a), Some(0));
        assert_eq!(index.row(b), None);
        assert_eq!(index.row(d), Some(1));
        assert_eq!(index.voltage(&[1.5, 2.5], b), 0.0);
        assert_eq!(index.voltage(&[1.5, 2.5], d), 2.5);
    }
}
