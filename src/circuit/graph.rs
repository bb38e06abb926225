//! Circuit graph structure.

use super::types::{ElementId, Node, NodeId};
use crate::components::{Element, ElementKind, Wire};
use crate::error::{CircuitError, Result};

/// A circuit being edited and solved.
///
/// Nodes live in an arena addressed by [`NodeId`]. Removing a node leaves a
/// tombstone, so handles stay stable and a stale handle simply fails to
/// resolve. Elements and wires are kept in separate ordered collections, the
/// way the editor draws them.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    /// Node arena; `None` marks a removed node
    nodes: Vec<Option<Node>>,

    /// Components in insertion order
    elements: Vec<Element>,

    /// Wires in insertion order
    wires: Vec<Element>,

    /// Next element handle (shared by elements and wires)
    next_element: usize,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node at the given canvas position.
    pub fn add_node(&mut self, x: f64, y: f64) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node::new(id, x, y)));
        id
    }

    /// Add an element between two existing nodes.
    ///
    /// Wire kinds are stored with the wires. Fails if either handle does not
    /// resolve or if both terminals are the same node.
    pub fn add_element(&mut self, kind: ElementKind, n1: NodeId, n2: NodeId) -> Result<ElementId> {
        self.check_terminals(n1, n2)?;

        let id = ElementId(self.next_element);
        self.next_element += 1;

        let element = Element::new(id, [n1, n2], kind);
        if matches!(element.kind, ElementKind::Wire(_)) {
            self.wires.push(element);
        } else {
            self.elements.push(element);
        }
        Ok(id)
    }

    /// Add a wire with the default resistivity.
    pub fn add_wire(&mut self, n1: NodeId, n2: NodeId) -> Result<ElementId> {
        self.add_element(ElementKind::Wire(Wire::default()), n1, n2)
    }

    /// Add a wire with a custom resistivity.
    pub fn add_wire_with_resistivity(
        &mut self,
        n1: NodeId,
        n2: NodeId,
        resistivity: f64,
    ) -> Result<ElementId> {
        self.add_element(ElementKind::Wire(Wire::new(resistivity)), n1, n2)
    }

    fn check_terminals(&self, n1: NodeId, n2: NodeId) -> Result<()> {
        for node in [n1, n2] {
            if !self.contains_node(node) {
                return Err(CircuitError::NodeNotFound { node });
            }
        }
        if n1 == n2 {
            return Err(CircuitError::SelfLoop { node: n1 });
        }
        Ok(())
    }

    /// Remove an element or wire, then prune nodes nothing references.
    pub fn remove_element(&mut self, id: ElementId) -> Result<Element> {
        let removed = if let Some(pos) = self.elements.iter().position(|e| e.id == id) {
            self.elements.remove(pos)
        } else if let Some(pos) = self.wires.iter().position(|w| w.id == id) {
            self.wires.remove(pos)
        } else {
            return Err(CircuitError::ElementNotFound { element: id });
        };

        self.cleanup_nodes();
        Ok(removed)
    }

    /// Drop every node that no element or wire references.
    pub fn cleanup_nodes(&mut self) {
        let mut used = vec![false; self.nodes.len()];
        for branch in self.branches() {
            for node in branch.nodes {
                if let Some(flag) = used.get_mut(node.0) {
                    *flag = true;
                }
            }
        }

        for (slot, used) in self.nodes.iter_mut().zip(used) {
            if !used {
                *slot = None;
            }
        }
    }

    /// Forcibly remove a node.
    ///
    /// Elements still attached keep the stale handle; the solver skips the
    /// contribution of such a terminal.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        self.nodes.get_mut(id.0).and_then(Option::take)
    }

    /// Move every terminal on `remove` onto `keep`, then drop `remove`.
    ///
    /// Elements that end up with both terminals on `keep` are removed.
    pub fn merge_nodes(&mut self, keep: NodeId, remove: NodeId) -> Result<()> {
        if keep == remove {
            return Err(CircuitError::SelfLoop { node: keep });
        }
        for node in [keep, remove] {
            if !self.contains_node(node) {
                return Err(CircuitError::NodeNotFound { node });
            }
        }

        for branch in self.elements.iter_mut().chain(self.wires.iter_mut()) {
            for terminal in branch.nodes.iter_mut() {
                if *terminal == remove {
                    *terminal = keep;
                }
            }
        }
        self.elements.retain(|e| e.nodes[0] != e.nodes[1]);
        self.wires.retain(|w| w.nodes[0] != w.nodes[1]);

        self.remove_node(remove);
        Ok(())
    }

    /// Flip a switch, returning its new state (`true` = closed).
    pub fn toggle_switch(&mut self, id: ElementId) -> Result<bool> {
        let element = self
            .element_mut(id)
            .ok_or(CircuitError::ElementNotFound { element: id })?;

        match element.kind {
            ElementKind::Switch(ref mut s) => {
                s.toggle();
                Ok(s.closed)
            }
            _ => Err(CircuitError::invalid_parameter(
                id,
                "closed",
                "element is not a switch",
            )),
        }
    }

    /// Remove all nodes, elements and wires.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.elements.clear();
        self.wires.clear();
    }

    /// Check whether a node handle resolves.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    /// Look up a node mutably.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Live nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().flatten()
    }

    /// Live nodes in insertion order, mutably.
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut().flatten()
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Size of the node arena, including tombstones.
    pub(crate) fn node_capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Find the node nearest to a canvas point, within `threshold`.
    pub fn find_node_at(&self, x: f64, y: f64, threshold: f64) -> Option<NodeId> {
        let limit = threshold * threshold;
        self.nodes()
            .filter(|n| n.distance_sq(x, y) < limit)
            .min_by(|a, b| a.distance_sq(x, y).total_cmp(&b.distance_sq(x, y)))
            .map(|n| n.id)
    }

    /// Look up an element or wire.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.branches().find(|e| e.id == id)
    }

    /// Look up an element or wire mutably.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.branches_mut().find(|e| e.id == id)
    }

    /// Components (everything except wires) in insertion order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Wires in insertion order.
    pub fn wires(&self) -> &[Element] {
        &self.wires
    }

    /// Every two-terminal branch: components first, then wires.
    pub fn branches(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().chain(self.wires.iter())
    }

    /// Every two-terminal branch, mutably, in the same order as [`Self::branches`].
    pub fn branches_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements.iter_mut().chain(self.wires.iter_mut())
    }

    /// Check whether the circuit has no live nodes.
    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Battery, Resistor, Switch};

    fn two_nodes(c: &mut Circuit) -> (NodeId, NodeId) {
        (c.add_node(0.0, 0.0), c.add_node(100.0, 0.0))
    }

    #[test]
    fn test_add_element_rejects_self_loop() {
        let mut c = Circuit::new();
        let (a, _) = two_nodes(&mut c);
        let err = c
            .add_element(ElementKind::Resistor(Resistor::new(10.0)), a, a)
            .unwrap_err();
        assert_eq!(err, CircuitError::SelfLoop { node: a });
    }

    #[test]
    fn test_add_element_rejects_unknown_node() {
        let mut c = Circuit::new();
        let (a, _) = two_nodes(&mut c);
        let err = c.add_wire(a, NodeId(42)).unwrap_err();
        assert_eq!(err, CircuitError::NodeNotFound { node: NodeId(42) });
    }

    #[test]
    fn test_wires_are_kept_separately() {
        let mut c = Circuit::new();
        let (a, b) = two_nodes(&mut c);
        c.add_element(ElementKind::Battery(Battery::new(9.0)), a, b).unwrap();
        let w = c.add_wire(a, b).unwrap();

        assert_eq!(c.elements().len(), 1);
        assert_eq!(c.wires().len(), 1);
        assert_eq!(c.branches().count(), 2);
        assert!(matches!(c.element(w).unwrap().kind, ElementKind::Wire(_)));
    }

    #[test]
    fn test_remove_element_prunes_unused_nodes() {
        let mut c = Circuit::new();
        let (a, b) = two_nodes(&mut c);
        let d = c.add_node(200.0, 0.0);
        c.add_element(ElementKind::Resistor(Resistor::new(10.0)), a, b).unwrap();
        let w = c.add_wire(b, d).unwrap();

        c.remove_element(w).unwrap();
        assert!(c.contains_node(a));
        assert!(c.contains_node(b));
        assert!(!c.contains_node(d));
        assert_eq!(c.node_count(), 2);

        assert_eq!(
            c.remove_element(w).unwrap_err(),
            CircuitError::ElementNotFound { element: w }
        );
    }

    #[test]
    fn test_handles_are_stable_after_removal() {
        let mut c = Circuit::new();
        let (a, b) = two_nodes(&mut c);
        c.remove_node(a);
        let d = c.add_node(5.0, 5.0);
        assert_ne!(d, a);
        assert!(c.node(a).is_none());
        assert_eq!(c.node(b).unwrap().id, b);
    }

    #[test]
    fn test_merge_nodes_rewires_and_drops_self_loops() {
        let mut c = Circuit::new();
        let (a, b) = two_nodes(&mut c);
        let d = c.add_node(200.0, 0.0);
        let r = c.add_element(ElementKind::Resistor(Resistor::new(10.0)), a, d).unwrap();
        c.add_wire(b, d).unwrap();

        c.merge_nodes(b, d).unwrap();
        assert!(!c.contains_node(d));
        assert_eq!(c.element(r).unwrap().nodes, [a, b]);
        // The wire b-d collapsed onto b and was removed
        assert!(c.wires().is_empty());
    }

    #[test]
    fn test_toggle_switch() {
        let mut c = Circuit::new();
        let (a, b) = two_nodes(&mut c);
        let s = c.add_element(ElementKind::Switch(Switch::new(true)), a, b).unwrap();
        let r = c.add_element(ElementKind::Resistor(Resistor::new(1.0)), a, b).unwrap();

        assert!(!c.toggle_switch(s).unwrap());
        assert!(c.toggle_switch(s).unwrap());
        assert!(c.toggle_switch(r).is_err());
    }

    #[test]
    fn test_find_node_at() {
        let mut c = Circuit::new();
        let (a, b) = two_nodes(&mut c);
        assert_eq!(c.find_node_at(3.0, 4.0, 10.0), Some(a));
        assert_eq!(c.find_node_at(97.0, 0.0, 10.0), Some(b));
        assert_eq!(c.find_node_at(50.0, 0.0, 10.0), None);
    }
}
