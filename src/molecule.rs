use super::*;
use petgraph::{algo::connected_components, graph::NodeIndex, visit::EdgeRef};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Read-only view over one naming request. Node `i` of the graph is the
/// caller's atom `i`.
#[derive(Debug, Clone)]
pub struct Molecule {
    graph: MoleculeGraph,
}

impl Molecule {
    /// Build the graph from caller-owned slices. Self-loops are dropped and
    /// duplicate pairs keep the highest bond order; an index outside the atom
    /// list refuses the whole request.
    pub fn new(atoms: &[Atom], bonds: &[BondSpec]) -> Result<Self, NamingError> {
        let mut graph = MoleculeGraph::with_capacity(atoms.len(), bonds.len());
        for atom in atoms {
            graph.add_node(atom.element.clone());
        }

        for bond in bonds {
            for index in [bond.a, bond.b] {
                if index >= atoms.len() {
                    return Err(NamingError::IndexOutOfRange {
                        index,
                        len: atoms.len(),
                    });
                }
            }
            if bond.a == bond.b {
                debug!("dropping self-loop on atom {}", bond.a);
                continue;
            }
            let (a, b) = (NodeIndex::new(bond.a), NodeIndex::new(bond.b));
            match graph.find_edge(a, b) {
                Some(edge) => {
                    if graph[edge] < bond.order {
                        trace!("upgrading bond {}-{} to {:?}", bond.a, bond.b, bond.order);
                        graph[edge] = bond.order;
                    }
                }
                None => {
                    graph.add_edge(a, b, bond.order);
                }
            }
        }

        Ok(Molecule { graph })
    }

    pub fn graph(&self) -> &MoleculeGraph {
        &self.graph
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn element(&self, index: usize) -> &Element {
        &self.graph[NodeIndex::new(index)]
    }

    pub fn elements(&self) -> impl Iterator<Item = (usize, &Element)> {
        self.graph
            .node_indices()
            .map(move |node| (node.index(), &self.graph[node]))
    }

    /// Neighbours of an atom in ascending index order.
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        let mut neighbors: Vec<usize> = self
            .graph
            .neighbors(NodeIndex::new(index))
            .map(|n| n.index())
            .collect();
        neighbors.sort_unstable();
        neighbors
    }

    /// Neighbours other than hydrogen, ascending.
    pub fn heavy_neighbors(&self, index: usize) -> Vec<usize> {
        self.neighbors(index)
            .into_iter()
            .filter(|&n| !self.element(n).is_hydrogen())
            .collect()
    }

    /// Carbon neighbours, ascending. These are the edges of the skeleton.
    pub fn skeleton_neighbors(&self, index: usize) -> Vec<usize> {
        self.neighbors(index)
            .into_iter()
            .filter(|&n| self.element(n).is_carbon())
            .collect()
    }

    pub fn bond(&self, a: usize, b: usize) -> Option<Bond> {
        self.graph
            .find_edge(NodeIndex::new(a), NodeIndex::new(b))
            .map(|edge| self.graph[edge])
    }

    pub fn bond_order_sum(&self, index: usize) -> usize {
        self.graph
            .edges(NodeIndex::new(index))
            .map(|edge| edge.weight().order() as usize)
            .sum()
    }

    /// Explicit hydrogen neighbours plus the implicit ones that fill the
    /// lowest standard valence able to hold the explicit bonds.
    pub fn hydrogen_count(&self, index: usize) -> usize {
        let element = self.element(index);
        let explicit = self
            .neighbors(index)
            .into_iter()
            .filter(|&n| self.element(n).is_hydrogen())
            .count();
        if element.is_hydrogen() {
            return explicit;
        }
        let bonds = self.bond_order_sum(index);
        let implicit = element
            .standard_valences()
            .iter()
            .map(|&valence| valence as usize)
            .find(|&valence| valence >= bonds)
            .map(|valence| valence - bonds)
            .unwrap_or(0);
        explicit + implicit
    }

    /// Refuse the first atom whose explicit bond orders exceed its capacity.
    pub fn check_valence(&self) -> Result<(), NamingError> {
        for (index, element) in self.elements() {
            let Some(valence) = element.valence_capacity() else {
                continue;
            };
            let bonds = self.bond_order_sum(index);
            if bonds > valence as usize {
                return Err(NamingError::OverValent {
                    index,
                    element: element.to_string(),
                    bonds,
                    valence,
                });
            }
        }
        Ok(())
    }

    pub fn component_count(&self) -> usize {
        connected_components(&self.graph)
    }

    pub fn is_connected(&self) -> bool {
        self.component_count() == 1
    }

    pub fn carbons(&self) -> BTreeSet<usize> {
        self.elements()
            .filter(|(_, element)| element.is_carbon())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn count(&self, element: &Element) -> usize {
        self.graph.node_weights().filter(|&e| e == element).count()
    }

    pub fn has_unknown_element(&self) -> bool {
        self.graph.node_weights().any(|e| !e.is_known())
    }
}
