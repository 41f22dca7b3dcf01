//! Carbon-skeleton analysis: ring detection, backbone selection and
//! decomposition of everything off the backbone into branches.
//!
//! Every routine here works on the skeleton, the subgraph induced by a set of
//! carbon atoms. Callers pass the set explicitly so the same code serves the
//! whole molecule and a single substituent branch.

use super::*;
use std::collections::BTreeSet;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackboneKind {
    Chain,
    Ring,
}

/// Parent structure: a simple path, or a simple cycle listed in ring order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backbone {
    pub kind: BackboneKind,
    pub atoms: Vec<usize>,
}

impl Backbone {
    pub fn chain(atoms: Vec<usize>) -> Self {
        Backbone {
            kind: BackboneKind::Chain,
            atoms,
        }
    }

    pub fn ring(atoms: Vec<usize>) -> Self {
        Backbone {
            kind: BackboneKind::Ring,
            atoms,
        }
    }

    pub fn is_ring(&self) -> bool {
        self.kind == BackboneKind::Ring
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

/// A connected group of carbons hanging off one backbone atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// 0-based position of `parent` along the backbone.
    pub position: usize,
    /// Backbone atom (or heteroatom) the branch is bonded to.
    pub parent: usize,
    /// First carbon of the branch.
    pub attach: usize,
    pub atoms: BTreeSet<usize>,
}

struct Frame {
    node: usize,
    parent: Option<usize>,
    neighbors: Vec<usize>,
    next: usize,
}

impl Frame {
    fn new(mol: &Molecule, scope: &BTreeSet<usize>, node: usize, parent: Option<usize>) -> Self {
        Frame {
            node,
            parent,
            neighbors: in_scope_neighbors(mol, scope, node),
            next: 0,
        }
    }
}

fn in_scope_neighbors(mol: &Molecule, scope: &BTreeSet<usize>, node: usize) -> Vec<usize> {
    mol.skeleton_neighbors(node)
        .into_iter()
        .filter(|n| scope.contains(n))
        .collect()
}

/// First simple cycle (length >= 3) found by a depth-first search that starts
/// at the lowest carbon and visits neighbours in ascending order. The atoms
/// come back in ring order.
pub fn find_cycle(mol: &Molecule, scope: &BTreeSet<usize>) -> Option<Vec<usize>> {
    let mut visited = BTreeSet::new();
    for &start in scope {
        if !visited.insert(start) {
            continue;
        }
        let mut frames = vec![Frame::new(mol, scope, start, None)];
        while let Some(frame) = frames.last_mut() {
            if frame.next == frame.neighbors.len() {
                frames.pop();
                continue;
            }
            let next = frame.neighbors[frame.next];
            frame.next += 1;
            let (node, parent) = (frame.node, frame.parent);
            if Some(next) == parent {
                continue;
            }
            if let Some(pos) = frames.iter().position(|f| f.node == next) {
                let cycle: Vec<usize> = frames[pos..].iter().map(|f| f.node).collect();
                if cycle.len() >= 3 {
                    trace!("found ring {:?}", cycle);
                    return Some(cycle);
                }
                continue;
            }
            if visited.insert(next) {
                frames.push(Frame::new(mol, scope, next, Some(node)));
            }
        }
    }
    None
}

/// Connected pieces of the skeleton restricted to `scope`, each as a sorted set.
pub fn components(mol: &Molecule, scope: &BTreeSet<usize>) -> Vec<BTreeSet<usize>> {
    let mut seen = BTreeSet::new();
    let mut result = Vec::new();
    for &start in scope {
        if seen.contains(&start) {
            continue;
        }
        let component = collect(mol, scope, start, &BTreeSet::new());
        seen.extend(component.iter().copied());
        result.push(component);
    }
    result
}

/// Independent cycles of the skeleton: edges - vertices + components.
pub fn cycle_rank(mol: &Molecule, scope: &BTreeSet<usize>) -> usize {
    let edges: usize = scope
        .iter()
        .map(|&c| in_scope_neighbors(mol, scope, c).len())
        .sum::<usize>()
        / 2;
    (edges + components(mol, scope).len()).saturating_sub(scope.len())
}

/// Every carbon reachable from `start` inside `scope` without entering `blocked`.
fn collect(
    mol: &Molecule,
    scope: &BTreeSet<usize>,
    start: usize,
    blocked: &BTreeSet<usize>,
) -> BTreeSet<usize> {
    let mut found = BTreeSet::new();
    let mut stack = vec![start];
    while let Some(node) = stack.pop() {
        if found.insert(node) {
            for neighbor in in_scope_neighbors(mol, scope, node) {
                if !found.contains(&neighbor) && !blocked.contains(&neighbor) {
                    stack.push(neighbor);
                }
            }
        }
    }
    found
}

/// Ranking of a candidate path. Fields compare in declaration order, higher
/// is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct PathScore {
    favored: usize,
    unsaturation: usize,
    length: usize,
}

fn score(mol: &Molecule, path: &[usize], favored: &BTreeSet<usize>, length_only: bool) -> PathScore {
    PathScore {
        favored: path.iter().filter(|a| favored.contains(a)).count(),
        unsaturation: if length_only { 0 } else { unsaturation_count(mol, path) },
        length: path.len(),
    }
}

/// Multiple C-C bonds between consecutive atoms of a path.
pub fn unsaturation_count(mol: &Molecule, path: &[usize]) -> usize {
    path.windows(2)
        .filter(|pair| {
            mol.bond(pair[0], pair[1])
                .map(Bond::is_multiple)
                .unwrap_or(false)
        })
        .count()
}

/// Constraints on a path search.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathQuery<'a> {
    /// Paths must begin here.
    pub start: Option<usize>,
    /// Paths must pass through this atom.
    pub through: Option<usize>,
    /// Atoms worth carrying; the count leads the ranking.
    pub favored: Option<&'a BTreeSet<usize>>,
    /// Rank by length alone, ignoring multiple bonds.
    pub length_only: bool,
}

struct PathSearch<'a> {
    mol: &'a Molecule,
    allowed: &'a BTreeSet<usize>,
    through: Option<usize>,
    favored: &'a BTreeSet<usize>,
    length_only: bool,
    best: Option<(PathScore, Vec<usize>)>,
}

impl PathSearch<'_> {
    fn extend(&mut self, path: &mut Vec<usize>, on_path: &mut BTreeSet<usize>) {
        self.consider(path);
        let Some(&last) = path.last() else {
            return;
        };
        for next in in_scope_neighbors(self.mol, self.allowed, last) {
            if on_path.insert(next) {
                path.push(next);
                self.extend(path, on_path);
                path.pop();
                on_path.remove(&next);
            }
        }
    }

    fn consider(&mut self, path: &[usize]) {
        if let Some(target) = self.through {
            if !path.contains(&target) {
                return;
            }
        }
        let candidate = score(self.mol, path, self.favored, self.length_only);
        let better = match &self.best {
            None => true,
            Some((best_score, best_path)) => {
                candidate > *best_score || (candidate == *best_score && path < best_path.as_slice())
            }
        };
        if better {
            self.best = Some((candidate, path.to_vec()));
        }
    }
}

/// Best simple path over `allowed` carbons by backtracking enumeration.
/// Ranked by favored atoms, then multiple bonds, then length; ties go to the
/// lexicographically smallest index sequence.
pub fn best_path(mol: &Molecule, allowed: &BTreeSet<usize>, query: PathQuery) -> Option<Vec<usize>> {
    let empty = BTreeSet::new();
    let mut search = PathSearch {
        mol,
        allowed,
        through: query.through,
        favored: query.favored.unwrap_or(&empty),
        length_only: query.length_only,
        best: None,
    };
    let starts: Vec<usize> = match query.start {
        Some(start) if allowed.contains(&start) => vec![start],
        Some(_) => vec![],
        None => allowed.iter().copied().collect(),
    };
    for start in starts {
        let mut path = vec![start];
        let mut on_path = BTreeSet::from([start]);
        search.extend(&mut path, &mut on_path);
    }
    search.best.map(|(_, path)| path)
}

/// Rings of the skeleton restricted to `scope`, found one at a time with
/// [`find_cycle`]. Separate rings joined through bonds or chains are fine;
/// rings that share atoms (fused, bridged, spiro) are refused.
pub fn find_rings(mol: &Molecule, scope: &BTreeSet<usize>) -> Result<Vec<Vec<usize>>, NamingError> {
    let mut remaining = scope.clone();
    let mut rings = Vec::new();
    while let Some(ring) = find_cycle(mol, &remaining) {
        for atom in &ring {
            remaining.remove(atom);
        }
        rings.push(ring);
    }
    let rank = cycle_rank(mol, scope);
    if rank != rings.len() {
        return Err(NamingError::Polycyclic(rank));
    }
    Ok(rings)
}

/// Choose the parent structure of the skeleton restricted to `scope`.
///
/// With a `target` (the carbon of the principal group) the backbone must
/// contain it: the ring it sits on, otherwise the best chain through the
/// target over carbons off every ring. Without one, the largest ring is the
/// parent unless the longest chain off the rings is strictly longer; only
/// then is the chain picked by the usual ranking, inside the branch holding
/// that longest path.
pub fn select_backbone(
    mol: &Molecule,
    scope: &BTreeSet<usize>,
    target: Option<usize>,
    favored: &BTreeSet<usize>,
) -> Result<Backbone, NamingError> {
    if scope.is_empty() {
        return Err(NamingError::NoBackbone);
    }
    let rings = find_rings(mol, scope)?;

    let query = PathQuery {
        start: None,
        through: target,
        favored: Some(favored),
        length_only: false,
    };

    if rings.is_empty() {
        let path = best_path(mol, scope, query).ok_or(NamingError::NoBackbone)?;
        debug!("chain backbone {:?}", path);
        return Ok(Backbone::chain(path));
    }

    let off_ring: BTreeSet<usize> = scope
        .iter()
        .copied()
        .filter(|c| !rings.iter().any(|r| r.contains(c)))
        .collect();

    if let Some(t) = target {
        if let Some(ring) = rings.iter().find(|r| r.contains(&t)) {
            debug!("ring backbone {:?} holds the principal carbon", ring);
            return Ok(Backbone::ring(ring.clone()));
        }
        let path = best_path(mol, &off_ring, query).ok_or(NamingError::NoBackbone)?;
        debug!("chain backbone {:?} holds the principal carbon", path);
        return Ok(Backbone::chain(path));
    }

    // First of the largest rings.
    let mut ring = &rings[0];
    for candidate in &rings[1..] {
        if candidate.len() > ring.len() {
            ring = candidate;
        }
    }

    let longest = PathQuery {
        length_only: true,
        ..PathQuery::default()
    };
    match best_path(mol, &off_ring, longest) {
        Some(path) if path.len() > ring.len() => {
            let branch = components(mol, &off_ring)
                .into_iter()
                .find(|c| c.contains(&path[0]))
                .ok_or(NamingError::NoBackbone)?;
            let chain = best_path(mol, &branch, query).ok_or(NamingError::NoBackbone)?;
            debug!("chain {:?} is longer than ring {:?}", chain, ring);
            Ok(Backbone::chain(chain))
        }
        _ => {
            debug!("ring backbone {:?}", ring);
            Ok(Backbone::ring(ring.clone()))
        }
    }
}

/// Split the carbons of `scope` outside the backbone into branches, one per
/// carbon neighbour of a backbone atom. Branches never re-enter the backbone.
pub fn branches(mol: &Molecule, backbone: &[usize], scope: &BTreeSet<usize>) -> Vec<Branch> {
    let on_backbone: BTreeSet<usize> = backbone.iter().copied().collect();
    let mut claimed = BTreeSet::new();
    let mut result = Vec::new();
    for (position, &atom) in backbone.iter().enumerate() {
        for neighbor in in_scope_neighbors(mol, scope, atom) {
            if on_backbone.contains(&neighbor) || claimed.contains(&neighbor) {
                continue;
            }
            let atoms = collect(mol, scope, neighbor, &on_backbone);
            claimed.extend(atoms.iter().copied());
            result.push(Branch {
                position,
                parent: atom,
                attach: neighbor,
                atoms,
            });
        }
    }
    result
}
