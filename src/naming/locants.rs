use super::roots::{join_locants, multiplier, Unsaturation};
use crate::{structure::Backbone, Molecule, NamingError};
use std::collections::BTreeMap;
use tracing::trace;

/// A prefix cited on a backbone atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub atom: usize,
    pub name: String,
}

impl Citation {
    pub fn new(atom: usize, name: impl Into<String>) -> Self {
        Citation {
            atom,
            name: name.into(),
        }
    }
}

/// Prefix name reduced to letters for alphabetical ordering:
/// `(2-metilpropil)` sorts as `metilpropil`.
pub fn alpha_key(name: &str) -> String {
    name.chars().filter(|c| c.is_alphabetic()).collect()
}

/// One way of numbering a backbone. Locants are 1-based.
#[derive(Debug, Clone)]
pub struct Numbering {
    pub order: Vec<usize>,
    pub unsaturation: Unsaturation,
}

impl Numbering {
    fn new(mol: &Molecule, order: Vec<usize>, ring: bool) -> Self {
        let mut unsaturation = Unsaturation::default();
        let n = order.len();
        let mut bonds: Vec<(usize, usize, usize)> = order.windows(2).enumerate().map(|(i, w)| (i + 1, w[0], w[1])).collect();
        if ring && n >= 3 {
            bonds.push((n, order[n - 1], order[0]));
        }
        for (locant, a, b) in bonds {
            match mol.bond(a, b) {
                Some(crate::Bond::Double) => unsaturation.doubles.push(locant),
                Some(crate::Bond::Triple) => unsaturation.triples.push(locant),
                _ => {}
            }
        }
        Numbering { order, unsaturation }
    }

    pub fn locant(&self, atom: usize) -> Option<usize> {
        self.order.iter().position(|&a| a == atom).map(|i| i + 1)
    }

    fn locants(&self, atoms: &[usize]) -> Vec<usize> {
        let mut locants: Vec<usize> = atoms.iter().filter_map(|&a| self.locant(a)).collect();
        locants.sort_unstable();
        locants
    }

    /// Comparison key; lower wins, first difference decides.
    fn key(&self, principal: &[usize], citations: &[Citation]) -> NumberingKey {
        let prefix_atoms: Vec<usize> = citations.iter().map(|c| c.atom).collect();
        let mut cited: Vec<(String, usize)> = citations
            .iter()
            .filter_map(|c| self.locant(c.atom).map(|l| (alpha_key(&c.name), l)))
            .collect();
        cited.sort();
        NumberingKey {
            principal: self.locants(principal),
            multiple_bonds: self.unsaturation.all(),
            double_bonds: self.unsaturation.doubles.clone(),
            prefixes: self.locants(&prefix_atoms),
            alphabetical: cited.into_iter().map(|(_, l)| l).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct NumberingKey {
    principal: Vec<usize>,
    multiple_bonds: Vec<usize>,
    double_bonds: Vec<usize>,
    prefixes: Vec<usize>,
    alphabetical: Vec<usize>,
}

/// Candidate atom orders. A chain reads either way; a ring may start at any
/// atom in either direction. With `fixed_start` the first atom stays first.
fn orientations(backbone: &Backbone, fixed_start: bool) -> Vec<Vec<usize>> {
    let atoms = &backbone.atoms;
    let n = atoms.len();
    let mut result = Vec::new();
    if !backbone.is_ring() {
        result.push(atoms.clone());
        if !fixed_start && n > 1 {
            result.push(atoms.iter().rev().copied().collect());
        }
        return result;
    }
    let starts = if fixed_start { 1 } else { n };
    for start in 0..starts {
        result.push((0..n).map(|k| atoms[(start + k) % n]).collect());
        result.push((0..n).map(|k| atoms[(start + n - k) % n]).collect());
    }
    result
}

/// Lowest-locant numbering: principal group, then multiple bonds (double
/// bonds first on a tie), then every prefix, then prefixes in alphabetical
/// order. The first candidate wins a full tie.
pub fn choose_numbering(
    mol: &Molecule,
    backbone: &Backbone,
    principal: &[usize],
    citations: &[Citation],
    fixed_start: bool,
) -> Numbering {
    let candidates: Vec<Numbering> = orientations(backbone, fixed_start)
        .into_iter()
        .map(|order| Numbering::new(mol, order, backbone.is_ring()))
        .collect();
    let best = candidates
        .iter()
        .enumerate()
        .min_by_key(|(i, numbering)| (numbering.key(principal, citations), *i))
        .map(|(i, _)| i)
        .unwrap_or(0);
    let numbering = candidates
        .into_iter()
        .nth(best)
        .unwrap_or_else(|| Numbering::new(mol, backbone.atoms.clone(), backbone.is_ring()));
    trace!("numbering {:?}", numbering.order);
    numbering
}

/// Render cited prefixes: identical names merge under a multiplier, groups
/// sort alphabetically ignoring multipliers and locants, and join with `-`.
/// `3-etil-2-metil`, `2,3-dimetil`, `tricloro`.
pub fn format_prefixes(numbering: &Numbering, citations: &[Citation], show_locants: bool) -> Result<String, NamingError> {
    let mut grouped: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for citation in citations {
        if let Some(locant) = numbering.locant(citation.atom) {
            grouped.entry(citation.name.as_str()).or_default().push(locant);
        }
    }
    let mut parts: Vec<(String, String)> = Vec::new();
    for (name, mut locants) in grouped {
        locants.sort_unstable();
        let mult = multiplier(locants.len())?;
        let part = if show_locants {
            format!("{}-{}{}", join_locants(&locants), mult, name)
        } else {
            format!("{mult}{name}")
        };
        parts.push((alpha_key(name), part));
    }
    parts.sort();
    Ok(parts.into_iter().map(|(_, part)| part).collect::<Vec<_>>().join("-"))
}

/// Prepend a prefix string to a root, with a hyphen when the root opens
/// with a locant.
pub fn prepend(prefixes: &str, root: &str) -> String {
    if !prefixes.is_empty() && root.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{prefixes}-{root}")
    } else {
        format!("{prefixes}{root}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Atom, BondSpec, Element};

    fn chain(n: usize) -> Molecule {
        let atoms = vec![Atom::new(Element::C); n];
        let bonds: Vec<BondSpec> = (1..n).map(|i| BondSpec::single(i - 1, i)).collect();
        Molecule::new(&atoms, &bonds).unwrap()
    }

    #[test]
    fn test_chain_prefers_low_prefix_locants() {
        let mol = chain(6);
        let backbone = Backbone::chain(vec![0, 1, 2, 3, 4, 5]);
        let citations = [Citation::new(4, "metil")];
        let numbering = choose_numbering(&mol, &backbone, &[], &citations, false);
        assert_eq!(numbering.order, vec![5, 4, 3, 2, 1, 0]);
        assert_eq!(numbering.locant(4), Some(2));
    }

    #[test]
    fn test_alphabetical_tiebreak() {
        // Ethyl and methyl on positions 3 and 4 of a hexane: ethyl gets 3.
        let mol = chain(6);
        let backbone = Backbone::chain(vec![0, 1, 2, 3, 4, 5]);
        let citations = [Citation::new(3, "etil"), Citation::new(2, "metil")];
        let numbering = choose_numbering(&mol, &backbone, &[], &citations, false);
        assert_eq!(numbering.locant(3), Some(3));
        assert_eq!(format_prefixes(&numbering, &citations, true).unwrap(), "3-etil-4-metil");
    }

    #[test]
    fn test_ring_orientation_starts_at_substituent() {
        let atoms = vec![Atom::new(Element::C); 5];
        let bonds: Vec<BondSpec> = (0..5).map(|i| BondSpec::single(i, (i + 1) % 5)).collect();
        let mol = Molecule::new(&atoms, &bonds).unwrap();
        let backbone = Backbone::ring(vec![0, 1, 2, 3, 4]);
        let citations = [Citation::new(2, "metil"), Citation::new(3, "metil")];
        let numbering = choose_numbering(&mol, &backbone, &[], &citations, false);
        assert_eq!(numbering.order[..2], [2, 3]);
        assert_eq!(format_prefixes(&numbering, &citations, true).unwrap(), "1,2-dimetil");
    }

    #[test]
    fn test_grouped_prefixes() {
        let mol = chain(5);
        let numbering = choose_numbering(&mol, &Backbone::chain(vec![0, 1, 2, 3, 4]), &[], &[], false);
        let citations = [
            Citation::new(1, "metil"),
            Citation::new(1, "cloro"),
            Citation::new(2, "metil"),
            Citation::new(3, "(2-metilpropil)"),
        ];
        assert_eq!(
            format_prefixes(&numbering, &citations, true).unwrap(),
            "2-cloro-2,3-dimetil-4-(2-metilpropil)"
        );
    }

    #[test]
    fn test_alpha_key_ignores_locants() {
        assert_eq!(alpha_key("(2-metilpropil)"), "metilpropil");
        assert_eq!(prepend("2-metil", "1-propanosulfónico"), "2-metil-1-propanosulfónico");
        assert_eq!(prepend("metil", "butano"), "metilbutano");
    }
}
