//! Names that bypass skeleton analysis: water, the oxo-acids and oxo-anions
//! of a single N, S or C centre, and carbon-free molecules.

use crate::{Element, Molecule};
use std::collections::BTreeMap;

/// Two hydrogens and one oxygen, however they are bonded.
pub fn is_water(mol: &Molecule) -> bool {
    mol.len() == 3 && mol.count(&Element::H) == 2 && mol.count(&Element::O) == 1
}

/// A lone N, S or C centre surrounded only by terminal oxygens, with any
/// hydrogens sitting on those oxygens. Hydrogens are counted as drawn.
pub fn oxo_centre(mol: &Molecule) -> Option<&'static str> {
    let mut centre = None;
    for (index, element) in mol.elements() {
        if element.is_hydrogen() || *element == Element::O {
            continue;
        }
        if centre.replace(index).is_some() {
            return None;
        }
    }
    let centre = centre?;
    let element = mol.element(centre);

    let mut oxygens = 0;
    let mut hydrogens = 0;
    for neighbor in mol.neighbors(centre) {
        if *mol.element(neighbor) != Element::O || mol.heavy_neighbors(neighbor) != [centre] {
            return None;
        }
        oxygens += 1;
        hydrogens += mol
            .neighbors(neighbor)
            .into_iter()
            .filter(|&h| mol.element(h).is_hydrogen())
            .count();
    }
    // Every atom must be the centre, one of its oxygens, or a hydrogen on one.
    if mol.len() != 1 + oxygens + hydrogens {
        return None;
    }

    let name = match (element, oxygens, hydrogens) {
        (Element::N, 3, 0) => "ion nitrato",
        (Element::N, 3, 1) => "ácido nítrico",
        (Element::N, 2, 0) => "ion nitrito",
        (Element::N, 2, 1) => "ácido nitroso",
        (Element::S, 4, 0) => "ion sulfato",
        (Element::S, 4, 1) => "ion hidrogenosulfato",
        (Element::S, 4, 2) => "ácido sulfúrico",
        (Element::S, 3, 0) => "ion sulfito",
        (Element::S, 3, 1) => "ion hidrogenosulfito",
        (Element::S, 3, 2) => "ácido sulfuroso",
        (Element::C, 3, 0) => "ion carbonato",
        (Element::C, 3, 1) => "ion hidrogenocarbonato",
        (Element::C, 3, 2) => "ácido carbónico",
        _ => return None,
    };
    Some(name)
}

/// Molecular formula with implicit hydrogens: C, H, O, N, S, the halogens,
/// then unknown symbols alphabetically. A count of one is left out.
pub fn formula(mol: &Molecule) -> String {
    let mut counts: BTreeMap<(usize, String), usize> = BTreeMap::new();
    let mut implicit_h = 0;
    for (index, element) in mol.elements() {
        *counts.entry((element.formula_rank(), element.to_string())).or_default() += 1;
        if !element.is_hydrogen() {
            let explicit = mol
                .neighbors(index)
                .into_iter()
                .filter(|&n| mol.element(n).is_hydrogen())
                .count();
            implicit_h += mol.hydrogen_count(index) - explicit;
        }
    }
    if implicit_h > 0 {
        *counts.entry((Element::H.formula_rank(), "H".to_string())).or_default() += implicit_h;
    }
    counts
        .into_iter()
        .map(|((_, symbol), count)| match count {
            1 => symbol,
            n => format!("{symbol}{n}"),
        })
        .collect()
}

/// Carbon-free molecule: the element name of a lone atom, otherwise the formula.
pub fn inorganic(mol: &Molecule) -> String {
    if mol.len() == 1 {
        if let Some(name) = mol.element(0).spanish_name() {
            return name.to_string();
        }
    }
    formula(mol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Atom, BondSpec};

    fn molecule(symbols: &[&str], bonds: &[BondSpec]) -> Molecule {
        let atoms: Vec<Atom> = symbols.iter().map(|&s| Atom::new(Element::from(s))).collect();
        Molecule::new(&atoms, bonds).unwrap()
    }

    #[test]
    fn test_water_ignores_bonds() {
        assert!(is_water(&molecule(&["H", "O", "H"], &[])));
        assert!(is_water(&molecule(&["O", "H", "H"], &[BondSpec::single(0, 1), BondSpec::single(0, 2)])));
        assert!(!is_water(&molecule(&["O", "H"], &[BondSpec::single(0, 1)])));
    }

    #[test]
    fn test_oxo_anions() {
        let nitrate = molecule(
            &["N", "O", "O", "O"],
            &[BondSpec::single(0, 1), BondSpec::single(0, 2), BondSpec::single(0, 3)],
        );
        assert_eq!(oxo_centre(&nitrate), Some("ion nitrato"));

        let bicarbonate = molecule(
            &["C", "O", "O", "O", "H"],
            &[
                BondSpec::double(0, 1),
                BondSpec::single(0, 2),
                BondSpec::single(0, 3),
                BondSpec::single(3, 4),
            ],
        );
        assert_eq!(oxo_centre(&bicarbonate), Some("ion hidrogenocarbonato"));

        let sulfuric = molecule(
            &["S", "O", "O", "O", "O", "H", "H"],
            &[
                BondSpec::double(0, 1),
                BondSpec::double(0, 2),
                BondSpec::single(0, 3),
                BondSpec::single(0, 4),
                BondSpec::single(3, 5),
                BondSpec::single(4, 6),
            ],
        );
        assert_eq!(oxo_centre(&sulfuric), Some("ácido sulfúrico"));
    }

    #[test]
    fn test_oxo_centre_rejects_carbon_neighbours() {
        let mol = molecule(
            &["C", "O", "O", "C"],
            &[BondSpec::double(0, 1), BondSpec::single(0, 2), BondSpec::single(0, 3)],
        );
        assert_eq!(oxo_centre(&mol), None);
    }

    #[test]
    fn test_formula() {
        let peroxide = molecule(&["O", "O"], &[BondSpec::single(0, 1)]);
        assert_eq!(formula(&peroxide), "H2O2");
        let ammonia = molecule(&["N", "H"], &[BondSpec::single(0, 1)]);
        assert_eq!(formula(&ammonia), "H3N");
        let xenon_fluoride = molecule(&["Xe", "F", "F"], &[BondSpec::single(0, 1), BondSpec::single(0, 2)]);
        assert_eq!(formula(&xenon_fluoride), "F2Xe");
        assert_eq!(inorganic(&molecule(&["S"], &[])), "azufre");
    }
}
