use super::{cite, locants, roots, Context, Named};
use crate::{
    structure::{self, Backbone, Branch, PathQuery},
    Bond, GroupKind, NamingError,
};
use std::collections::BTreeSet;
use tracing::trace;

/// Name a carbon branch as a prefix. The branch is numbered from its
/// attachment carbon; its own groups and sub-branches become nested prefixes.
pub(crate) fn name(ctx: &Context, branch: &Branch) -> Result<Named, NamingError> {
    let mol = ctx.mol;
    let attach = branch.attach;
    let parent_bond = mol.bond(branch.parent, attach).unwrap_or(Bond::Single);

    if branch.atoms.len() == 1 && parent_bond == Bond::Single {
        if ctx.anchors(attach, GroupKind::Carboxyl) {
            return Ok(Named::new("carboxi", 1));
        }
        if ctx.anchors(attach, GroupKind::Formyl) {
            return Ok(Named::new("formil", 1));
        }
    }

    // Acid carbons further out are cited as carboxi rather than chain atoms.
    let allowed: BTreeSet<usize> = branch
        .atoms
        .iter()
        .copied()
        .filter(|&c| c == attach || !ctx.anchors(c, GroupKind::Carboxyl))
        .collect();

    let rings = structure::find_rings(mol, &allowed)?;
    let backbone = match rings.iter().find(|r| r.contains(&attach)) {
        Some(ring) => {
            let mut ring = ring.clone();
            if let Some(pos) = ring.iter().position(|&a| a == attach) {
                ring.rotate_left(pos);
            }
            Backbone::ring(ring)
        }
        None => {
            let off_ring: BTreeSet<usize> = allowed
                .iter()
                .copied()
                .filter(|a| !rings.iter().any(|r| r.contains(a)))
                .collect();
            let query = PathQuery {
                start: Some(attach),
                ..PathQuery::default()
            };
            Backbone::chain(structure::best_path(mol, &off_ring, query).ok_or(NamingError::NoBackbone)?)
        }
    };
    if backbone.len() > ctx.config.max_backbone {
        return Err(NamingError::BackboneTooLong(backbone.len()));
    }

    let (_, citations) = cite(ctx, &backbone, &branch.atoms, None)?;
    let numbering = locants::choose_numbering(mol, &backbone, &[], &citations, true);

    let ending = match parent_bond {
        Bond::Single => "il",
        Bond::Double => "ilideno",
        Bond::Triple => "ilidino",
    };
    let core = roots::substituent_core(
        backbone.len(),
        backbone.is_ring(),
        &numbering.unsaturation,
        backbone.len() != 2,
        ending,
    )?;
    let prefixes = locants::format_prefixes(&numbering, &citations, backbone.len() > 1)?;
    let mut name = locants::prepend(&prefixes, &core);
    if !prefixes.is_empty() || name.chars().any(|c| c.is_ascii_digit()) {
        name = format!("({name})");
    }
    trace!("branch at {} is {}", attach, name);
    Ok(Named::new(name, backbone.len()))
}

#[cfg(test)]
mod tests {
    use crate::{name, Atom, BondSpec, Element};

    fn atoms(symbols: &[&str]) -> Vec<Atom> {
        symbols.iter().map(|&s| Atom::new(Element::from(s))).collect()
    }

    fn chain_bonds(n: usize) -> Vec<BondSpec> {
        (1..n).map(|i| BondSpec::single(i - 1, i)).collect()
    }

    #[test]
    fn test_isobutyl_is_parenthesised() {
        // Nonane 0..=8 with C9-C10(-C11)-C12 on C3.
        let mut bonds = chain_bonds(9);
        bonds.extend([
            BondSpec::single(3, 9),
            BondSpec::single(9, 10),
            BondSpec::single(10, 11),
            BondSpec::single(10, 12),
        ]);
        assert_eq!(name(&atoms(&["C"; 13]), &bonds).as_deref(), Some("4-(2-metilpropil)nonano"));
    }

    #[test]
    fn test_double_bond_pulls_backbone_into_branch() {
        // Heptane 0..=6 with C7-C8=C9 on C3.
        let mut bonds = chain_bonds(7);
        bonds.extend([BondSpec::single(3, 7), BondSpec::single(7, 8), BondSpec::double(8, 9)]);
        assert_eq!(name(&atoms(&["C"; 10]), &bonds).as_deref(), Some("4-propilhept-1-eno"));
    }

    #[test]
    fn test_allyl_on_ring() {
        let mut bonds: Vec<BondSpec> = (0..6).map(|i| BondSpec::single(i, (i + 1) % 6)).collect();
        bonds.extend([BondSpec::single(0, 6), BondSpec::single(6, 7), BondSpec::double(7, 8)]);
        assert_eq!(name(&atoms(&["C"; 9]), &bonds).as_deref(), Some("(prop-2-enil)ciclohexano"));
    }

    #[test]
    fn test_cyclopropyl_on_longer_chain() {
        let mut bonds = chain_bonds(7);
        bonds.extend([
            BondSpec::single(7, 8),
            BondSpec::single(8, 9),
            BondSpec::single(9, 7),
            BondSpec::single(3, 7),
        ]);
        assert_eq!(name(&atoms(&["C"; 10]), &bonds).as_deref(), Some("4-ciclopropilheptano"));
    }

    #[test]
    fn test_principal_group_off_ring() {
        let mut bonds: Vec<BondSpec> = (0..6).map(|i| BondSpec::single(i, (i + 1) % 6)).collect();
        bonds.extend([BondSpec::single(0, 6), BondSpec::single(6, 7)]);
        let symbols = ["C", "C", "C", "C", "C", "C", "C", "O"];
        assert_eq!(name(&atoms(&symbols), &bonds).as_deref(), Some("ciclohexilmetanol"));
    }

    #[test]
    fn test_hydroxymethyl_branch() {
        // CH3-CH(CH2OH)-COOH
        let symbols = ["C", "O", "O", "C", "C", "C", "O"];
        let bonds = [
            BondSpec::double(0, 1),
            BondSpec::single(0, 2),
            BondSpec::single(0, 3),
            BondSpec::single(3, 4),
            BondSpec::single(3, 5),
            BondSpec::single(5, 6),
        ];
        assert_eq!(
            name(&atoms(&symbols), &bonds).as_deref(),
            Some("ácido 2-(hidroximetil)propanoico")
        );
    }

    #[test]
    fn test_hydroxyl_chain_through_branch() {
        // Pentane with CH2OH on C2: the alcohol carbon joins the backbone.
        let mut bonds = chain_bonds(5);
        bonds.extend([BondSpec::single(2, 5), BondSpec::single(5, 6)]);
        let symbols = ["C", "C", "C", "C", "C", "C", "O"];
        assert_eq!(name(&atoms(&symbols), &bonds).as_deref(), Some("2-etilbutan-1-ol"));
    }

    #[test]
    fn test_carboxy_branch() {
        // HOOC-CH2-CH(COOH)-CH2-COOH
        let symbols = ["C", "O", "O", "C", "C", "C", "C", "O", "O", "C", "O", "O"];
        let bonds = [
            BondSpec::double(0, 1),
            BondSpec::single(0, 2),
            BondSpec::single(0, 3),
            BondSpec::single(3, 4),
            BondSpec::single(4, 5),
            BondSpec::single(5, 6),
            BondSpec::double(6, 7),
            BondSpec::single(6, 8),
            BondSpec::single(4, 9),
            BondSpec::double(9, 10),
            BondSpec::single(9, 11),
        ];
        assert_eq!(
            name(&atoms(&symbols), &bonds).as_deref(),
            Some("ácido 3-carboxipentanodioico")
        );
    }

    #[test]
    fn test_branch_with_two_rings() {
        // Hexane 0..=5; on C2 a cyclopropane 6..=8 carrying a cyclobutane 9..=12.
        let mut bonds = chain_bonds(6);
        bonds.extend([
            BondSpec::single(2, 6),
            BondSpec::single(6, 7),
            BondSpec::single(7, 8),
            BondSpec::single(8, 6),
            BondSpec::single(7, 9),
            BondSpec::single(9, 10),
            BondSpec::single(10, 11),
            BondSpec::single(11, 12),
            BondSpec::single(12, 9),
        ]);
        assert_eq!(
            name(&atoms(&["C"; 13]), &bonds).as_deref(),
            Some("3-(2-ciclobutilciclopropil)hexano")
        );
    }

    #[test]
    fn test_ylidene_branch() {
        // Methylidenecyclohexane.
        let mut bonds: Vec<BondSpec> = (0..6).map(|i| BondSpec::single(i, (i + 1) % 6)).collect();
        bonds.push(BondSpec::double(0, 6));
        assert_eq!(name(&atoms(&["C"; 7]), &bonds).as_deref(), Some("metilidenociclohexano"));
    }
}
