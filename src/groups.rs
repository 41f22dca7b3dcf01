use super::*;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::trace;

/// Functional-group classes, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum GroupKind {
    Carboxyl,
    Sulfonic,
    Sulfinic,
    Formyl,
    Oxo,
    Hydroxyl,
    Amino,
    Nitro,
    Nitroso,
    NitriteEster,
    NitrateEster,
    Sulfhydryl,
    Sulfoxide,
    Sulfone,
    Sulfide,
    Disulfide,
    Ether,
    Halogen,
}

impl GroupKind {
    /// 1 is the most senior.
    pub fn priority(self) -> u8 {
        self as u8 + 1
    }

    /// Kinds that may name the compound through a suffix.
    pub fn is_suffix_eligible(self) -> bool {
        use GroupKind::*;
        matches!(
            self,
            Carboxyl | Sulfonic | Sulfinic | Formyl | Oxo | Hydroxyl | Amino | Sulfhydryl | Sulfoxide | Sulfone
        )
    }

    /// Kinds that join two carbons through a heteroatom.
    pub fn is_bridging(self) -> bool {
        use GroupKind::*;
        matches!(self, Sulfoxide | Sulfone | Sulfide | Disulfide | Ether)
    }

    fn rendered(self) -> &'static str {
        use GroupKind::*;
        match self {
            Carboxyl => "carboxilo",
            Sulfonic => "sulfónico",
            Sulfinic => "sulfínico",
            Formyl => "formilo",
            Oxo => "oxo",
            Hydroxyl => "hidroxi",
            Amino => "amino",
            Nitro => "nitro",
            Nitroso => "nitroso",
            NitriteEster => "nitrito",
            NitrateEster => "nitrato",
            Sulfhydryl => "sulfhidrilo",
            Sulfoxide => "sulfóxido",
            Sulfone => "sulfona",
            Sulfide => "sulfuro",
            Disulfide => "disulfuro",
            Ether => "éter",
            Halogen => "halógeno",
        }
    }

    /// Name used when the group is cited as a prefix on a carbon.
    fn prefix(self) -> Option<&'static str> {
        use GroupKind::*;
        Some(match self {
            Carboxyl => "carboxi",
            Sulfonic => "sulfo",
            Sulfinic => "sulfino",
            Formyl | Oxo => "oxo",
            Hydroxyl => "hidroxi",
            Amino => "amino",
            Nitro => "nitro",
            Nitroso => "nitroso",
            NitriteEster => "nitrosooxi",
            NitrateEster => "nitrooxi",
            Sulfhydryl => "sulfanil",
            Sulfoxide | Sulfone | Sulfide | Disulfide | Ether | Halogen => return None,
        })
    }
}

/// One recognised group. `members` are the heavy atoms the group claims;
/// `attached_carbons` are the carbons it substitutes (two for bridging kinds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionalGroup {
    pub kind: GroupKind,
    pub anchor: usize,
    pub priority: u8,
    pub rendered_name: String,
    pub members: Vec<usize>,
    pub attached_carbons: Vec<usize>,
}

impl FunctionalGroup {
    fn new(kind: GroupKind, anchor: usize, members: Vec<usize>, attached_carbons: Vec<usize>) -> Self {
        FunctionalGroup {
            kind,
            anchor,
            priority: kind.priority(),
            rendered_name: kind.rendered().to_string(),
            members,
            attached_carbons,
        }
    }

    fn halogen(element: &Element, anchor: usize, carbon: usize) -> Option<Self> {
        let prefix = element.halogen_prefix()?;
        let mut group = FunctionalGroup::new(GroupKind::Halogen, anchor, vec![anchor], vec![carbon]);
        group.rendered_name = prefix.to_string();
        Some(group)
    }

    /// Prefix form (`hidroxi`, `cloro`, ...). Bridging kinds have none.
    pub fn prefix_name(&self) -> Option<&str> {
        match self.kind {
            GroupKind::Halogen => Some(&self.rendered_name),
            kind => kind.prefix(),
        }
    }
}

/// Neighbourhood of a candidate centre atom.
struct Site {
    /// O atoms bonded only to the centre, with their bond order.
    terminal_o: Vec<(usize, Bond)>,
    carbons: Vec<usize>,
    heavy: Vec<usize>,
    hydrogens: usize,
}

impl Site {
    fn new(mol: &Molecule, center: usize) -> Self {
        let heavy = mol.heavy_neighbors(center);
        let terminal_o = heavy
            .iter()
            .copied()
            .filter(|&n| *mol.element(n) == Element::O && mol.heavy_neighbors(n) == [center])
            .filter_map(|n| mol.bond(center, n).map(|bond| (n, bond)))
            .collect();
        let carbons = heavy.iter().copied().filter(|&n| mol.element(n).is_carbon()).collect();
        Site {
            terminal_o,
            carbons,
            heavy,
            hydrogens: mol.hydrogen_count(center),
        }
    }

    fn terminal(&self, order: Bond) -> Vec<usize> {
        self.terminal_o
            .iter()
            .filter(|(_, bond)| *bond == order)
            .map(|(o, _)| *o)
            .collect()
    }

    fn terminal_atoms(&self) -> Vec<usize> {
        self.terminal_o.iter().map(|(o, _)| *o).collect()
    }

    /// Terminal single-bonded O carrying a hydrogen.
    fn hydroxyls(&self, mol: &Molecule) -> usize {
        self.terminal(Bond::Single)
            .into_iter()
            .filter(|&o| mol.hydrogen_count(o) > 0)
            .count()
    }

    /// Heavy neighbours that are neither terminal O nor carbon.
    fn others(&self) -> Vec<usize> {
        let terminal = self.terminal_atoms();
        self.heavy
            .iter()
            .copied()
            .filter(|n| !terminal.contains(n) && !self.carbons.contains(n))
            .collect()
    }

    fn only(&self, terminal: usize, carbons: usize) -> bool {
        self.terminal_o.len() == terminal && self.carbons.len() == carbons && self.heavy.len() == terminal + carbons
    }
}

fn with_members(center: usize, mut extra: Vec<usize>) -> Vec<usize> {
    extra.insert(0, center);
    extra
}

fn detect_carbon(mol: &Molecule, c: usize) -> Option<FunctionalGroup> {
    let site = Site::new(mol, c);
    let double = site.terminal(Bond::Double);
    let single = site.terminal(Bond::Single);
    if double.len() != 1 || !site.others().is_empty() {
        return None;
    }
    let members = with_members(c, site.terminal_atoms());
    let kind = match (single.len(), site.carbons.len(), site.hydrogens) {
        (1, 0..=1, _) => GroupKind::Carboxyl,
        (0, 0..=1, h) if h >= 1 => GroupKind::Formyl,
        (0, n, 0) if n >= 1 => GroupKind::Oxo,
        _ => return None,
    };
    Some(FunctionalGroup::new(kind, c, members, vec![c]))
}

fn detect_sulfur(mol: &Molecule, s: usize, claimed: &BTreeSet<usize>) -> Option<FunctionalGroup> {
    let site = Site::new(mol, s);
    let members = with_members(s, site.terminal_atoms());
    let hydroxyls = site.hydroxyls(mol);

    if site.only(3, 1) && hydroxyls >= 1 {
        return Some(FunctionalGroup::new(GroupKind::Sulfonic, s, members, site.carbons));
    }
    if site.only(2, 1) && hydroxyls >= 1 {
        return Some(FunctionalGroup::new(GroupKind::Sulfinic, s, members, site.carbons));
    }
    if site.only(0, 1) && site.hydrogens >= 1 {
        return Some(FunctionalGroup::new(GroupKind::Sulfhydryl, s, members, site.carbons));
    }
    if site.only(1, 2) {
        return Some(FunctionalGroup::new(GroupKind::Sulfoxide, s, members, site.carbons));
    }
    if site.only(2, 2) && hydroxyls == 0 {
        return Some(FunctionalGroup::new(GroupKind::Sulfone, s, members, site.carbons));
    }
    if site.only(0, 2) && site.hydrogens == 0 {
        return Some(FunctionalGroup::new(GroupKind::Sulfide, s, members, site.carbons));
    }

    // R-S-S-R, anchored on the lower-indexed sulfur.
    if site.heavy.len() == 2 && site.carbons.len() == 1 {
        let partner = site.heavy.iter().copied().find(|&n| *mol.element(n) == Element::S)?;
        if partner < s || claimed.contains(&partner) {
            return None;
        }
        let other = Site::new(mol, partner);
        if other.heavy.len() == 2 && other.carbons.len() == 1 {
            let attached = vec![site.carbons[0], other.carbons[0]];
            return Some(FunctionalGroup::new(GroupKind::Disulfide, s, vec![s, partner], attached));
        }
    }
    None
}

/// O bonded to `n` and to exactly one carbon.
fn ester_oxygens(mol: &Molecule, n: usize, site: &Site) -> Vec<(usize, usize)> {
    site.heavy
        .iter()
        .copied()
        .filter(|&o| *mol.element(o) == Element::O && mol.bond(n, o) == Some(Bond::Single))
        .filter_map(|o| match mol.heavy_neighbors(o).as_slice() {
            [a, b] => {
                let carbon = if *a == n { *b } else { *a };
                mol.element(carbon).is_carbon().then_some((o, carbon))
            }
            _ => None,
        })
        .collect()
}

fn detect_nitrogen(mol: &Molecule, n: usize) -> Option<FunctionalGroup> {
    let site = Site::new(mol, n);
    let members = with_members(n, site.terminal_atoms());

    if site.only(0, 1) && site.hydrogens == 2 {
        return Some(FunctionalGroup::new(GroupKind::Amino, n, members, site.carbons));
    }
    if site.only(2, 1) {
        return Some(FunctionalGroup::new(GroupKind::Nitro, n, members, site.carbons));
    }
    if site.only(1, 1) {
        return Some(FunctionalGroup::new(GroupKind::Nitroso, n, members, site.carbons));
    }

    if !site.carbons.is_empty() {
        return None;
    }
    let esters = ester_oxygens(mol, n, &site);
    let [(bridge, carbon)] = esters.as_slice() else {
        return None;
    };
    let mut members = members;
    members.push(*bridge);
    match (site.terminal_o.len(), site.heavy.len()) {
        (1, 2) => Some(FunctionalGroup::new(GroupKind::NitriteEster, n, members, vec![*carbon])),
        (2, 3) => Some(FunctionalGroup::new(GroupKind::NitrateEster, n, members, vec![*carbon])),
        _ => None,
    }
}

fn detect_halogen(mol: &Molecule, x: usize) -> Option<FunctionalGroup> {
    let [carbon] = mol.heavy_neighbors(x)[..] else {
        return None;
    };
    if !mol.element(carbon).is_carbon() || mol.bond(x, carbon) != Some(Bond::Single) {
        return None;
    }
    FunctionalGroup::halogen(mol.element(x), x, carbon)
}

fn is_carbonyl(mol: &Molecule, c: usize) -> bool {
    Site::new(mol, c)
        .terminal_o
        .iter()
        .any(|(_, bond)| *bond == Bond::Double)
}

fn detect_oxygen(mol: &Molecule, o: usize) -> Option<FunctionalGroup> {
    let heavy = mol.heavy_neighbors(o);
    if !heavy.iter().all(|&n| mol.element(n).is_carbon() && mol.bond(o, n) == Some(Bond::Single)) {
        return None;
    }
    match heavy[..] {
        [c] if mol.hydrogen_count(o) >= 1 && !is_carbonyl(mol, c) => {
            Some(FunctionalGroup::new(GroupKind::Hydroxyl, o, vec![o], vec![c]))
        }
        [a, b] => Some(FunctionalGroup::new(GroupKind::Ether, o, vec![o], vec![a, b])),
        _ => None,
    }
}

/// Classify the heavy atoms of a molecule. Carbon, sulfur, nitrogen and
/// halogen centres are tried first in index order and claim the oxygens
/// they use; hydroxyl and ether oxygens are then taken from what is left.
/// No atom belongs to two groups. The result is ordered by priority, then
/// by anchor index.
pub fn detect_groups(mol: &Molecule) -> Vec<FunctionalGroup> {
    let mut claimed: BTreeSet<usize> = BTreeSet::new();
    let mut groups = Vec::new();

    let mut accept = |group: FunctionalGroup, claimed: &mut BTreeSet<usize>| {
        if group.members.iter().any(|m| claimed.contains(m)) {
            return;
        }
        trace!("atom {} is {:?}", group.anchor, group.kind);
        claimed.extend(group.members.iter().copied());
        groups.push(group);
    };

    for (index, element) in mol.elements() {
        if claimed.contains(&index) {
            continue;
        }
        let found = match element {
            Element::C => detect_carbon(mol, index),
            Element::S => detect_sulfur(mol, index, &claimed),
            Element::N => detect_nitrogen(mol, index),
            e if e.is_halogen() => detect_halogen(mol, index),
            _ => None,
        };
        if let Some(group) = found {
            accept(group, &mut claimed);
        }
    }

    for (index, element) in mol.elements() {
        if *element != Element::O || claimed.contains(&index) {
            continue;
        }
        if let Some(group) = detect_oxygen(mol, index) {
            accept(group, &mut claimed);
        }
    }

    groups.sort_by_key(|g| (g.priority, g.anchor));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn molecule(symbols: &[&str], bonds: &[BondSpec]) -> Molecule {
        let atoms: Vec<Atom> = symbols.iter().map(|&s| Atom::new(Element::from(s))).collect();
        Molecule::new(&atoms, bonds).unwrap()
    }

    fn kinds(mol: &Molecule) -> Vec<(GroupKind, usize)> {
        detect_groups(mol).into_iter().map(|g| (g.kind, g.anchor)).collect()
    }

    #[test]
    fn test_carboxylic_acid() {
        // C-C(=O)-O
        let mol = molecule(
            &["C", "C", "O", "O"],
            &[BondSpec::single(0, 1), BondSpec::double(1, 2), BondSpec::single(1, 3)],
        );
        let groups = detect_groups(&mol);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind, GroupKind::Carboxyl);
        assert_eq!(groups[0].priority, 1);
        assert_eq!(groups[0].rendered_name, "carboxilo");
        assert_eq!(groups[0].members, vec![1, 2, 3]);
    }

    #[test]
    fn test_aldehyde_and_ketone() {
        // C(=O)-C-C(=O)-C
        let mol = molecule(
            &["C", "O", "C", "C", "O", "C"],
            &[
                BondSpec::double(0, 1),
                BondSpec::single(0, 2),
                BondSpec::single(2, 3),
                BondSpec::double(3, 4),
                BondSpec::single(3, 5),
            ],
        );
        assert_eq!(kinds(&mol), vec![(GroupKind::Formyl, 0), (GroupKind::Oxo, 3)]);
    }

    #[test]
    fn test_alcohol_thiol_amine() {
        // O-C-C(-S)-C-N
        let mol = molecule(
            &["O", "C", "C", "S", "C", "N"],
            &[
                BondSpec::single(0, 1),
                BondSpec::single(1, 2),
                BondSpec::single(2, 3),
                BondSpec::single(2, 4),
                BondSpec::single(4, 5),
            ],
        );
        assert_eq!(
            kinds(&mol),
            vec![(GroupKind::Hydroxyl, 0), (GroupKind::Amino, 5), (GroupKind::Sulfhydryl, 3)]
        );
    }

    #[test]
    fn test_sulfur_oxidation_states() {
        // C-S(=O)(=O)-C
        let sulfone = molecule(
            &["C", "S", "O", "O", "C"],
            &[
                BondSpec::single(0, 1),
                BondSpec::double(1, 2),
                BondSpec::double(1, 3),
                BondSpec::single(1, 4),
            ],
        );
        assert_eq!(kinds(&sulfone), vec![(GroupKind::Sulfone, 1)]);

        // C-S(=O)-C
        let sulfoxide = molecule(
            &["C", "S", "O", "C"],
            &[BondSpec::single(0, 1), BondSpec::double(1, 2), BondSpec::single(1, 3)],
        );
        assert_eq!(kinds(&sulfoxide), vec![(GroupKind::Sulfoxide, 1)]);

        // C-S(=O)(=O)-O
        let sulfonic = molecule(
            &["C", "S", "O", "O", "O"],
            &[
                BondSpec::single(0, 1),
                BondSpec::double(1, 2),
                BondSpec::double(1, 3),
                BondSpec::single(1, 4),
            ],
        );
        let groups = detect_groups(&sulfonic);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind, GroupKind::Sulfonic);
        assert_eq!(groups[0].attached_carbons, vec![0]);
    }

    #[test]
    fn test_disulfide_anchored_on_lower_sulfur() {
        // C-S-S-C with the sulfurs listed last.
        let mol = molecule(
            &["C", "C", "S", "S"],
            &[BondSpec::single(0, 3), BondSpec::single(3, 2), BondSpec::single(2, 1)],
        );
        let groups = detect_groups(&mol);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind, GroupKind::Disulfide);
        assert_eq!(groups[0].anchor, 2);
        assert_eq!(groups[0].members, vec![2, 3]);
        assert_eq!(groups[0].attached_carbons, vec![1, 0]);
    }

    #[test]
    fn test_nitrogen_oxides() {
        // C-N(-O)-O
        let nitro = molecule(
            &["C", "N", "O", "O"],
            &[BondSpec::single(0, 1), BondSpec::single(1, 2), BondSpec::single(1, 3)],
        );
        assert_eq!(kinds(&nitro), vec![(GroupKind::Nitro, 1)]);

        // C-O-N=O
        let nitrite = molecule(
            &["C", "O", "N", "O"],
            &[BondSpec::single(0, 1), BondSpec::single(1, 2), BondSpec::double(2, 3)],
        );
        let groups = detect_groups(&nitrite);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind, GroupKind::NitriteEster);
        assert_eq!(groups[0].attached_carbons, vec![0]);
        assert_eq!(groups[0].prefix_name(), Some("nitrosooxi"));
    }

    #[test]
    fn test_ether_and_halogen() {
        // C-O-C-Cl
        let mol = molecule(
            &["C", "O", "C", "Cl"],
            &[BondSpec::single(0, 1), BondSpec::single(1, 2), BondSpec::single(2, 3)],
        );
        let groups = detect_groups(&mol);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].kind, GroupKind::Ether);
        assert_eq!(groups[0].rendered_name, "éter");
        assert_eq!(groups[1].kind, GroupKind::Halogen);
        assert_eq!(groups[1].rendered_name, "cloro");
        assert_eq!(groups[1].prefix_name(), Some("cloro"));
    }

    #[test]
    fn test_no_atom_classified_twice() {
        // HO-C(=O)-C(-OH)-C(=O)-C-S-S-C
        let mol = molecule(
            &["O", "C", "O", "C", "O", "C", "O", "C", "S", "S", "C"],
            &[
                BondSpec::single(0, 1),
                BondSpec::double(1, 2),
                BondSpec::single(1, 3),
                BondSpec::single(3, 4),
                BondSpec::single(3, 5),
                BondSpec::double(5, 6),
                BondSpec::single(5, 7),
                BondSpec::single(7, 8),
                BondSpec::single(8, 9),
                BondSpec::single(9, 10),
            ],
        );
        let groups = detect_groups(&mol);
        let mut seen = BTreeSet::new();
        for group in &groups {
            for member in &group.members {
                assert!(seen.insert(*member), "atom {member} classified twice");
            }
        }
        assert_eq!(
            groups.iter().map(|g| g.kind).collect::<Vec<_>>(),
            vec![GroupKind::Carboxyl, GroupKind::Oxo, GroupKind::Hydroxyl, GroupKind::Disulfide]
        );
    }
}
