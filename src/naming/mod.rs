//! Name synthesis: from a validated molecule to a Spanish name.

mod bridged;
mod locants;
mod roots;
mod special;
mod substituent;

pub use roots::MAX_STEM;

use crate::{
    detect_groups,
    structure::{self, Backbone},
    FunctionalGroup, GroupKind, Molecule, NamingConfig, NamingError,
};
use locants::{Citation, Numbering};
use roots::{attach_suffix, join_locants, multiplier};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// A rendered name and the length of the backbone it was built on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Named {
    pub name: String,
    /// 0 when no carbon backbone was involved.
    pub backbone_length: usize,
}

impl Named {
    pub(crate) fn new(name: impl Into<String>, backbone_length: usize) -> Self {
        Named {
            name: name.into(),
            backbone_length,
        }
    }
}

/// Everything the synthesizer threads through one request.
pub(crate) struct Context<'a> {
    pub mol: &'a Molecule,
    pub groups: &'a [FunctionalGroup],
    pub config: &'a NamingConfig,
}

impl Context<'_> {
    fn anchors(&self, atom: usize, kind: GroupKind) -> bool {
        self.groups.iter().any(|g| g.kind == kind && g.anchor == atom)
    }
}

/// How the principal group shows up in the name.
enum Suffix {
    /// `ácido <root>oico`; never carries locants.
    Acid(&'static str),
    /// `ácido <locants>-<root>osulfónico`.
    AcidWord(&'static str),
    /// Plain suffix, with or without locants.
    Plain(&'static str, bool),
}

fn suffix(kind: GroupKind) -> Option<Suffix> {
    use GroupKind::*;
    Some(match kind {
        Carboxyl => Suffix::Acid("oico"),
        Sulfonic => Suffix::AcidWord("sulfónico"),
        Sulfinic => Suffix::AcidWord("sulfínico"),
        Formyl => Suffix::Plain("al", false),
        Oxo => Suffix::Plain("ona", true),
        Hydroxyl => Suffix::Plain("ol", true),
        Amino => Suffix::Plain("amina", true),
        Sulfhydryl => Suffix::Plain("tiol", true),
        _ => return None,
    })
}

impl Suffix {
    fn shows_locants(&self) -> bool {
        !matches!(self, Suffix::Acid(_) | Suffix::Plain(_, false))
    }
}

/// Principal carbons and prefix citations for a backbone. Groups attached to
/// backbone carbons are cited directly; carbon branches are named
/// recursively.
fn cite(
    ctx: &Context,
    backbone: &Backbone,
    scope: &BTreeSet<usize>,
    principal: Option<GroupKind>,
) -> Result<(Vec<usize>, Vec<Citation>), NamingError> {
    let mut principal_atoms = Vec::new();
    let mut citations = Vec::new();
    for group in ctx.groups.iter().filter(|g| !g.kind.is_bridging()) {
        let Some(&carbon) = group.attached_carbons.first() else {
            continue;
        };
        if !backbone.atoms.contains(&carbon) {
            continue;
        }
        if Some(group.kind) == principal {
            principal_atoms.push(carbon);
        } else if let Some(prefix) = group.prefix_name() {
            citations.push(Citation::new(carbon, prefix));
        }
    }
    for branch in structure::branches(ctx.mol, &backbone.atoms, scope) {
        let named = substituent::name(ctx, &branch)?;
        citations.push(Citation::new(branch.parent, named.name));
    }
    Ok((principal_atoms, citations))
}

/// Every heteroatom must belong to a recognised group.
fn check_coverage(mol: &Molecule, groups: &[FunctionalGroup]) -> Result<(), NamingError> {
    let covered: BTreeSet<usize> = groups.iter().flat_map(|g| g.members.iter().copied()).collect();
    for (index, element) in mol.elements() {
        if element.is_carbon() || element.is_hydrogen() || covered.contains(&index) {
            continue;
        }
        return Err(NamingError::UnrecognizedHeteroatom {
            index,
            element: element.to_string(),
        });
    }
    Ok(())
}

/// Entry point of the synthesizer, holding the limits for every request.
#[derive(Debug, Clone, Default)]
pub struct Namer {
    config: NamingConfig,
}

impl Namer {
    pub fn new() -> Self {
        Namer::default()
    }

    pub fn with_config(config: NamingConfig) -> Self {
        Namer { config }
    }

    pub fn config(&self) -> &NamingConfig {
        &self.config
    }

    /// Name a built molecule, or say why it cannot be named.
    #[instrument(level = "debug", skip_all, fields(atoms = mol.len()))]
    pub fn name_molecule(&self, mol: &Molecule) -> Result<Named, NamingError> {
        if mol.is_empty() {
            return Err(NamingError::Empty);
        }
        if mol.len() > self.config.max_atoms {
            return Err(NamingError::TooManyAtoms {
                atoms: mol.len(),
                max: self.config.max_atoms,
            });
        }
        if special::is_water(mol) {
            return Ok(Named::new("agua", 0));
        }
        if !mol.is_connected() {
            return Err(NamingError::Disconnected(mol.component_count()));
        }
        mol.check_valence()?;
        if mol.has_unknown_element() {
            debug!("unknown element present, falling back to the formula");
            return Ok(Named::new(special::formula(mol), 0));
        }
        if let Some(name) = special::oxo_centre(mol) {
            return Ok(Named::new(name, 0));
        }

        let carbons = mol.carbons();
        if carbons.is_empty() {
            return Ok(Named::new(special::inorganic(mol), 0));
        }

        let groups = detect_groups(mol);
        check_coverage(mol, &groups)?;
        let ctx = Context {
            mol,
            groups: &groups,
            config: &self.config,
        };

        let fragments = structure::components(mol, &carbons);
        for bridge in groups.iter().filter(|g| g.kind.is_bridging()) {
            let same_fragment = fragments
                .iter()
                .any(|f| bridge.attached_carbons.iter().all(|c| f.contains(c)));
            if same_fragment {
                return Err(NamingError::InternalBridge {
                    group: bridge.rendered_name.clone(),
                    anchor: bridge.anchor,
                });
            }
        }
        if fragments.len() > 1 {
            return bridged::name(&ctx, &fragments);
        }

        self.name_parent(&ctx, &carbons)
    }

    fn name_parent(&self, ctx: &Context, carbons: &BTreeSet<usize>) -> Result<Named, NamingError> {
        let principal = ctx.groups.iter().find(|g| {
            g.kind.is_suffix_eligible() && !g.kind.is_bridging() && !g.attached_carbons.is_empty()
        });
        let kind = principal.map(|g| g.kind);
        if let Some(group) = principal {
            debug!("principal group {:?} at atom {}", group.kind, group.anchor);
        }
        let favored: BTreeSet<usize> = ctx
            .groups
            .iter()
            .filter(|g| Some(g.kind) == kind)
            .flat_map(|g| g.attached_carbons.iter().copied())
            .collect();
        let target = principal.and_then(|g| g.attached_carbons.first().copied());

        let backbone = structure::select_backbone(ctx.mol, carbons, target, &favored)?;
        if backbone.len() > self.config.max_backbone {
            return Err(NamingError::BackboneTooLong(backbone.len()));
        }

        let (principal_atoms, citations) = cite(ctx, &backbone, carbons, kind)?;
        let numbering = locants::choose_numbering(ctx.mol, &backbone, &principal_atoms, &citations, false);
        let name = render(&backbone, &numbering, kind.and_then(suffix), &principal_atoms, &citations)?;
        debug!("named {}", name);
        Ok(Named::new(name, backbone.len()))
    }
}

/// Assemble prefixes, hydride and suffix for a numbered backbone.
fn render(
    backbone: &Backbone,
    numbering: &Numbering,
    suffix: Option<Suffix>,
    principal_atoms: &[usize],
    citations: &[Citation],
) -> Result<String, NamingError> {
    let length = backbone.len();
    let ring = backbone.is_ring();
    let two_carbon_chain = !ring && length == 2;

    // A two-carbon chain has one place for a multiple bond.
    let shown_bonds = if two_carbon_chain { 0 } else { numbering.unsaturation.len() };
    let shown_suffix = match &suffix {
        Some(s) if s.shows_locants() => principal_atoms.len(),
        _ => 0,
    };
    let items = shown_suffix + shown_bonds + citations.len();
    let show = !(length == 1 || ((ring || two_carbon_chain) && items <= 1));

    let hydride = roots::hydride(length, ring, &numbering.unsaturation, show && !two_carbon_chain)?;
    let prefixes = locants::format_prefixes(numbering, citations, show)?;

    let mut principal_locants: Vec<usize> = principal_atoms.iter().filter_map(|&a| numbering.locant(a)).collect();
    principal_locants.sort_unstable();
    let principal_locants = join_locants(&principal_locants);
    let mult = multiplier(principal_atoms.len().max(1))?;

    Ok(match suffix {
        None => locants::prepend(&prefixes, &format!("{hydride}o")),
        Some(Suffix::Acid(ending)) => {
            let root = attach_suffix(&hydride, &format!("{mult}{ending}"), None);
            format!("ácido {}", locants::prepend(&prefixes, &root))
        }
        Some(Suffix::AcidWord(word)) => {
            let root = attach_suffix(&hydride, &format!("{mult}{word}"), None);
            let root = if show { format!("{principal_locants}-{root}") } else { root };
            format!("ácido {}", locants::prepend(&prefixes, &root))
        }
        Some(Suffix::Plain(ending, with_locants)) => {
            let shown = (show && with_locants).then_some(principal_locants.as_str());
            let root = attach_suffix(&hydride, &format!("{mult}{ending}"), shown);
            locants::prepend(&prefixes, &root)
        }
    })
}
