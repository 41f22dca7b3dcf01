use super::*;
use serde::Serialize;
use tracing::debug;

/// Everything the UI shows for one molecule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailedAnalysis {
    pub name: Option<String>,
    pub functional_groups: Vec<FunctionalGroup>,
    /// Carbons on the chosen backbone; 0 for special cases and failures.
    pub backbone_length: usize,
}

impl Namer {
    pub fn try_name(&self, atoms: &[Atom], bonds: &[BondSpec]) -> Result<String, NamingError> {
        let mol = Molecule::new(atoms, bonds)?;
        self.name_molecule(&mol).map(|named| named.name)
    }

    pub fn name(&self, atoms: &[Atom], bonds: &[BondSpec]) -> Option<String> {
        match self.try_name(atoms, bonds) {
            Ok(name) => Some(name),
            Err(err) => {
                debug!("cannot name molecule: {err}");
                None
            }
        }
    }

    pub fn detect_functional_groups(&self, atoms: &[Atom], bonds: &[BondSpec]) -> Vec<FunctionalGroup> {
        match Molecule::new(atoms, bonds) {
            Ok(mol) => detect_groups(&mol),
            Err(err) => {
                debug!("cannot build molecule: {err}");
                Vec::new()
            }
        }
    }

    pub fn detailed_analysis(&self, atoms: &[Atom], bonds: &[BondSpec]) -> DetailedAnalysis {
        let mol = match Molecule::new(atoms, bonds) {
            Ok(mol) => mol,
            Err(err) => {
                debug!("cannot build molecule: {err}");
                return DetailedAnalysis {
                    name: None,
                    functional_groups: Vec::new(),
                    backbone_length: 0,
                };
            }
        };
        let functional_groups = detect_groups(&mol);
        match self.name_molecule(&mol) {
            Ok(named) => DetailedAnalysis {
                name: Some(named.name),
                functional_groups,
                backbone_length: named.backbone_length,
            },
            Err(err) => {
                debug!("cannot name molecule: {err}");
                DetailedAnalysis {
                    name: None,
                    functional_groups,
                    backbone_length: 0,
                }
            }
        }
    }
}

/// Name a molecule with the default limits. `None` means it cannot be named.
pub fn name(atoms: &[Atom], bonds: &[BondSpec]) -> Option<String> {
    Namer::default().name(atoms, bonds)
}

/// Like [`name`], but says why naming failed.
pub fn try_name(atoms: &[Atom], bonds: &[BondSpec]) -> Result<String, NamingError> {
    Namer::default().try_name(atoms, bonds)
}

pub fn detailed_analysis(atoms: &[Atom], bonds: &[BondSpec]) -> DetailedAnalysis {
    Namer::default().detailed_analysis(atoms, bonds)
}

pub fn detect_functional_groups(atoms: &[Atom], bonds: &[BondSpec]) -> Vec<FunctionalGroup> {
    Namer::default().detect_functional_groups(atoms, bonds)
}
