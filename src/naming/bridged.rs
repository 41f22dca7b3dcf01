use super::{locants::alpha_key, substituent, Context, Named};
use crate::{structure::Branch, NamingError};
use std::collections::BTreeSet;
use tracing::debug;

/// Two carbon fragments joined by one bridging group, named functional-class
/// style: `etil metil éter`, `dimetil sulfona`.
pub(crate) fn name(ctx: &Context, fragments: &[BTreeSet<usize>]) -> Result<Named, NamingError> {
    let bridges: Vec<_> = ctx.groups.iter().filter(|g| g.kind.is_bridging()).collect();
    let (2, [bridge]) = (fragments.len(), bridges.as_slice()) else {
        return Err(NamingError::FragmentedSkeleton(fragments.len()));
    };

    let mut sides = Vec::with_capacity(2);
    for &carbon in &bridge.attached_carbons {
        let fragment = fragments
            .iter()
            .find(|f| f.contains(&carbon))
            .ok_or(NamingError::FragmentedSkeleton(fragments.len()))?;
        let parent = bridge
            .members
            .iter()
            .copied()
            .find(|&m| ctx.mol.bond(m, carbon).is_some())
            .unwrap_or(bridge.anchor);
        let branch = Branch {
            position: 0,
            parent,
            attach: carbon,
            atoms: fragment.clone(),
        };
        sides.push(substituent::name(ctx, &branch)?);
    }
    sides.sort_by_key(|side| (alpha_key(&side.name), side.name.clone()));

    let backbone_length = sides.iter().map(|s| s.backbone_length).max().unwrap_or(0);
    let name = match sides.as_slice() {
        [a, b] if a.name == b.name => format!("di{} {}", a.name, bridge.rendered_name),
        [a, b] => format!("{} {} {}", a.name, b.name, bridge.rendered_name),
        _ => return Err(NamingError::FragmentedSkeleton(fragments.len())),
    };
    debug!("bridged through {:?} at {}", bridge.kind, bridge.anchor);
    Ok(Named::new(name, backbone_length))
}
