//! A SMILES reader for the subset the namer understands: the organic atoms
//! `C N O S F Cl Br I` (plus `B` and `P`, kept as unknown elements), bracket
//! atoms with an optional hydrogen count, the bond symbols `- = #`,
//! branches, ring closures and `.` between fragments.
//!
//! Aromatic lowercase atoms are not accepted. Charges, isotopes and
//! stereo marks inside brackets are read and discarded.

use crate::{Atom, Bond, BondSpec, Element};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    character::complete::{char, digit1, one_of, satisfy},
    combinator::{map, map_res, opt, recognize, value},
    multi::many0,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmilesError {
    #[error("Unexpected character {1:?} at position {0}")]
    UnexpectedCharacter(usize, char),
    #[error("Branch at position {0} has no atom to hang from")]
    BranchNoCurrentAtom(usize),
    #[error("Branch end at position {0} without a branch start")]
    BranchEndNoStart(usize),
    #[error("Ring closure {0} at position {1} has no current atom")]
    RingClosureNoCurrentAtom(u8, usize),
    #[error("Bond at position {0} is not followed by an atom")]
    DanglingBond(usize),
    #[error("Unclosed bracket at position {0}")]
    UnclosedBracket(usize),
    #[error("Unclosed branch")]
    UnclosedBranch,
    #[error("Ring closure {0} is never closed")]
    UnclosedRing(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Atom { element: Element, hydrogens: usize },
    Bond(Bond),
    BranchOpen,
    BranchClose,
    RingClosure(u8),
    Dot,
}

fn organic_atom(input: &str) -> IResult<&str, Token> {
    map(
        alt((
            tag("Cl"),
            tag("Br"),
            tag("C"),
            tag("N"),
            tag("O"),
            tag("S"),
            tag("F"),
            tag("I"),
            tag("P"),
            tag("B"),
        )),
        |symbol: &str| Token::Atom {
            element: Element::from_symbol(symbol),
            hydrogens: 0,
        },
    )(input)
}

fn element_symbol(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_uppercase()),
        opt(satisfy(|c| c.is_ascii_lowercase())),
    ))(input)
}

fn hydrogen_count(input: &str) -> IResult<&str, usize> {
    preceded(
        char('H'),
        map(opt(map_res(digit1, |n: &str| n.parse::<usize>())), |n| n.unwrap_or(1)),
    )(input)
}

/// `[13CH3+]` reads as carbon with three explicit hydrogens.
fn bracket_atom(input: &str) -> IResult<&str, Token> {
    delimited(
        char('['),
        map(
            tuple((
                opt(digit1),
                element_symbol,
                many0(char('@')),
                opt(hydrogen_count),
                many0(one_of("+-0123456789")),
            )),
            |(_, symbol, _, hydrogens, _)| Token::Atom {
                element: Element::from_symbol(symbol),
                hydrogens: hydrogens.unwrap_or(0),
            },
        ),
        char(']'),
    )(input)
}

fn bond(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Bond(Bond::Single), one_of("-/\\")),
        value(Token::Bond(Bond::Double), char('=')),
        value(Token::Bond(Bond::Triple), char('#')),
    ))(input)
}

fn ring_closure(input: &str) -> IResult<&str, Token> {
    map_res(
        alt((
            preceded(char('%'), take_while_m_n(2, 2, |c: char| c.is_ascii_digit())),
            take_while_m_n(1, 1, |c: char| c.is_ascii_digit()),
        )),
        |digits: &str| digits.parse::<u8>().map(Token::RingClosure),
    )(input)
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((
        bracket_atom,
        organic_atom,
        bond,
        ring_closure,
        value(Token::BranchOpen, char('(')),
        value(Token::BranchClose, char(')')),
        value(Token::Dot, char('.')),
    ))(input)
}

/// Read a SMILES string into the atom and bond lists the namer takes.
/// Hydrogens written inside brackets become explicit hydrogen atoms.
pub fn parse_smiles(smiles: &str) -> Result<(Vec<Atom>, Vec<BondSpec>), SmilesError> {
    let mut atoms: Vec<Atom> = Vec::new();
    let mut bonds: Vec<BondSpec> = Vec::new();

    let mut current_atom: Option<usize> = None;
    let mut pending_bond: Option<(usize, Bond)> = None;
    let mut branch_stack: Vec<usize> = Vec::new();
    let mut ring_map: BTreeMap<u8, (usize, Option<Bond>)> = BTreeMap::new();

    let mut rest = smiles.trim();
    let total = rest.len();
    while !rest.is_empty() {
        let position = total - rest.len();
        let (next, token) = match token(rest) {
            Ok(parsed) => parsed,
            Err(_) if rest.starts_with('[') => return Err(SmilesError::UnclosedBracket(position)),
            Err(_) => {
                let c = rest.chars().next().unwrap_or_default();
                return Err(SmilesError::UnexpectedCharacter(position, c));
            }
        };
        rest = next;
        trace!("{token:?} at {position}");

        match token {
            Token::Atom { element, hydrogens } => {
                let index = atoms.len();
                atoms.push(Atom::new(element));
                match (current_atom, pending_bond.take()) {
                    (Some(prev), bond) => {
                        let order = bond.map(|(_, order)| order).unwrap_or(Bond::Single);
                        bonds.push(BondSpec::new(prev, index, order));
                    }
                    (None, Some((at, _))) => return Err(SmilesError::DanglingBond(at)),
                    (None, None) => {}
                }
                for _ in 0..hydrogens {
                    let h = atoms.len();
                    atoms.push(Atom::new(Element::H));
                    bonds.push(BondSpec::single(index, h));
                }
                current_atom = Some(index);
            }
            Token::Bond(order) => {
                if pending_bond.is_some() {
                    return Err(SmilesError::DanglingBond(position));
                }
                pending_bond = Some((position, order));
            }
            Token::BranchOpen => {
                let atom = current_atom.ok_or(SmilesError::BranchNoCurrentAtom(position))?;
                branch_stack.push(atom);
            }
            Token::BranchClose => {
                if let Some((at, _)) = pending_bond {
                    return Err(SmilesError::DanglingBond(at));
                }
                current_atom = Some(branch_stack.pop().ok_or(SmilesError::BranchEndNoStart(position))?);
            }
            Token::RingClosure(label) => {
                let atom = current_atom.ok_or(SmilesError::RingClosureNoCurrentAtom(label, position))?;
                let bond = pending_bond.take().map(|(_, order)| order);
                if let Some((start, opening_bond)) = ring_map.remove(&label) {
                    let order = bond.or(opening_bond).unwrap_or(Bond::Single);
                    bonds.push(BondSpec::new(start, atom, order));
                } else {
                    ring_map.insert(label, (atom, bond));
                }
            }
            Token::Dot => {
                if let Some((at, _)) = pending_bond {
                    return Err(SmilesError::DanglingBond(at));
                }
                current_atom = None;
            }
        }
    }

    if let Some((at, _)) = pending_bond {
        return Err(SmilesError::DanglingBond(at));
    }
    if !branch_stack.is_empty() {
        return Err(SmilesError::UnclosedBranch);
    }
    if let Some(&label) = ring_map.keys().next() {
        return Err(SmilesError::UnclosedRing(label));
    }
    Ok((atoms, bonds))
}
