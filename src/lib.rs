use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

mod intern;
pub use intern::*;

mod element;

mod error;
pub use error::*;

mod config;
pub use config::*;

mod molecule;
pub use molecule::*;

pub mod structure;

mod groups;
pub use groups::*;

mod naming;
pub use naming::*;

mod api;
pub use api::*;

mod parse;
pub use parse::*;

/// Chemical element of an atom. Symbols outside the supported set are kept
/// as `Other` and only ever reach formula output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Element {
    H,
    C,
    O,
    N,
    S,
    F,
    Cl,
    Br,
    I,
    Other(Name),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bond {
    Single,
    Double,
    Triple,
}

impl Bond {
    pub fn order(self) -> u8 {
        match self {
            Bond::Single => 1,
            Bond::Double => 2,
            Bond::Triple => 3,
        }
    }

    pub fn is_multiple(self) -> bool {
        self != Bond::Single
    }
}

/// Node index == the caller's atom index; edges carry the bond order.
pub type MoleculeGraph = petgraph::graph::UnGraph<Element, Bond>;

/// An atom as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atom {
    pub element: Element,
}

impl Atom {
    pub fn new(element: Element) -> Self {
        Atom { element }
    }
}

impl From<Element> for Atom {
    fn from(element: Element) -> Self {
        Atom::new(element)
    }
}

/// A bond as supplied by the caller, between atom indices `a` and `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondSpec {
    pub a: usize,
    pub b: usize,
    pub order: Bond,
}

impl BondSpec {
    pub fn new(a: usize, b: usize, order: Bond) -> Self {
        BondSpec { a, b, order }
    }

    pub fn single(a: usize, b: usize) -> Self {
        BondSpec::new(a, b, Bond::Single)
    }

    pub fn double(a: usize, b: usize) -> Self {
        BondSpec::new(a, b, Bond::Double)
    }

    pub fn triple(a: usize, b: usize) -> Self {
        BondSpec::new(a, b, Bond::Triple)
    }
}

/// Install a `tracing` subscriber. `level` is any `EnvFilter` directive
/// ("info", "nomenclatura=trace", ...); `RUST_LOG` wins when set.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A second call (e.g. from several tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
