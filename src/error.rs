use thiserror::Error;

/// Why a molecule could not be named. The public `name` entry point folds
/// every variant into `None`; `try_name` hands it to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    #[error("the molecule has no atoms")]
    Empty,
    #[error("bond references atom {index}, but only {len} atoms exist")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("{atoms} atoms exceed the configured maximum of {max}")]
    TooManyAtoms { atoms: usize, max: usize },
    #[error("the atoms form {0} separate fragments")]
    Disconnected(usize),
    #[error("atom {index} ({element}) carries bond order {bonds}, more than its valence {valence}")]
    OverValent {
        index: usize,
        element: String,
        bonds: usize,
        valence: u8,
    },
    #[error("atom {index} ({element}) is not part of any recognised group")]
    UnrecognizedHeteroatom { index: usize, element: String },
    #[error("the carbon skeleton has {0} independent rings sharing atoms; fused, bridged and spiro systems are not supported")]
    Polycyclic(usize),
    #[error("no backbone could be selected for the carbon skeleton")]
    NoBackbone,
    #[error("backbone of {0} carbons has no root name")]
    BackboneTooLong(usize),
    #[error("the carbon skeleton splits into {0} fragments that no bridging group joins")]
    FragmentedSkeleton(usize),
    #[error("{group} at atom {anchor} links two carbons of the same fragment")]
    InternalBridge { group: String, anchor: usize },
    #[error("{0} identical prefixes have no multiplying prefix")]
    MultiplicityTooHigh(usize),
}
