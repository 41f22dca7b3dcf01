use super::*;

impl Element {
    /// Parse an element symbol. Unknown symbols become `Element::Other`.
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol {
            "H" => Element::H,
            "C" => Element::C,
            "O" => Element::O,
            "N" => Element::N,
            "S" => Element::S,
            "F" => Element::F,
            "Cl" => Element::Cl,
            "Br" => Element::Br,
            "I" => Element::I,
            other => Element::Other(Name::new(other)),
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Element::H => "H",
            Element::C => "C",
            Element::O => "O",
            Element::N => "N",
            Element::S => "S",
            Element::F => "F",
            Element::Cl => "Cl",
            Element::Br => "Br",
            Element::I => "I",
            Element::Other(name) => name.as_str(),
        }
    }

    /// Maximum total bond order the element may carry. `None` for unknown
    /// elements, which are never valence-checked.
    pub fn valence_capacity(&self) -> Option<u8> {
        match self {
            Element::H | Element::F | Element::Cl | Element::Br | Element::I => Some(1),
            Element::C => Some(4),
            Element::O => Some(2),
            Element::N => Some(3),
            Element::S => Some(6),
            Element::Other(_) => None,
        }
    }

    /// Valences used to fill implicit hydrogens, lowest first.
    pub fn standard_valences(&self) -> &'static [u8] {
        match self {
            Element::H | Element::F | Element::Cl | Element::Br | Element::I => &[1],
            Element::C => &[4],
            Element::O => &[2],
            Element::N => &[3],
            Element::S => &[2, 4, 6],
            Element::Other(_) => &[],
        }
    }

    pub fn is_carbon(&self) -> bool {
        *self == Element::C
    }

    pub fn is_hydrogen(&self) -> bool {
        *self == Element::H
    }

    pub fn is_halogen(&self) -> bool {
        matches!(self, Element::F | Element::Cl | Element::Br | Element::I)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Element::Other(_))
    }

    /// Name of the free element, used when a molecule is a single atom.
    pub fn spanish_name(&self) -> Option<&'static str> {
        Some(match self {
            Element::H => "hidrógeno",
            Element::C => "carbono",
            Element::O => "oxígeno",
            Element::N => "nitrógeno",
            Element::S => "azufre",
            Element::F => "flúor",
            Element::Cl => "cloro",
            Element::Br => "bromo",
            Element::I => "yodo",
            Element::Other(_) => return None,
        })
    }

    /// Substituent prefix of a halogen (`cloro`, `yodo`, ...).
    pub fn halogen_prefix(&self) -> Option<&'static str> {
        match self {
            Element::F => Some("fluoro"),
            Element::Cl => Some("cloro"),
            Element::Br => Some("bromo"),
            Element::I => Some("yodo"),
            _ => None,
        }
    }

    /// Position in formula output: C, H, O, N, S, halogens, then the rest.
    pub(crate) fn formula_rank(&self) -> usize {
        match self {
            Element::C => 0,
            Element::H => 1,
            Element::O => 2,
            Element::N => 3,
            Element::S => 4,
            Element::F => 5,
            Element::Cl => 6,
            Element::Br => 7,
            Element::I => 8,
            Element::Other(_) => 9,
        }
    }
}

impl From<&str> for Element {
    fn from(symbol: &str) -> Self {
        Element::from_symbol(symbol)
    }
}

impl From<String> for Element {
    fn from(symbol: String) -> Self {
        Element::from_symbol(&symbol)
    }
}

impl From<Element> for String {
    fn from(element: Element) -> Self {
        element.symbol().to_string()
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
