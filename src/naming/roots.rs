use crate::NamingError;

/// Longest backbone with a stem.
pub const MAX_STEM: usize = 15;

const STEMS: [&str; MAX_STEM] = [
    "met", "et", "prop", "but", "pent", "hex", "hept", "oct", "non", "dec", "undec", "dodec", "tridec",
    "tetradec", "pentadec",
];

const MULTIPLIERS: [&str; 10] = ["", "di", "tri", "tetra", "penta", "hexa", "hepta", "octa", "nona", "deca"];

pub fn stem(carbons: usize) -> Result<&'static str, NamingError> {
    carbons
        .checked_sub(1)
        .and_then(|i| STEMS.get(i))
        .copied()
        .ok_or(NamingError::BackboneTooLong(carbons))
}

/// `di`, `tri`, ... for a count of identical items; empty for one.
pub fn multiplier(count: usize) -> Result<&'static str, NamingError> {
    count
        .checked_sub(1)
        .and_then(|i| MULTIPLIERS.get(i))
        .copied()
        .ok_or(NamingError::MultiplicityTooHigh(count))
}

pub fn join_locants(locants: &[usize]) -> String {
    locants
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Multiple-bond locants of a numbered backbone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unsaturation {
    pub doubles: Vec<usize>,
    pub triples: Vec<usize>,
}

impl Unsaturation {
    pub fn is_empty(&self) -> bool {
        self.doubles.is_empty() && self.triples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.doubles.len() + self.triples.len()
    }

    pub fn all(&self) -> Vec<usize> {
        let mut all: Vec<usize> = self.doubles.iter().chain(&self.triples).copied().collect();
        all.sort_unstable();
        all
    }

    /// `-2-en`, `a-1,3-dien`, `-1-en-4-in`; the leading `a` goes on the stem
    /// when the first infix is multiplied.
    fn infix(&self, show_locants: bool) -> Result<String, NamingError> {
        let mut out = String::new();
        let mut first = true;
        for (locants, ending) in [(&self.doubles, "en"), (&self.triples, "in")] {
            if locants.is_empty() {
                continue;
            }
            let mult = multiplier(locants.len())?;
            if first && !mult.is_empty() {
                out.push('a');
            }
            first = false;
            if show_locants {
                out.push_str(&format!("-{}-", join_locants(locants)));
            }
            out.push_str(mult);
            out.push_str(ending);
        }
        Ok(out)
    }
}

/// Stem plus saturation infix, without the final vowel: `butan`,
/// `but-2-en`, `ciclohexa-1,3-dien`.
pub fn hydride(length: usize, ring: bool, unsaturation: &Unsaturation, show_locants: bool) -> Result<String, NamingError> {
    let mut out = String::new();
    if ring {
        out.push_str("ciclo");
    }
    out.push_str(stem(length)?);
    if unsaturation.is_empty() {
        out.push_str("an");
    } else {
        out.push_str(&unsaturation.infix(show_locants)?);
    }
    Ok(out)
}

/// Substituent core: `metil`, `prop-2-enil`, `ciclohexil`, `etilideno`.
pub fn substituent_core(
    length: usize,
    ring: bool,
    unsaturation: &Unsaturation,
    show_locants: bool,
    ending: &str,
) -> Result<String, NamingError> {
    let mut out = String::new();
    if ring {
        out.push_str("ciclo");
    }
    out.push_str(stem(length)?);
    out.push_str(&unsaturation.infix(show_locants)?);
    out.push_str(ending);
    Ok(out)
}

fn starts_with_vowel(s: &str) -> bool {
    s.starts_with(['a', 'e', 'i', 'o', 'u'])
}

/// Join a hydride and a suffix. The root keeps its `o` before a consonant
/// (`butanotiol`, `propano-1,2-diol`) and drops it before a vowel
/// (`butan-2-ol`, `butanal`).
pub fn attach_suffix(hydride: &str, suffix: &str, locants: Option<&str>) -> String {
    let joint = if starts_with_vowel(suffix) { "" } else { "o" };
    match locants {
        Some(locants) => format!("{hydride}{joint}-{locants}-{suffix}"),
        None => format!("{hydride}{joint}{suffix}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stems() {
        assert_eq!(stem(1), Ok("met"));
        assert_eq!(stem(15), Ok("pentadec"));
        assert_eq!(stem(16), Err(NamingError::BackboneTooLong(16)));
        assert_eq!(stem(0), Err(NamingError::BackboneTooLong(0)));
    }

    #[test]
    fn test_multipliers() {
        assert_eq!(multiplier(1), Ok(""));
        assert_eq!(multiplier(4), Ok("tetra"));
        assert_eq!(multiplier(10), Ok("deca"));
        assert!(multiplier(11).is_err());
    }

    #[test]
    fn test_hydrides() {
        let none = Unsaturation::default();
        assert_eq!(hydride(4, false, &none, true).unwrap(), "butan");
        assert_eq!(hydride(6, true, &none, true).unwrap(), "ciclohexan");

        let diene = Unsaturation {
            doubles: vec![1, 3],
            triples: vec![],
        };
        assert_eq!(hydride(4, false, &diene, true).unwrap(), "buta-1,3-dien");

        let enyne = Unsaturation {
            doubles: vec![1],
            triples: vec![4],
        };
        assert_eq!(hydride(5, false, &enyne, true).unwrap(), "pent-1-en-4-in");

        let ene = Unsaturation {
            doubles: vec![1],
            triples: vec![],
        };
        assert_eq!(hydride(2, false, &ene, false).unwrap(), "eten");
    }

    #[test]
    fn test_suffix_vowel_rule() {
        assert_eq!(attach_suffix("butan", "ol", Some("2")), "butan-2-ol");
        assert_eq!(attach_suffix("butan", "tiol", Some("2")), "butano-2-tiol");
        assert_eq!(attach_suffix("propan", "diol", Some("1,2")), "propano-1,2-diol");
        assert_eq!(attach_suffix("butan", "al", None), "butanal");
        assert_eq!(attach_suffix("butan", "dioico", None), "butanodioico");
        assert_eq!(attach_suffix("propan", "amina", Some("1")), "propan-1-amina");
    }
}
