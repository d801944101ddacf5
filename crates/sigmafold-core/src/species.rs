//! Ion species registry and alias resolution.
//!
//! Every textual notation handled by the reaction-name layer funnels into
//! one canonical symbol per isotope, so the rest of the crate only ever
//! deals with [`Species`] values.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeciesError {
    #[error("unknown species token '{token}'")]
    UnknownSpecies { token: String },
}

/// Canonical ion species. Variants are ordered by ion mass, so the derived
/// ordering doubles as the mass ordering used for canonical reaction names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Species {
    Proton,
    Neutron,
    Deuteron,
    Helion,
    Triton,
    Alpha,
    Lithium6,
    Lithium7,
    Beryllium7,
    Boron11,
}

impl Species {
    pub const ALL: [Species; 10] = [
        Species::Proton,
        Species::Neutron,
        Species::Deuteron,
        Species::Helion,
        Species::Triton,
        Species::Alpha,
        Species::Lithium6,
        Species::Lithium7,
        Species::Beryllium7,
        Species::Boron11,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Species::Proton => "p",
            Species::Neutron => "n",
            Species::Deuteron => "D",
            Species::Helion => "3He",
            Species::Triton => "T",
            Species::Alpha => "4He",
            Species::Lithium6 => "6Li",
            Species::Lithium7 => "7Li",
            Species::Beryllium7 => "7Be",
            Species::Boron11 => "11B",
        }
    }

    /// Ion mass in amu. These reference values order reactants and
    /// discriminate branches; they are independent of any loaded dataset so
    /// canonical names never vary with the data in use.
    pub fn mass_amu(&self) -> f64 {
        match self {
            Species::Proton => 1.007_276_466_621,
            Species::Neutron => 1.008_664_915_95,
            Species::Deuteron => 2.013_553_212_745,
            Species::Helion => 3.014_932_247_175,
            Species::Triton => 3.015_500_716_21,
            Species::Alpha => 4.001_506_179_127,
            Species::Lithium6 => 6.013_477_1,
            Species::Lithium7 => 7.014_357_7,
            Species::Beryllium7 => 7.014_734_4,
            Species::Boron11 => 11.006_562_3,
        }
    }

    /// Resolves one token to a species. Case-sensitive where the
    /// distinction carries meaning (`He` is the helion shorthand, `h` the
    /// nickname); Unicode superscripts and `α` are folded first.
    pub fn resolve(token: &str) -> Result<Species, SpeciesError> {
        let normalized = normalize_symbol_text(token);
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == normalized)
            .map(|(_, species)| *species)
            .ok_or_else(|| SpeciesError::UnknownSpecies {
                token: token.to_string(),
            })
    }
}

impl fmt::Display for Species {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.symbol())
    }
}

const ALIASES: &[(&str, Species)] = &[
    ("p", Species::Proton),
    ("1H", Species::Proton),
    ("n", Species::Neutron),
    ("D", Species::Deuteron),
    ("d", Species::Deuteron),
    ("2H", Species::Deuteron),
    ("T", Species::Triton),
    ("t", Species::Triton),
    ("3H", Species::Triton),
    ("h", Species::Helion),
    ("3He", Species::Helion),
    ("He3", Species::Helion),
    ("He", Species::Helion),
    ("a", Species::Alpha),
    ("4He", Species::Alpha),
    ("He4", Species::Alpha),
    ("6Li", Species::Lithium6),
    ("Li6", Species::Lithium6),
    ("Li", Species::Lithium6),
    ("7Li", Species::Lithium7),
    ("Li7", Species::Lithium7),
    ("7Be", Species::Beryllium7),
    ("Be7", Species::Beryllium7),
    ("Be", Species::Beryllium7),
    ("11B", Species::Boron11),
    ("B11", Species::Boron11),
    ("B", Species::Boron11),
];

/// Folds Unicode superscript digits to ASCII digits and `α` to the alpha
/// nickname. Idempotent, so callers may apply it before or after splitting.
pub(crate) fn normalize_symbol_text(text: &str) -> String {
    text.chars()
        .map(|character| match character {
            '⁰' => '0',
            '¹' => '1',
            '²' => '2',
            '³' => '3',
            '⁴' => '4',
            '⁵' => '5',
            '⁶' => '6',
            '⁷' => '7',
            '⁸' => '8',
            '⁹' => '9',
            'α' => 'a',
            other => other,
        })
        .collect()
}
