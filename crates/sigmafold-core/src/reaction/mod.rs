//! Reaction name resolution.
//!
//! Accepts chemical-style shorthand (`DT`, `pB11`), additive and arrow
//! equations (`D+T→n+α`, `T + T -> a + 2n`), and nuclear notation
//! (`t(d,n)a`), and maps each to exactly one canonical [`ReactionKey`].
//! The entrance channel is written lighter reactant first; channels with
//! more than one measured branch carry the exit channel in the name, e.g.
//! `D+D→p+T` next to `D+D→n+3He`.

mod parser;

use crate::species::{Species, SpeciesError};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReactionNameError {
    #[error(transparent)]
    Species(#[from] SpeciesError),
    #[error("cannot resolve reaction name '{input}'")]
    UnresolvedReactionName { input: String },
}

/// Canonical identifier of one reaction channel. Only produced by
/// [`resolve_reaction`], so every value is backed by a registry entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReactionKey(String);

impl ReactionKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Entrance channel as `(beam, target)`, beam being the lighter ion.
    pub fn reactants(&self) -> (Species, Species) {
        let (channel, _) = self.channel_and_branch();
        (channel.beam, channel.target)
    }

    /// Exit channel of this key's branch, lightest product first.
    pub fn products(&self) -> &'static [Species] {
        let (channel, branch) = self.channel_and_branch();
        channel.branches[branch]
    }

    fn from_channel(channel: &Channel, branch: usize) -> ReactionKey {
        let mut name = format!("{}+{}", channel.beam.symbol(), channel.target.symbol());
        if channel.branches.len() > 1 {
            name.push('→');
            for (index, product) in channel.branches[branch].iter().enumerate() {
                if index > 0 {
                    name.push('+');
                }
                name.push_str(product.symbol());
            }
        }
        ReactionKey(name)
    }

    fn channel_and_branch(&self) -> (&'static Channel, usize) {
        CHANNELS
            .iter()
            .flat_map(|channel| {
                (0..channel.branches.len()).map(move |branch| (channel, branch))
            })
            .find(|(channel, branch)| ReactionKey::from_channel(channel, *branch).0 == self.0)
            .expect("reaction key is always backed by a registry channel")
    }
}

impl fmt::Display for ReactionKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl FromStr for ReactionKey {
    type Err = ReactionNameError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        resolve_reaction(input)
    }
}

struct Channel {
    beam: Species,
    target: Species,
    branches: &'static [&'static [Species]],
}

/// Documented fusion channels. Beam is the lighter reactant; branch
/// product lists are sorted by mass ascending.
const CHANNELS: &[Channel] = &[
    Channel {
        beam: Species::Deuteron,
        target: Species::Triton,
        branches: &[&[Species::Neutron, Species::Alpha]],
    },
    Channel {
        beam: Species::Deuteron,
        target: Species::Helion,
        branches: &[&[Species::Proton, Species::Alpha]],
    },
    Channel {
        beam: Species::Deuteron,
        target: Species::Deuteron,
        branches: &[
            &[Species::Proton, Species::Triton],
            &[Species::Neutron, Species::Helion],
        ],
    },
    Channel {
        beam: Species::Triton,
        target: Species::Triton,
        branches: &[&[Species::Neutron, Species::Neutron, Species::Alpha]],
    },
    Channel {
        beam: Species::Helion,
        target: Species::Triton,
        branches: &[
            &[Species::Proton, Species::Neutron, Species::Alpha],
            &[Species::Deuteron, Species::Alpha],
        ],
    },
    Channel {
        beam: Species::Helion,
        target: Species::Helion,
        branches: &[&[Species::Proton, Species::Proton, Species::Alpha]],
    },
    Channel {
        beam: Species::Proton,
        target: Species::Lithium6,
        branches: &[&[Species::Helion, Species::Alpha]],
    },
    Channel {
        beam: Species::Proton,
        target: Species::Boron11,
        branches: &[&[Species::Alpha, Species::Alpha, Species::Alpha]],
    },
    Channel {
        beam: Species::Deuteron,
        target: Species::Lithium6,
        branches: &[
            &[Species::Alpha, Species::Alpha],
            &[Species::Neutron, Species::Beryllium7],
            &[Species::Proton, Species::Lithium7],
        ],
    },
];

/// Resolves any accepted reaction notation to its canonical key.
///
/// Tokens that fail species lookup surface as
/// [`ReactionNameError::Species`]; inputs that resolve species-wise but
/// match no documented channel, or name a multi-branch channel without
/// identifying the branch, fail with
/// [`ReactionNameError::UnresolvedReactionName`]. Resolving a canonical
/// key returns it unchanged.
pub fn resolve_reaction(input: &str) -> Result<ReactionKey, ReactionNameError> {
    let parsed = parser::parse_reaction(input)?;

    let [first, second] = parsed.reactants.as_slice() else {
        return Err(unresolved(input));
    };
    let (beam, target) = if first <= second {
        (*first, *second)
    } else {
        (*second, *first)
    };

    let channel = CHANNELS
        .iter()
        .find(|channel| channel.beam == beam && channel.target == target)
        .ok_or_else(|| unresolved(input))?;

    let branch = if parsed.products.is_empty() {
        // entrance channel alone only names a reaction when unambiguous
        if channel.branches.len() == 1 {
            0
        } else {
            return Err(unresolved(input));
        }
    } else {
        let mut given = parsed.products;
        given.sort_unstable();
        channel
            .branches
            .iter()
            .position(|branch| *branch == given.as_slice())
            .ok_or_else(|| unresolved(input))?
    };

    Ok(ReactionKey::from_channel(channel, branch))
}

/// Every canonical key in the registry, one per reaction channel branch.
pub fn canonical_keys() -> Vec<ReactionKey> {
    CHANNELS
        .iter()
        .flat_map(|channel| {
            (0..channel.branches.len()).map(move |branch| ReactionKey::from_channel(channel, branch))
        })
        .collect()
}

fn unresolved(input: &str) -> ReactionNameError {
    ReactionNameError::UnresolvedReactionName {
        input: input.to_string(),
    }
}
