//! Tokenizer for the accepted reaction-name notations.
//!
//! Turns one input string into reactant and product species lists; the
//! registry lookup and canonical naming live in the parent module.

use super::ReactionNameError;
use crate::species::{normalize_symbol_text, Species};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ParsedReaction {
    pub(super) reactants: Vec<Species>,
    pub(super) products: Vec<Species>,
}

pub(super) fn parse_reaction(input: &str) -> Result<ParsedReaction, ReactionNameError> {
    let normalized = normalize_equation(input);
    if normalized.contains('(') {
        return parse_bracket_form(&normalized, input);
    }
    parse_equation_form(&normalized, input)
}

/// Folds superscripts and `α`, then rewrites every accepted arrow spelling
/// to a single internal delimiter. `-->` must be rewritten before `->`.
fn normalize_equation(input: &str) -> String {
    normalize_symbol_text(input)
        .replace("-->", "→")
        .replace("->", "→")
}

/// `target(beam,ejectiles)residual` nuclear notation, e.g. `t(d,n)a` or
/// `6Li(d,p)7Li`. The ejectile field is a compact run of optionally
/// digit-multiplied nicknames such as `pn` or `2n`.
fn parse_bracket_form(normalized: &str, input: &str) -> Result<ParsedReaction, ReactionNameError> {
    let (target_token, rest) = normalized
        .split_once('(')
        .ok_or_else(|| unresolved(input))?;
    let (inside, residual_token) = rest.split_once(')').ok_or_else(|| unresolved(input))?;
    let (beam_token, ejectile_run) = inside.split_once(',').ok_or_else(|| unresolved(input))?;

    let target_token = target_token.trim();
    let beam_token = beam_token.trim();
    let residual_token = residual_token.trim();
    if target_token.is_empty() || beam_token.is_empty() || residual_token.is_empty() {
        return Err(unresolved(input));
    }

    let target = Species::resolve(target_token)?;
    let beam = Species::resolve(beam_token)?;

    let mut products = Vec::new();
    parse_ejectile_run(ejectile_run.trim(), &mut products, input)?;
    products.push(Species::resolve(residual_token)?);

    Ok(ParsedReaction {
        reactants: vec![target, beam],
        products,
    })
}

fn parse_ejectile_run(
    run: &str,
    products: &mut Vec<Species>,
    input: &str,
) -> Result<(), ReactionNameError> {
    if run.is_empty() {
        return Err(unresolved(input));
    }

    let mut count: usize = 0;
    for character in run.chars() {
        if let Some(digit) = character.to_digit(10) {
            count = count * 10 + digit as usize;
            continue;
        }
        if !character.is_ascii_alphabetic() {
            return Err(unresolved(input));
        }
        let species = Species::resolve(&character.to_string())?;
        push_repeated(products, species, count.max(1), input)?;
        count = 0;
    }

    // trailing multiplier with no species after it
    if count != 0 {
        return Err(unresolved(input));
    }
    Ok(())
}

/// Additive and arrow equations: `D+T`, `D+T→n+α`, `T + T → a + 2n`,
/// plus the single-token shorthand (`DT`, `DHe3`, `2T`).
fn parse_equation_form(normalized: &str, input: &str) -> Result<ParsedReaction, ReactionNameError> {
    let (reactant_side, product_side) = match normalized.split_once('→') {
        Some((left, right)) => (left, Some(right)),
        None => (normalized, None),
    };

    let reactants = parse_side(reactant_side, true, input)?;
    let products = match product_side {
        Some(side) => parse_side(side, false, input)?,
        None => Vec::new(),
    };

    Ok(ParsedReaction {
        reactants,
        products,
    })
}

fn parse_side(
    side: &str,
    reactant_side: bool,
    input: &str,
) -> Result<Vec<Species>, ReactionNameError> {
    if side.trim().is_empty() {
        return Err(unresolved(input));
    }

    let pieces: Vec<&str> = side.split('+').collect();
    let allow_shorthand = reactant_side && pieces.len() == 1;

    let mut species = Vec::new();
    for piece in pieces {
        parse_piece(piece.trim(), allow_shorthand, &mut species, input)?;
    }
    Ok(species)
}

fn parse_piece(
    piece: &str,
    allow_shorthand: bool,
    out: &mut Vec<Species>,
    input: &str,
) -> Result<(), ReactionNameError> {
    let words: Vec<&str> = piece.split_whitespace().collect();
    match words.as_slice() {
        [] => Err(unresolved(input)),
        [token] => parse_token(token, allow_shorthand, out, input),
        [count, token] if count.chars().all(|c| c.is_ascii_digit()) => {
            let count = parse_count(count, input)?;
            let species = Species::resolve(token)?;
            push_repeated(out, species, count, input)
        }
        _ => Err(unresolved(input)),
    }
}

fn parse_token(
    token: &str,
    allow_shorthand: bool,
    out: &mut Vec<Species>,
    input: &str,
) -> Result<(), ReactionNameError> {
    // Direct alias hit wins, so `3He`, `2H`, and `11B` never split.
    let species_error = match Species::resolve(token) {
        Ok(species) => {
            out.push(species);
            return Ok(());
        }
        Err(error) => error,
    };

    // Leading-integer multiplicity: `2T`, `2n`, `3a`.
    let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
    if !digits.is_empty() && digits.len() < token.len() {
        if let Ok(species) = Species::resolve(&token[digits.len()..]) {
            let count = parse_count(&digits, input)?;
            return push_repeated(out, species, count, input);
        }
    }

    // Dimer shorthand: a lone reactant token splitting into two species,
    // `DT`, `DHe3`, `pB11`.
    if allow_shorthand {
        for (split, _) in token.char_indices().skip(1) {
            let (left, right) = token.split_at(split);
            if let (Ok(first), Ok(second)) = (Species::resolve(left), Species::resolve(right)) {
                out.push(first);
                out.push(second);
                return Ok(());
            }
        }
        return Err(unresolved(input));
    }

    Err(ReactionNameError::from(species_error))
}

fn parse_count(digits: &str, input: &str) -> Result<usize, ReactionNameError> {
    let count: usize = digits.parse().map_err(|_| unresolved(input))?;
    if count == 0 {
        return Err(unresolved(input));
    }
    Ok(count)
}

fn push_repeated(
    out: &mut Vec<Species>,
    species: Species,
    count: usize,
    input: &str,
) -> Result<(), ReactionNameError> {
    // a runaway multiplier is never a plausible reaction equation
    if count > 8 {
        return Err(unresolved(input));
    }
    for _ in 0..count {
        out.push(species);
    }
    Ok(())
}

fn unresolved(input: &str) -> ReactionNameError {
    ReactionNameError::UnresolvedReactionName {
        input: input.to_string(),
    }
}
