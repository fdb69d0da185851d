//! Permission expressions: `edit|rename|view`, `!upload`.
//!
//! Tokens are separated by `|` and optionally prefixed with `!`. There is no
//! escaping, quoting or whitespace trimming; empty tokens (`a||b`, a leading or
//! trailing `|`) are skipped.

use core::str::FromStr;

use serde::Serialize;

use crate::error::EvaluationError;

const SEPARATOR: char = '|';
const NEGATION: char = '!';

/// A single, possibly negated, permission name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PermissionAtom {
    name: String,
    negated: bool,
}

impl PermissionAtom {
    /// Parse one token. Only a single leading `!` is treated as negation.
    pub fn parse(token: &str) -> Result<Self, EvaluationError> {
        let (name, negated) = match token.strip_prefix(NEGATION) {
            Some(rest) => (rest, true),
            None => (token, false),
        };

        if name.is_empty() {
            return Err(EvaluationError::MalformedAtom(token.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            negated,
        })
    }

    pub fn positive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            negated: false,
        }
    }

    pub fn negative(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            negated: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Apply negation to a raw check result.
    pub fn effective(&self, raw: bool) -> bool {
        raw != self.negated
    }
}

impl core::fmt::Display for PermissionAtom {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.negated {
            write!(f, "{NEGATION}{}", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Ordered atoms combined with short-circuit OR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PermissionExpression {
    atoms: Vec<PermissionAtom>,
}

impl PermissionExpression {
    pub fn parse(raw: &str) -> Result<Self, EvaluationError> {
        let atoms = raw
            .split(SEPARATOR)
            .filter(|token| !token.is_empty())
            .map(PermissionAtom::parse)
            .collect::<Result<Vec<_>, _>>()?;

        if atoms.is_empty() {
            return Err(EvaluationError::EmptyExpression);
        }

        Ok(Self { atoms })
    }

    /// Build from already-constructed atoms. An empty list is accepted here and
    /// rejected at evaluation time.
    pub fn from_atoms(atoms: Vec<PermissionAtom>) -> Self {
        Self { atoms }
    }

    pub fn atoms(&self) -> &[PermissionAtom] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

impl FromStr for PermissionExpression {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl core::fmt::Display for PermissionExpression {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (idx, atom) in self.atoms.iter().enumerate() {
            if idx > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            write!(f, "{atom}")?;
        }
        Ok(())
    }
}
