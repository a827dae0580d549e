//! Parser state: paragraph numbering, block nesting and `if` dependencies.
//!
//! Block nesting and dependencies are two independent stacks. An `endif` is
//! not checked against the `menu` or `choice` it appears in.

use crate::error::{KconfigError, Location, Result};

/// Bounds on nesting and dependency depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum paragraph depth, the root level included.
    pub max_nesting: usize,
    /// Maximum number of `if` blocks open at once.
    pub max_dependencies: usize,
}

impl Limits {
    /// Highest accepted `max_nesting`. The walk recurses once per open block.
    pub const NESTING_CEILING: usize = 256;
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_nesting: 100,
            max_dependencies: 100,
        }
    }
}

/// Conditions of the `if` blocks enclosing the current line, outermost first.
#[derive(Debug, Clone)]
pub struct DependencyStack {
    conditions: Vec<String>,
    limit: usize,
}

impl DependencyStack {
    pub fn new(limit: usize) -> Self {
        Self {
            conditions: Vec::new(),
            limit,
        }
    }

    /// Opens an `if` block.
    ///
    /// # Errors
    ///
    /// Returns [`KconfigError::TooManyDependencies`] if the stack is full.
    pub fn push(&mut self, condition: &str, location: &Location) -> Result<()> {
        if self.conditions.len() >= self.limit {
            return Err(KconfigError::TooManyDependencies {
                location: location.clone(),
                limit: self.limit,
            });
        }
        self.conditions.push(condition.to_string());
        Ok(())
    }

    /// Closes the innermost `if` block and returns its condition.
    ///
    /// # Errors
    ///
    /// Returns [`KconfigError::DependencyUnderflow`] if no block is open.
    pub fn pop(&mut self, location: &Location) -> Result<String> {
        self.conditions
            .pop()
            .ok_or_else(|| KconfigError::DependencyUnderflow {
                location: location.clone(),
            })
    }

    pub fn depth(&self) -> usize {
        self.conditions.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.conditions
    }
}

/// Paragraph counters per depth, the choice flag and anchor counters.
///
/// Entering a depth seeds its counter at 1. Leaving a depth advances the
/// parent's counter, never the closed one's.
#[derive(Debug, Clone)]
pub struct NestingState {
    paranum: Vec<u32>,
    limit: usize,
    in_choice: usize,
    menu_number: usize,
    choice_number: usize,
}

impl NestingState {
    /// Creates the state with at most `limit` levels, capped at
    /// [`Limits::NESTING_CEILING`].
    pub fn new(limit: usize) -> Self {
        Self {
            paranum: Vec::new(),
            limit: limit.min(Limits::NESTING_CEILING),
            in_choice: 0,
            menu_number: 0,
            choice_number: 0,
        }
    }

    /// Number of open levels, the root level included.
    pub fn depth(&self) -> usize {
        self.paranum.len()
    }

    /// Opens a new depth with its counter at 1.
    ///
    /// # Errors
    ///
    /// Returns [`KconfigError::NestingTooDeep`] if the limit is reached.
    pub fn enter(&mut self, location: &Location) -> Result<()> {
        if self.paranum.len() >= self.limit {
            return Err(KconfigError::NestingTooDeep {
                location: location.clone(),
                limit: self.limit,
            });
        }
        self.paranum.push(1);
        Ok(())
    }

    /// Closes the current depth and advances the parent's counter.
    ///
    /// # Errors
    ///
    /// Returns [`KconfigError::NestingUnderflow`] if there is no parent, i.e.
    /// when closing the root level.
    pub fn leave(&mut self, location: &Location) -> Result<()> {
        if self.paranum.len() < 2 {
            return Err(KconfigError::NestingUnderflow {
                location: location.clone(),
            });
        }
        self.paranum.pop();
        self.advance();
        Ok(())
    }

    /// Moves the current depth's counter to the next number.
    pub fn advance(&mut self) {
        if let Some(last) = self.paranum.last_mut() {
            *last += 1;
        }
    }

    /// Dotted paragraph number of the current position, e.g. `1.2.3`.
    pub fn paragraph(&self) -> String {
        self.paranum
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Returns a fresh menu anchor id.
    pub fn next_menu_anchor(&mut self) -> usize {
        let id = self.menu_number;
        self.menu_number += 1;
        id
    }

    /// Returns a fresh choice anchor id.
    pub fn next_choice_anchor(&mut self) -> usize {
        let id = self.choice_number;
        self.choice_number += 1;
        id
    }

    pub fn enter_choice(&mut self) {
        self.in_choice += 1;
    }

    pub fn leave_choice(&mut self) {
        self.in_choice = self.in_choice.saturating_sub(1);
    }

    /// Whether the current position is inside at least one `choice` block.
    pub fn in_choice(&self) -> bool {
        self.in_choice > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn here() -> Location {
        Location::new("Kconfig", 1)
    }

    #[test]
    fn test_dependency_push_pop() {
        let mut deps = DependencyStack::new(2);
        deps.push("ARCH_ARM", &here()).unwrap();
        deps.push("!DISABLE_FOO", &here()).unwrap();
        assert_eq!(deps.as_slice(), ["ARCH_ARM", "!DISABLE_FOO"]);

        let err = deps.push("ONE_TOO_MANY", &here()).unwrap_err();
        assert!(matches!(
            err,
            KconfigError::TooManyDependencies { limit: 2, .. }
        ));

        assert_eq!(deps.pop(&here()).unwrap(), "!DISABLE_FOO");
        assert_eq!(deps.pop(&here()).unwrap(), "ARCH_ARM");
        assert_eq!(deps.depth(), 0);
        assert!(matches!(
            deps.pop(&here()),
            Err(KconfigError::DependencyUnderflow { .. })
        ));
    }

    #[test]
    fn test_paragraph_numbering() {
        let mut state = NestingState::new(10);
        state.enter(&here()).unwrap();
        assert_eq!(state.paragraph(), "1");

        state.enter(&here()).unwrap();
        assert_eq!(state.paragraph(), "1.1");
        state.advance();
        assert_eq!(state.paragraph(), "1.2");

        state.leave(&here()).unwrap();
        assert_eq!(state.paragraph(), "2");

        state.enter(&here()).unwrap();
        assert_eq!(state.paragraph(), "2.1");
    }

    #[test]
    fn test_nesting_limits() {
        let mut state = NestingState::new(2);
        state.enter(&here()).unwrap();
        assert!(matches!(
            state.leave(&here()),
            Err(KconfigError::NestingUnderflow { .. })
        ));
        state.enter(&here()).unwrap();
        assert!(matches!(
            state.enter(&here()),
            Err(KconfigError::NestingTooDeep { limit: 2, .. })
        ));
        assert_eq!(state.depth(), 2);
    }

    #[test]
    fn test_nesting_limit_is_capped() {
        let mut state = NestingState::new(1_000_000);
        for _ in 0..Limits::NESTING_CEILING {
            state.enter(&here()).unwrap();
        }
        assert!(matches!(
            state.enter(&here()),
            Err(KconfigError::NestingTooDeep { limit: Limits::NESTING_CEILING, .. })
        ));
    }

    #[test]
    fn test_anchor_counters_are_independent() {
        let mut state = NestingState::new(10);
        assert_eq!(state.next_menu_anchor(), 0);
        assert_eq!(state.next_menu_anchor(), 1);
        assert_eq!(state.next_choice_anchor(), 0);
        assert_eq!(state.next_menu_anchor(), 2);
        assert_eq!(state.next_choice_anchor(), 1);
    }

    #[test]
    fn test_choice_flag_nests() {
        let mut state = NestingState::new(10);
        assert!(!state.in_choice());
        state.enter_choice();
        state.enter_choice();
        state.leave_choice();
        assert!(state.in_choice());
        state.leave_choice();
        assert!(!state.in_choice());
    }
}
