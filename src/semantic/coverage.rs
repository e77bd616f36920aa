//! Match coverage tracking.
//!
//! Coverage tracks the cases of a match subject that no previous case has
//! matched yet. Only boolean and enumeration subjects have enumerable
//! cases; any other subject gets the sentinel case "all", which no single
//! non-wildcard pattern ever covers.

use std::collections::HashSet;

use tracing::trace;

use crate::ast::definitions::ClassMember;
use crate::ast::types::Type;

use super::symbols;

/// The set of case names a match has not yet covered.
#[derive(Debug)]
pub struct MatchCoverage {
    not_covered_cases: HashSet<String>,
}

impl MatchCoverage {
    pub fn new(subject_type: &Type) -> Self {
        let mut not_covered_cases = HashSet::new();
        if subject_type.is_boolean() {
            not_covered_cases.insert(String::from(symbols::BOOL_TRUE_CASE_NAME));
            not_covered_cases.insert(String::from(symbols::BOOL_FALSE_CASE_NAME));
        } else if subject_type.is_enumeration() {
            if let Some(subject_class) = subject_type.get_class() {
                for member in subject_class.borrow().get_members() {
                    if let ClassMember::Method(method) = member {
                        if method.is_enum_constructor() {
                            not_covered_cases.insert(String::from(method.get_name()));
                        }
                    }
                }
            }
        } else {
            not_covered_cases.insert(String::from("all"));
        }
        MatchCoverage { not_covered_cases }
    }

    pub fn is_case_covered(&self, case_name: &str) -> bool {
        !self.not_covered_cases.contains(case_name)
    }

    pub fn are_all_cases_covered(&self) -> bool {
        self.not_covered_cases.is_empty()
    }

    pub fn mark_case_as_covered(&mut self, case_name: &str) {
        trace!(case_name, "marking match case as covered");
        self.not_covered_cases.remove(case_name);
    }
}
