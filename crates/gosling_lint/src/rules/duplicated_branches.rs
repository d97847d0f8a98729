//! Structural-hash detection of duplicated conditional branches.
//!
//! Covers four shapes: if/else-if chains, plain if/else sibling pairs,
//! switch case bodies, and switch case conditions. A branch body is hashed
//! by rendering its statement list to a canonical single-line form; two
//! branches with equal hashes are structurally identical.

use crate::finding::{Category, Finding};
use crate::rule::Rule;
use crate::unit::Unit;
use gosling_common::ContentHash;
use gosling_source::Span;
use gosling_syntax::{
    contains_call, render_expr, render_stmts, walk_block, Decl, IfStmt, Stmt, SwitchStmt, Visitor,
};
use std::collections::HashSet;

/// Reports structurally identical branches of one conditional construct.
#[derive(Default)]
pub struct DuplicatedBranches;

impl Rule for DuplicatedBranches {
    fn name(&self) -> &'static str {
        "duplicated-branches"
    }

    fn category(&self) -> Category {
        Category::Logic
    }

    fn apply(&self, unit: &Unit, _args: &[toml::Value]) -> Vec<Finding> {
        let mut findings = Vec::new();
        for decl in &unit.ast.decls {
            let Decl::Func(f) = decl else { continue };
            let Some(body) = &f.body else { continue };
            let mut visitor = BranchVisitor {
                unit,
                findings: &mut findings,
                chained: HashSet::new(),
            };
            walk_block(&mut visitor, body);
        }
        findings
    }
}

struct BranchVisitor<'a> {
    unit: &'a Unit,
    findings: &'a mut Vec<Finding>,
    /// Spans of `else if` links already consumed by a chain-level check.
    chained: HashSet<Span>,
}

impl Visitor for BranchVisitor<'_> {
    fn visit_stmt(&mut self, stmt: &Stmt) -> bool {
        match stmt {
            Stmt::If(head) if !self.chained.contains(&head.span) => {
                if head.chains() {
                    self.check_chain(head);
                } else {
                    self.check_pair(head);
                }
            }
            Stmt::Switch(switch) => {
                self.check_case_bodies(switch);
                self.check_case_conditions(switch);
            }
            _ => {}
        }
        // Nested conditionals inside a checked branch are still visited.
        true
    }
}

impl BranchVisitor<'_> {
    fn emit(&mut self, span: Span, message: String, confidence: f64) {
        let (start, end) = self.unit.span_locations(span);
        self.findings.push(
            Finding::new("duplicated-branches", Category::Logic, message, start, end)
                .with_confidence(confidence),
        );
    }

    fn line_of(&self, span: Span) -> u32 {
        self.unit.locate(span.start).line
    }

    /// Checks a full if/else-if chain: every branch whose guard has no init
    /// statement participates, plus the final `else` block if present.
    fn check_chain(&mut self, head: &IfStmt) {
        let mut branches: Vec<(ContentHash, Span)> = Vec::new();
        let mut guard_has_call = false;
        let mut cur = head;
        loop {
            guard_has_call |= contains_call(&cur.cond);
            if cur.init.is_none() {
                branches.push((stmt_list_hash(&cur.then.stmts), cur.then.span));
            }
            match cur.els.as_deref() {
                Some(Stmt::If(next)) => {
                    self.chained.insert(next.span);
                    cur = next;
                }
                Some(Stmt::Block(tail)) => {
                    branches.push((stmt_list_hash(&tail.stmts), tail.span));
                    break;
                }
                _ => break,
            }
        }

        let confidence = if guard_has_call { 0.5 } else { 1.0 };
        for i in 1..branches.len() {
            let (hash, span) = branches[i];
            if let Some((_, first)) = branches[..i].iter().find(|(h, _)| *h == hash) {
                let message = format!(
                    "this branch is identical to the branch on line {}",
                    self.line_of(*first)
                );
                self.emit(span, message, confidence);
            }
        }
    }

    /// Checks a plain if/else pair. A chain continuing into `else if` is
    /// handled by [`Self::check_chain`]; a guard with an init statement is
    /// skipped.
    fn check_pair(&mut self, head: &IfStmt) {
        if head.init.is_some() {
            return;
        }
        let Some(Stmt::Block(els)) = head.els.as_deref() else {
            return;
        };
        if stmt_list_hash(&head.then.stmts) != stmt_list_hash(&els.stmts) {
            return;
        }
        let confidence = if contains_call(&head.cond) { 0.5 } else { 1.0 };
        let message = format!(
            "both branches of the if are identical (lines {} and {})",
            self.line_of(head.then.span),
            self.line_of(els.span)
        );
        self.emit(head.span, message, confidence);
    }

    /// Flags a case whose body hash matches an earlier case of the same
    /// switch. Cases ending in `fallthrough` have incomplete bodies and are
    /// skipped.
    fn check_case_bodies(&mut self, switch: &SwitchStmt) {
        let tag_has_call = switch.tag.as_ref().is_some_and(contains_call);
        let confidence = if tag_has_call { 0.5 } else { 1.0 };
        let mut seen: Vec<(ContentHash, Span)> = Vec::new();
        for case in &switch.cases {
            if case.falls_through() {
                continue;
            }
            let hash = stmt_list_hash(&case.body);
            if let Some((_, first)) = seen.iter().find(|(h, _)| *h == hash) {
                let message = format!(
                    "this case is identical to the case on line {}",
                    self.line_of(*first)
                );
                self.emit(case.span, message, confidence);
            } else {
                seen.push((hash, case.span));
            }
        }
    }

    /// Flags a later case condition whose hash matches any earlier case's.
    fn check_case_conditions(&mut self, switch: &SwitchStmt) {
        let mut seen: Vec<(ContentHash, Span)> = Vec::new();
        for case in &switch.cases {
            for expr in &case.exprs {
                let hash = ContentHash::from_text(&render_expr(expr));
                if let Some((_, first)) = seen.iter().find(|(h, _)| *h == hash) {
                    let confidence = if contains_call(expr) { 0.5 } else { 1.0 };
                    let message = format!(
                        "this case condition is a duplicate of the condition on line {}",
                        self.line_of(*first)
                    );
                    self.emit(expr.span(), message, confidence);
                } else {
                    seen.push((hash, expr.span()));
                }
            }
        }
    }
}

fn stmt_list_hash(stmts: &[Stmt]) -> ContentHash {
    ContentHash::from_text(&render_stmts(stmts))
}
