//! Reports parameters and local bindings never referenced after their
//! declaration.

use crate::finding::{Category, Finding};
use crate::rule::Rule;
use crate::unit::Unit;
use gosling_config::ConfigError;
use gosling_source::Span;
use gosling_syntax::{walk_expr, Block, Decl, Expr, Stmt, VarDecl, Visitor};
use regex::Regex;
use std::sync::OnceLock;

/// Shadowing can produce false positives the same-name matching cannot
/// rule out, so findings stay below full confidence.
const CONFIDENCE: f64 = 0.8;

/// Flags parameters and local variables with no later reference.
///
/// Declarations are recorded per lexical scope: entering a block pushes
/// a scope, leaving pops it and reports the bindings still unreferenced.
/// Use detection is plain name matching: an identifier occurrence marks
/// every live binding of that name used, in any scope, which trades some
/// shadowing precision for simplicity. The blank identifier is never
/// tracked, and a configurable allow pattern (default: exactly
/// underscore) exempts matching names regardless of use.
#[derive(Default)]
pub struct UnusedParam {
    allow: OnceLock<Regex>,
}

impl UnusedParam {
    fn is_allowed(&self, name: &str) -> bool {
        match self.allow.get() {
            Some(re) => re.is_match(name),
            None => name == "_",
        }
    }
}

impl Rule for UnusedParam {
    fn name(&self) -> &'static str {
        "unused-param"
    }

    fn category(&self) -> Category {
        Category::Style
    }

    fn configure(&self, args: &[toml::Value]) -> Result<(), ConfigError> {
        let Some(first) = args.first() else {
            return Ok(());
        };
        let pattern = match first {
            toml::Value::String(s) => s.as_str(),
            toml::Value::Table(t) => match t.get("allow-regex").and_then(|v| v.as_str()) {
                Some(s) => s,
                None => {
                    return Err(ConfigError::BadRuleArgument {
                        rule: self.name().to_string(),
                        reason: "expected an allow-regex string".to_string(),
                    })
                }
            },
            other => {
                return Err(ConfigError::BadRuleArgument {
                    rule: self.name().to_string(),
                    reason: format!("expected a string argument, got {}", other.type_str()),
                })
            }
        };
        let re = Regex::new(pattern).map_err(|e| ConfigError::BadRuleArgument {
            rule: self.name().to_string(),
            reason: e.to_string(),
        })?;
        let _ = self.allow.set(re);
        Ok(())
    }

    fn apply(&self, unit: &Unit, _args: &[toml::Value]) -> Vec<Finding> {
        let mut findings = Vec::new();
        for decl in &unit.ast.decls {
            let Decl::Func(f) = decl else { continue };
            let Some(body) = &f.body else { continue };

            let mut tracker = ScopeTracker {
                rule: self,
                unit,
                scopes: Vec::new(),
                findings: &mut findings,
            };
            // Parameters share the function's outermost scope with
            // top-level locals.
            tracker.push_scope();
            for param in &f.params {
                tracker.declare(&param.name, param.span, BindingKind::Parameter);
            }
            for stmt in &body.stmts {
                tracker.scan_stmt(stmt);
            }
            tracker.pop_scope();
        }
        findings
    }
}

#[derive(Clone, Copy)]
enum BindingKind {
    Parameter,
    Variable,
}

impl BindingKind {
    fn label(self) -> &'static str {
        match self {
            BindingKind::Parameter => "parameter",
            BindingKind::Variable => "variable",
        }
    }
}

struct Binding {
    name: String,
    span: Span,
    kind: BindingKind,
}

struct ScopeTracker<'a> {
    rule: &'a UnusedParam,
    unit: &'a Unit,
    scopes: Vec<Vec<Binding>>,
    findings: &'a mut Vec<Finding>,
}

impl ScopeTracker<'_> {
    fn push_scope(&mut self) {
        self.scopes.push(Vec::new());
    }

    /// Pops the innermost scope and reports its still-unreferenced
    /// bindings.
    fn pop_scope(&mut self) {
        let Some(scope) = self.scopes.pop() else { return };
        for binding in scope {
            let (start, end) = self.unit.span_locations(binding.span);
            self.findings.push(
                Finding::new(
                    "unused-param",
                    Category::Style,
                    format!(
                        "{} '{}' seems to be unused, consider removing or renaming it as _",
                        binding.kind.label(),
                        binding.name
                    ),
                    start,
                    end,
                )
                .with_confidence(CONFIDENCE),
            );
        }
    }

    fn declare(&mut self, name: &str, span: Span, kind: BindingKind) {
        if name.is_empty() || name == "_" || self.rule.is_allowed(name) {
            return;
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.push(Binding {
                name: name.to_string(),
                span,
                kind,
            });
        }
    }

    /// Marks every live binding of `name` used, in any scope.
    fn mark_used(&mut self, name: &str) {
        for scope in &mut self.scopes {
            scope.retain(|b| b.name != name);
        }
    }

    fn scan_block(&mut self, block: &Block) {
        self.push_scope();
        for stmt in &block.stmts {
            self.scan_stmt(stmt);
        }
        self.pop_scope();
    }

    fn scan_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(b) => self.scan_block(b),
            Stmt::If(i) => {
                // An init binding is visible across the whole chain.
                self.push_scope();
                if let Some(init) = &i.init {
                    self.scan_stmt(init);
                }
                self.scan_expr(&i.cond);
                self.scan_block(&i.then);
                if let Some(els) = &i.els {
                    self.scan_stmt(els);
                }
                self.pop_scope();
            }
            Stmt::Switch(s) => {
                self.push_scope();
                if let Some(init) = &s.init {
                    self.scan_stmt(init);
                }
                if let Some(tag) = &s.tag {
                    self.scan_expr(tag);
                }
                for case in &s.cases {
                    for expr in &case.exprs {
                        self.scan_expr(expr);
                    }
                    self.push_scope();
                    for st in &case.body {
                        self.scan_stmt(st);
                    }
                    self.pop_scope();
                }
                self.pop_scope();
            }
            Stmt::For(f) => {
                self.push_scope();
                if let Some(init) = &f.init {
                    self.scan_stmt(init);
                }
                if let Some(cond) = &f.cond {
                    self.scan_expr(cond);
                }
                if let Some(post) = &f.post {
                    self.scan_stmt(post);
                }
                self.scan_block(&f.body);
                self.pop_scope();
            }
            Stmt::Assign {
                lhs, rhs, define, ..
            } => {
                for expr in rhs {
                    self.scan_expr(expr);
                }
                for expr in lhs {
                    match expr {
                        Expr::Ident(id) if *define => {
                            self.declare(&id.name, id.span, BindingKind::Variable)
                        }
                        other => self.scan_expr(other),
                    }
                }
            }
            Stmt::Var(v) => self.scan_var(v),
            Stmt::Return { results, .. } => {
                for expr in results {
                    self.scan_expr(expr);
                }
            }
            Stmt::Expr(e) => self.scan_expr(e),
            Stmt::Fallthrough { .. } | Stmt::Empty { .. } => {}
        }
    }

    fn scan_var(&mut self, v: &VarDecl) {
        for value in &v.values {
            self.scan_expr(value);
        }
        for name in &v.names {
            self.declare(&name.name, name.span, BindingKind::Variable);
        }
    }

    fn scan_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }
}

impl Visitor for ScopeTracker<'_> {
    fn visit_expr(&mut self, expr: &Expr) -> bool {
        if let Expr::Ident(id) = expr {
            self.mark_used(&id.name);
        }
        true
    }
}
