//! Pre-order traversal of the syntax tree.
//!
//! Rules implement [`Visitor`] and drive it with the `walk_*` free
//! functions. Returning `false` from a visit method skips that node's
//! children; every node is otherwise visited exactly once.

use crate::ast::{Block, Decl, Expr, File, Stmt};

/// A pre-order syntax tree visitor.
///
/// Both methods default to descending into children, so a visitor only
/// overrides what it cares about.
pub trait Visitor {
    /// Called for every statement. Return `false` to skip its children.
    fn visit_stmt(&mut self, _stmt: &Stmt) -> bool {
        true
    }

    /// Called for every expression. Return `false` to skip its children.
    fn visit_expr(&mut self, _expr: &Expr) -> bool {
        true
    }
}

/// Walks every declaration of a file.
pub fn walk_file<V: Visitor>(v: &mut V, file: &File) {
    for decl in &file.decls {
        walk_decl(v, decl);
    }
}

/// Walks a single declaration.
pub fn walk_decl<V: Visitor>(v: &mut V, decl: &Decl) {
    match decl {
        Decl::Func(f) => {
            if let Some(body) = &f.body {
                walk_block(v, body);
            }
        }
        Decl::Var(var) => {
            for value in &var.values {
                walk_expr(v, value);
            }
        }
        Decl::Type(_) => {}
    }
}

/// Walks every statement of a block.
pub fn walk_block<V: Visitor>(v: &mut V, block: &Block) {
    for stmt in &block.stmts {
        walk_stmt(v, stmt);
    }
}

/// Walks a statement and, unless the visitor declines, its children.
pub fn walk_stmt<V: Visitor>(v: &mut V, stmt: &Stmt) {
    if !v.visit_stmt(stmt) {
        return;
    }
    match stmt {
        Stmt::Block(b) => walk_block(v, b),
        Stmt::If(i) => {
            if let Some(init) = &i.init {
                walk_stmt(v, init);
            }
            walk_expr(v, &i.cond);
            walk_block(v, &i.then);
            if let Some(els) = &i.els {
                walk_stmt(v, els);
            }
        }
        Stmt::Switch(s) => {
            if let Some(init) = &s.init {
                walk_stmt(v, init);
            }
            if let Some(tag) = &s.tag {
                walk_expr(v, tag);
            }
            for case in &s.cases {
                for e in &case.exprs {
                    walk_expr(v, e);
                }
                for st in &case.body {
                    walk_stmt(v, st);
                }
            }
        }
        Stmt::For(f) => {
            if let Some(init) = &f.init {
                walk_stmt(v, init);
            }
            if let Some(cond) = &f.cond {
                walk_expr(v, cond);
            }
            if let Some(post) = &f.post {
                walk_stmt(v, post);
            }
            walk_block(v, &f.body);
        }
        Stmt::Assign { lhs, rhs, .. } => {
            for e in lhs {
                walk_expr(v, e);
            }
            for e in rhs {
                walk_expr(v, e);
            }
        }
        Stmt::Var(var) => {
            for value in &var.values {
                walk_expr(v, value);
            }
        }
        Stmt::Return { results, .. } => {
            for e in results {
                walk_expr(v, e);
            }
        }
        Stmt::Expr(e) => walk_expr(v, e),
        Stmt::Fallthrough { .. } | Stmt::Empty { .. } => {}
    }
}

/// Walks an expression and, unless the visitor declines, its children.
pub fn walk_expr<V: Visitor>(v: &mut V, expr: &Expr) {
    if !v.visit_expr(expr) {
        return;
    }
    match expr {
        Expr::Ident(_) | Expr::Lit { .. } => {}
        Expr::Call { func, args, .. } => {
            walk_expr(v, func);
            for a in args {
                walk_expr(v, a);
            }
        }
        Expr::Binary { lhs, rhs, .. } => {
            walk_expr(v, lhs);
            walk_expr(v, rhs);
        }
        Expr::Unary { expr, .. } | Expr::Paren { expr, .. } => walk_expr(v, expr),
        Expr::Selector { expr, .. } => walk_expr(v, expr),
        Expr::Index { expr, index, .. } => {
            walk_expr(v, expr);
            walk_expr(v, index);
        }
    }
}

/// Returns `true` if the expression contains a call anywhere in its subtree.
///
/// Used by the duplicate-branch rules: a call in the guarding condition can
/// yield different results across branches, so a match there only lowers
/// confidence instead of being reported at full strength.
pub fn contains_call(expr: &Expr) -> bool {
    struct CallFinder {
        found: bool,
    }
    impl Visitor for CallFinder {
        fn visit_expr(&mut self, expr: &Expr) -> bool {
            if matches!(expr, Expr::Call { .. }) {
                self.found = true;
            }
            !self.found
        }
    }
    let mut finder = CallFinder { found: false };
    walk_expr(&mut finder, expr);
    finder.found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, Block, Ident, IfStmt};
    use gosling_source::Span;

    fn ident(name: &str) -> Expr {
        Expr::Ident(Ident {
            name: name.to_string(),
            span: Span::DUMMY,
        })
    }

    fn call(name: &str) -> Expr {
        Expr::Call {
            func: Box::new(ident(name)),
            args: Vec::new(),
            span: Span::DUMMY,
        }
    }

    struct StmtCounter {
        count: usize,
    }
    impl Visitor for StmtCounter {
        fn visit_stmt(&mut self, _stmt: &Stmt) -> bool {
            self.count += 1;
            true
        }
    }

    #[test]
    fn visits_nested_statements_once() {
        // if a { if b { } }
        let inner = Stmt::If(IfStmt {
            init: None,
            cond: ident("b"),
            then: Block {
                stmts: Vec::new(),
                span: Span::DUMMY,
            },
            els: None,
            span: Span::DUMMY,
        });
        let outer = Stmt::If(IfStmt {
            init: None,
            cond: ident("a"),
            then: Block {
                stmts: vec![inner],
                span: Span::DUMMY,
            },
            els: None,
            span: Span::DUMMY,
        });
        let mut counter = StmtCounter { count: 0 };
        walk_stmt(&mut counter, &outer);
        assert_eq!(counter.count, 2);
    }

    #[test]
    fn contains_call_direct() {
        assert!(contains_call(&call("f")));
        assert!(!contains_call(&ident("x")));
    }

    #[test]
    fn contains_call_nested_in_binary() {
        let e = Expr::Binary {
            op: BinaryOp::Gt,
            lhs: Box::new(call("f")),
            rhs: Box::new(ident("y")),
            span: Span::DUMMY,
        };
        assert!(contains_call(&e));
    }

    #[test]
    fn skip_children_on_false() {
        struct SkipAll {
            count: usize,
        }
        impl Visitor for SkipAll {
            fn visit_stmt(&mut self, _stmt: &Stmt) -> bool {
                self.count += 1;
                false
            }
        }
        let block = Stmt::Block(Block {
            stmts: vec![Stmt::Empty { span: Span::DUMMY }],
            span: Span::DUMMY,
        });
        let mut v = SkipAll { count: 0 };
        walk_stmt(&mut v, &block);
        assert_eq!(v.count, 1, "children skipped when visit returns false");
    }
}
