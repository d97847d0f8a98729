//! Canonical single-line rendering of syntax nodes.
//!
//! The renderer produces a normalized textual form that is invariant to
//! source formatting: one space between tokens, `;` between statements,
//! no positions. Hashing this rendering gives the structural hash used by
//! the duplicate-branch rules; two fragments render equal iff their token
//! structure is equal.

use crate::ast::{Block, CaseClause, Expr, Stmt, VarDecl};

/// Renders a list of statements joined by `; `.
pub fn render_stmts(stmts: &[Stmt]) -> String {
    stmts.iter().map(render_stmt).collect::<Vec<_>>().join("; ")
}

/// Renders a block as `{ ... }`.
pub fn render_block(block: &Block) -> String {
    if block.stmts.is_empty() {
        "{ }".to_string()
    } else {
        format!("{{ {} }}", render_stmts(&block.stmts))
    }
}

/// Renders a single statement.
pub fn render_stmt(stmt: &Stmt) -> String {
    match stmt {
        Stmt::Block(b) => render_block(b),
        Stmt::If(i) => {
            let mut out = String::from("if ");
            if let Some(init) = &i.init {
                out.push_str(&render_stmt(init));
                out.push_str("; ");
            }
            out.push_str(&render_expr(&i.cond));
            out.push(' ');
            out.push_str(&render_block(&i.then));
            if let Some(els) = &i.els {
                out.push_str(" else ");
                out.push_str(&render_stmt(els));
            }
            out
        }
        Stmt::Switch(s) => {
            let mut out = String::from("switch ");
            if let Some(init) = &s.init {
                out.push_str(&render_stmt(init));
                out.push_str("; ");
            }
            if let Some(tag) = &s.tag {
                out.push_str(&render_expr(tag));
                out.push(' ');
            }
            out.push('{');
            for case in &s.cases {
                out.push(' ');
                out.push_str(&render_case(case));
            }
            out.push_str(" }");
            out
        }
        Stmt::For(f) => {
            let mut out = String::from("for ");
            if let Some(init) = &f.init {
                out.push_str(&render_stmt(init));
                out.push_str("; ");
            }
            if let Some(cond) = &f.cond {
                out.push_str(&render_expr(cond));
                out.push(' ');
            }
            if let Some(post) = &f.post {
                out.push_str("; ");
                out.push_str(&render_stmt(post));
                out.push(' ');
            }
            out.push_str(&render_block(&f.body));
            out
        }
        Stmt::Assign {
            lhs, rhs, define, ..
        } => {
            let op = if *define { ":=" } else { "=" };
            format!("{} {} {}", render_exprs(lhs), op, render_exprs(rhs))
        }
        Stmt::Var(v) => render_var(v),
        Stmt::Return { results, .. } => {
            if results.is_empty() {
                "return".to_string()
            } else {
                format!("return {}", render_exprs(results))
            }
        }
        Stmt::Expr(e) => render_expr(e),
        Stmt::Fallthrough { .. } => "fallthrough".to_string(),
        Stmt::Empty { .. } => String::new(),
    }
}

fn render_case(case: &CaseClause) -> String {
    let head = if case.exprs.is_empty() {
        "default:".to_string()
    } else {
        format!("case {}:", render_exprs(&case.exprs))
    };
    if case.body.is_empty() {
        head
    } else {
        format!("{} {}", head, render_stmts(&case.body))
    }
}

fn render_var(v: &VarDecl) -> String {
    let names = v
        .names
        .iter()
        .map(|n| n.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let mut out = format!("var {names}");
    if let Some(ty) = &v.type_name {
        out.push(' ');
        out.push_str(ty);
    }
    if !v.values.is_empty() {
        out.push_str(" = ");
        out.push_str(&render_exprs(&v.values));
    }
    out
}

fn render_exprs(exprs: &[Expr]) -> String {
    exprs.iter().map(render_expr).collect::<Vec<_>>().join(", ")
}

/// Renders a single expression.
pub fn render_expr(expr: &Expr) -> String {
    match expr {
        Expr::Ident(id) => id.name.clone(),
        Expr::Lit { value, .. } => value.clone(),
        Expr::Call { func, args, .. } => {
            format!("{}({})", render_expr(func), render_exprs(args))
        }
        Expr::Binary { op, lhs, rhs, .. } => {
            format!("{} {} {}", render_expr(lhs), op.as_str(), render_expr(rhs))
        }
        Expr::Unary { op, expr, .. } => format!("{}{}", op.as_str(), render_expr(expr)),
        Expr::Selector { expr, name, .. } => format!("{}.{}", render_expr(expr), name),
        Expr::Index { expr, index, .. } => {
            format!("{}[{}]", render_expr(expr), render_expr(index))
        }
        Expr::Paren { expr, .. } => format!("({})", render_expr(expr)),
    }
}
