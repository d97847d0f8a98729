//! Syntax tree interface between the external Go front-end and the lint engine.
//!
//! This crate defines the [`File`] syntax tree and its statement/expression
//! types, comment trivia, a pre-order [`Visitor`], a canonical renderer used
//! for structural hashing, the best-effort [`TypeTable`] produced by type
//! resolution, and the [`FrontEnd`] trait through which parsing and type
//! checking are reached. gosling never parses source itself; it consumes
//! trees produced by a collaborator implementing [`FrontEnd`].

#![warn(missing_docs)]

pub mod ast;
pub mod comment;
pub mod front_end;
pub mod print;
pub mod types;
pub mod walk;

pub use ast::{
    BinaryOp, Block, CaseClause, Decl, Expr, File, ForStmt, FuncDecl, Ident, IfStmt, Param, Stmt,
    SwitchStmt, TypeDecl, UnaryOp, VarDecl,
};
pub use comment::{Comment, CommentGroup};
pub use front_end::{FrontEnd, LanguageVersion, ParseError, TypeCheckOutcome, TypeError};
pub use print::{render_block, render_expr, render_stmt, render_stmts};
pub use types::{TypeInfo, TypeTable};
pub use walk::{contains_call, walk_block, walk_expr, walk_file, walk_stmt, Visitor};
