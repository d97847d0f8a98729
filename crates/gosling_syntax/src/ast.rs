//! Go-flavored syntax tree types produced by the front-end.
//!
//! The tree is deliberately smaller than a full Go AST: it models the
//! declarations, statements, and expressions the lint rules inspect, with a
//! [`Span`] on every node so findings can be positioned precisely.

use crate::comment::CommentGroup;
use gosling_source::Span;

/// One parsed compilation unit: a single source file.
#[derive(Clone, Debug)]
pub struct File {
    /// The package clause name (`package main` → `"main"`).
    pub package_name: String,
    /// Top-level declarations in source order.
    pub decls: Vec<Decl>,
    /// All comment groups of the file, in source order.
    pub comments: Vec<CommentGroup>,
    /// Span covering the whole file.
    pub span: Span,
}

/// A top-level declaration.
#[derive(Clone, Debug)]
pub enum Decl {
    /// A function or method declaration.
    Func(FuncDecl),
    /// A package-level variable or constant declaration.
    Var(VarDecl),
    /// A named type declaration.
    Type(TypeDecl),
}

impl Decl {
    /// Returns the source span of this declaration.
    pub fn span(&self) -> Span {
        match self {
            Decl::Func(f) => f.span,
            Decl::Var(v) => v.span,
            Decl::Type(t) => t.span,
        }
    }
}

/// A function or method declaration.
#[derive(Clone, Debug)]
pub struct FuncDecl {
    /// The function name.
    pub name: String,
    /// The method receiver, if this is a method (`func (s *Server) Len()`).
    pub receiver: Option<Param>,
    /// The parameter list.
    pub params: Vec<Param>,
    /// The result list (names may be empty strings for unnamed results).
    pub results: Vec<Param>,
    /// The body, absent for external/assembly declarations.
    pub body: Option<Block>,
    /// Source location.
    pub span: Span,
}

impl FuncDecl {
    /// Returns the receiver's type name with any `*` stripped, if this is a method.
    pub fn receiver_type(&self) -> Option<&str> {
        self.receiver
            .as_ref()
            .map(|r| r.type_name.trim_start_matches('*'))
    }
}

/// A single named parameter, result, or receiver.
#[derive(Clone, Debug)]
pub struct Param {
    /// The bound name (`"_"` for the blank identifier, `""` if unnamed).
    pub name: String,
    /// The textual type (`"int"`, `"*Server"`, ...).
    pub type_name: String,
    /// Source location.
    pub span: Span,
}

/// A variable or constant declaration, at package or function level.
#[derive(Clone, Debug)]
pub struct VarDecl {
    /// The declared names, one per binding.
    pub names: Vec<Ident>,
    /// The declared type, if written explicitly.
    pub type_name: Option<String>,
    /// The initializer expressions (may be empty).
    pub values: Vec<Expr>,
    /// Source location.
    pub span: Span,
}

/// A named type declaration (`type Records []Record`).
#[derive(Clone, Debug)]
pub struct TypeDecl {
    /// The declared type name.
    pub name: String,
    /// Source location.
    pub span: Span,
}

/// A braced statement list.
#[derive(Clone, Debug)]
pub struct Block {
    /// The statements in source order.
    pub stmts: Vec<Stmt>,
    /// Source location, covering the braces.
    pub span: Span,
}

/// A statement.
#[derive(Clone, Debug)]
pub enum Stmt {
    /// A nested block.
    Block(Block),
    /// An `if` statement, possibly chaining into `else if`.
    If(IfStmt),
    /// A `switch` statement.
    Switch(SwitchStmt),
    /// A `for` loop.
    For(ForStmt),
    /// An assignment or short variable declaration.
    Assign {
        /// Left-hand side expressions.
        lhs: Vec<Expr>,
        /// Right-hand side expressions.
        rhs: Vec<Expr>,
        /// `true` for `:=`, `false` for `=`.
        define: bool,
        /// Source location.
        span: Span,
    },
    /// A local `var`/`const` declaration.
    Var(VarDecl),
    /// A `return` statement.
    Return {
        /// The returned expressions.
        results: Vec<Expr>,
        /// Source location.
        span: Span,
    },
    /// An expression used as a statement (typically a call).
    Expr(Expr),
    /// A `fallthrough` statement inside a switch case.
    Fallthrough {
        /// Source location.
        span: Span,
    },
    /// An empty statement.
    Empty {
        /// Source location.
        span: Span,
    },
}

impl Stmt {
    /// Returns the source span of this statement.
    pub fn span(&self) -> Span {
        match self {
            Stmt::Block(b) => b.span,
            Stmt::If(i) => i.span,
            Stmt::Switch(s) => s.span,
            Stmt::For(f) => f.span,
            Stmt::Assign { span, .. }
            | Stmt::Return { span, .. }
            | Stmt::Fallthrough { span }
            | Stmt::Empty { span } => *span,
            Stmt::Var(v) => v.span,
            Stmt::Expr(e) => e.span(),
        }
    }
}

/// An `if`/`else if`/`else` statement.
#[derive(Clone, Debug)]
pub struct IfStmt {
    /// The optional init statement (`if x := f(); x > 0`).
    pub init: Option<Box<Stmt>>,
    /// The branching condition.
    pub cond: Expr,
    /// The `then` branch body.
    pub then: Block,
    /// The `else` branch: a [`Stmt::Block`] or a chained [`Stmt::If`].
    pub els: Option<Box<Stmt>>,
    /// Source location.
    pub span: Span,
}

impl IfStmt {
    /// Returns `true` if the `else` branch continues into another `if`.
    pub fn chains(&self) -> bool {
        matches!(self.els.as_deref(), Some(Stmt::If(_)))
    }
}

/// A `switch` statement.
#[derive(Clone, Debug)]
pub struct SwitchStmt {
    /// The optional init statement.
    pub init: Option<Box<Stmt>>,
    /// The tag expression, absent for `switch { ... }`.
    pub tag: Option<Expr>,
    /// The case clauses in source order.
    pub cases: Vec<CaseClause>,
    /// Source location.
    pub span: Span,
}

/// One `case`/`default` clause of a switch.
#[derive(Clone, Debug)]
pub struct CaseClause {
    /// The case condition expressions; empty for `default`.
    pub exprs: Vec<Expr>,
    /// The clause body.
    pub body: Vec<Stmt>,
    /// Source location.
    pub span: Span,
}

impl CaseClause {
    /// Returns `true` if this clause ends in `fallthrough`, meaning its
    /// apparent body is incomplete.
    pub fn falls_through(&self) -> bool {
        matches!(self.body.last(), Some(Stmt::Fallthrough { .. }))
    }
}

/// A `for` loop (any of Go's loop forms; absent parts are `None`).
#[derive(Clone, Debug)]
pub struct ForStmt {
    /// The optional init statement.
    pub init: Option<Box<Stmt>>,
    /// The optional loop condition.
    pub cond: Option<Expr>,
    /// The optional post statement.
    pub post: Option<Box<Stmt>>,
    /// The loop body.
    pub body: Block,
    /// Source location.
    pub span: Span,
}

/// A binary operator.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `&&`
    And,
    /// `||`
    Or,
}

impl BinaryOp {
    /// Returns the Go source token for this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

/// A unary operator.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `-`
    Neg,
    /// `*` (dereference)
    Deref,
    /// `&` (address-of)
    Ref,
}

impl UnaryOp {
    /// Returns the Go source token for this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
            UnaryOp::Deref => "*",
            UnaryOp::Ref => "&",
        }
    }
}

/// An identifier occurrence.
#[derive(Clone, Debug)]
pub struct Ident {
    /// The identifier text.
    pub name: String,
    /// Source location.
    pub span: Span,
}

impl Ident {
    /// Returns `true` if this is the blank identifier `_`.
    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }
}

/// An expression.
#[derive(Clone, Debug)]
pub enum Expr {
    /// An identifier reference.
    Ident(Ident),
    /// A literal token (`42`, `"x"`, `true`).
    Lit {
        /// The literal source text.
        value: String,
        /// Source location.
        span: Span,
    },
    /// A call expression.
    Call {
        /// The callee.
        func: Box<Expr>,
        /// The arguments.
        args: Vec<Expr>,
        /// Source location.
        span: Span,
    },
    /// A binary operation.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// The left operand.
        lhs: Box<Expr>,
        /// The right operand.
        rhs: Box<Expr>,
        /// Source location.
        span: Span,
    },
    /// A unary operation.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        expr: Box<Expr>,
        /// Source location.
        span: Span,
    },
    /// A field or method selection (`x.Name`).
    Selector {
        /// The receiver expression.
        expr: Box<Expr>,
        /// The selected name.
        name: String,
        /// Source location.
        span: Span,
    },
    /// An index expression (`x[i]`).
    Index {
        /// The indexed expression.
        expr: Box<Expr>,
        /// The index.
        index: Box<Expr>,
        /// Source location.
        span: Span,
    },
    /// A parenthesized expression.
    Paren {
        /// The inner expression.
        expr: Box<Expr>,
        /// Source location.
        span: Span,
    },
}

impl Expr {
    /// Returns the source span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Expr::Ident(id) => id.span,
            Expr::Lit { span, .. }
            | Expr::Call { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Selector { span, .. }
            | Expr::Index { span, .. }
            | Expr::Paren { span, .. } => *span,
        }
    }
}
