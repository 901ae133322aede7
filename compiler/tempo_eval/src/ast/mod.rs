//! The expression and statement node set.
//!
//! Trees are built once, by the script front end, through the constructors
//! below and the binding methods on [`Root`](crate::Root) (call sites need
//! the root to resolve their targets). Every node carries the
//! [`CodeLocation`] it came from; errors raised while evaluating a node are
//! stamped with the innermost location.
//!
//! Evaluation lives in [`crate::eval`].

mod call;

use tempo_ir::{BinaryOp, CodeLocation, LogicalOp, Name, UnaryOp};
use tempo_value::Value;

use crate::reference::VarRef;

pub use call::{ApiCall, ConstObjectCall, InlineCall, NativeCall, MAX_API_ARGS, MAX_OBJECT_ARGS};

/// Expression node: evaluates to a value.
#[derive(Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub location: CodeLocation,
}

#[derive(Debug)]
pub enum ExprKind {
    Literal(Value),
    /// Constant of a native API class, folded when the tree was built.
    ApiConstant(Value),
    Var(VarRef),
    /// `target = value`, or `target op= value` when `op` is set.
    Assign {
        target: VarRef,
        op: Option<BinaryOp>,
        value: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Conditional {
        condition: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    Array(Vec<Expr>),
    Object(Vec<(Name, Expr)>),
    Member {
        object: Box<Expr>,
        property: Name,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    /// Call of an inline function.
    Call(InlineCall),
    /// Call into a native API class resolved when the tree was built.
    ApiCall(ApiCall),
    /// Call into a native object resolved on first evaluation.
    ConstObjectCall(ConstObjectCall),
    /// Call of a compiled native snippet.
    NativeCall(NativeCall),
}

impl Expr {
    pub fn new(kind: ExprKind, location: CodeLocation) -> Self {
        Expr { kind, location }
    }

    /// Set the source location.
    #[must_use]
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.location = CodeLocation::new(line, column);
        self
    }

    fn unlocated(kind: ExprKind) -> Self {
        Expr::new(kind, CodeLocation::UNKNOWN)
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::unlocated(ExprKind::Literal(value.into()))
    }

    pub fn number(n: f64) -> Self {
        Expr::literal(n)
    }

    pub fn string(s: &str) -> Self {
        Expr::literal(s)
    }

    pub fn undefined() -> Self {
        Expr::literal(Value::Undefined)
    }

    pub fn var(target: VarRef) -> Self {
        Expr::unlocated(ExprKind::Var(target))
    }

    pub fn assign(target: VarRef, value: Expr) -> Self {
        Expr::unlocated(ExprKind::Assign {
            target,
            op: None,
            value: Box::new(value),
        })
    }

    /// `target op= value`.
    pub fn compound_assign(target: VarRef, op: BinaryOp, value: Expr) -> Self {
        Expr::unlocated(ExprKind::Assign {
            target,
            op: Some(op),
            value: Box::new(value),
        })
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::unlocated(ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn logical(op: LogicalOp, left: Expr, right: Expr) -> Self {
        Expr::unlocated(ExprKind::Logical {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::unlocated(ExprKind::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    pub fn conditional(condition: Expr, then: Expr, otherwise: Expr) -> Self {
        Expr::unlocated(ExprKind::Conditional {
            condition: Box::new(condition),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    pub fn array(items: Vec<Expr>) -> Self {
        Expr::unlocated(ExprKind::Array(items))
    }

    pub fn object(properties: Vec<(Name, Expr)>) -> Self {
        Expr::unlocated(ExprKind::Object(properties))
    }

    pub fn member(object: Expr, property: Name) -> Self {
        Expr::unlocated(ExprKind::Member {
            object: Box::new(object),
            property,
        })
    }

    pub fn index(object: Expr, index: Expr) -> Self {
        Expr::unlocated(ExprKind::Index {
            object: Box::new(object),
            index: Box::new(index),
        })
    }
}

/// Statement node: performs an action and yields a control signal.
#[derive(Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub location: CodeLocation,
}

#[derive(Debug)]
pub enum StmtKind {
    Expr(Expr),
    /// Declaration in any writable tier: `reg`, `global`, function `var`,
    /// callback `local`. A missing initialiser stores `undefined`.
    Declare {
        target: VarRef,
        init: Option<Expr>,
    },
    Block(Vec<Stmt>),
    If {
        condition: Expr,
        then: Box<Stmt>,
        otherwise: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    For {
        init: Option<Box<Stmt>>,
        condition: Option<Expr>,
        step: Option<Expr>,
        body: Box<Stmt>,
    },
    Return(Option<Expr>),
    Break,
    Continue,
}

impl Stmt {
    pub fn new(kind: StmtKind, location: CodeLocation) -> Self {
        Stmt { kind, location }
    }

    #[must_use]
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.location = CodeLocation::new(line, column);
        self
    }

    fn unlocated(kind: StmtKind) -> Self {
        Stmt::new(kind, CodeLocation::UNKNOWN)
    }

    pub fn expr(expr: Expr) -> Self {
        let location = expr.location;
        Stmt::new(StmtKind::Expr(expr), location)
    }

    pub fn declare(target: VarRef, init: Option<Expr>) -> Self {
        Stmt::unlocated(StmtKind::Declare { target, init })
    }

    pub fn block(statements: Vec<Stmt>) -> Self {
        Stmt::unlocated(StmtKind::Block(statements))
    }

    pub fn if_then(condition: Expr, then: Stmt) -> Self {
        Stmt::unlocated(StmtKind::If {
            condition,
            then: Box::new(then),
            otherwise: None,
        })
    }

    pub fn if_else(condition: Expr, then: Stmt, otherwise: Stmt) -> Self {
        Stmt::unlocated(StmtKind::If {
            condition,
            then: Box::new(then),
            otherwise: Some(Box::new(otherwise)),
        })
    }

    pub fn while_loop(condition: Expr, body: Stmt) -> Self {
        Stmt::unlocated(StmtKind::While {
            condition,
            body: Box::new(body),
        })
    }

    pub fn for_loop(init: Option<Stmt>, condition: Option<Expr>, step: Option<Expr>, body: Stmt) -> Self {
        Stmt::unlocated(StmtKind::For {
            init: init.map(Box::new),
            condition,
            step,
            body: Box::new(body),
        })
    }

    pub fn ret(value: Option<Expr>) -> Self {
        Stmt::unlocated(StmtKind::Return(value))
    }

    pub fn brk() -> Self {
        Stmt::unlocated(StmtKind::Break)
    }

    pub fn cont() -> Self {
        Stmt::unlocated(StmtKind::Continue)
    }
}
