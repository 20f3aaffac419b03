//! AST of the demo language
//!
//! Every grammar rule has its own node type. Rules with alternatives produce an enum, and each
//! alternative's node converts into it through `From`, which is what the grammar's `map_into`
//! relies on. Arithmetic is right-recursive: `a - b - c` is `a - (b - c)`.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    pub functions: Vec<Function>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Function {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Body {
    pub statements: Vec<Statement>,
}

// -------------------------------------------------------------------------------------------
// Statements
// -------------------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Statement {
    Let(Let),
    Assign(Assign),
    Return(Return),
    If(If),
    While(While),
    For(For),
}

/// `let name = value;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Let {
    pub name: String,
    pub value: Expression,
}

/// `name = value;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assign {
    pub name: String,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Return {
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct If {
    pub condition: Condition,
    pub then_body: Body,
    pub else_body: Option<Body>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct While {
    pub condition: Condition,
    pub body: Body,
}

/// `for (variable in start..end) body`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct For {
    pub variable: String,
    pub start: Factor,
    pub end: Factor,
    pub body: Body,
}

macro_rules! statement_from {
    ($($node:ident),*) => {
        $(
            impl From<$node> for Statement {
                fn from(node: $node) -> Self {
                    Statement::$node(node)
                }
            }
        )*
    };
}

statement_from!(Let, Assign, Return, If, While, For);

// -------------------------------------------------------------------------------------------
// Conditions
// -------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Comparison {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Equals,
    NotEqual,
}

impl Comparison {
    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::Less => "<",
            Comparison::LessOrEqual => "<=",
            Comparison::Greater => ">",
            Comparison::GreaterOrEqual => ">=",
            Comparison::Equals => "==",
            Comparison::NotEqual => "!=",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub left: Expression,
    pub comparison: Comparison,
    pub right: Expression,
}

impl From<(Expression, Comparison, Expression)> for Condition {
    fn from((left, comparison, right): (Expression, Comparison, Expression)) -> Self {
        Condition {
            left,
            comparison,
            right,
        }
    }
}

// -------------------------------------------------------------------------------------------
// Arithmetic
// -------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AdditiveOperator {
    Add,
    Sub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MultiplicativeOperator {
    Mul,
    Div,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expression {
    Sum(Box<Sum>),
    Term(Term),
}

/// `left (+|-) right`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sum {
    pub left: Term,
    pub operator: AdditiveOperator,
    pub right: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Term {
    Product(Box<Product>),
    Factor(Factor),
}

/// `left (*|/) right`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub left: Factor,
    pub operator: MultiplicativeOperator,
    pub right: Term,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Factor {
    Group(Box<Group>),
    Call(Call),
    Number(i64),
    Variable(String),
    Negation(Box<Negation>),
}

/// `( inner )`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub inner: Expression,
}

/// `name(arguments, ...)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Call {
    pub name: String,
    pub arguments: Vec<Expression>,
}

/// `- operand`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Negation {
    pub operand: Factor,
}

impl From<(Term, Option<(AdditiveOperator, Expression)>)> for Expression {
    fn from((left, tail): (Term, Option<(AdditiveOperator, Expression)>)) -> Self {
        match tail {
            Some((operator, right)) => Expression::Sum(Box::new(Sum {
                left,
                operator,
                right,
            })),
            None => Expression::Term(left),
        }
    }
}

impl From<(Factor, Option<(MultiplicativeOperator, Term)>)> for Term {
    fn from((left, tail): (Factor, Option<(MultiplicativeOperator, Term)>)) -> Self {
        match tail {
            Some((operator, right)) => Term::Product(Box::new(Product {
                left,
                operator,
                right,
            })),
            None => Term::Factor(left),
        }
    }
}

impl From<(Expression,)> for Group {
    fn from((inner,): (Expression,)) -> Self {
        Group { inner }
    }
}

impl From<(Factor,)> for Negation {
    fn from((operand,): (Factor,)) -> Self {
        Negation { operand }
    }
}

impl From<(String, Vec<Expression>)> for Call {
    fn from((name, arguments): (String, Vec<Expression>)) -> Self {
        Call { name, arguments }
    }
}

impl From<Box<Group>> for Factor {
    fn from(group: Box<Group>) -> Self {
        Factor::Group(group)
    }
}

impl From<Box<Negation>> for Factor {
    fn from(negation: Box<Negation>) -> Self {
        Factor::Negation(negation)
    }
}

impl From<Call> for Factor {
    fn from(call: Call) -> Self {
        Factor::Call(call)
    }
}

impl From<Factor> for Term {
    fn from(factor: Factor) -> Self {
        Term::Factor(factor)
    }
}

impl From<Term> for Expression {
    fn from(term: Term) -> Self {
        Expression::Term(term)
    }
}

impl From<Factor> for Expression {
    fn from(factor: Factor) -> Self {
        Expression::Term(Term::Factor(factor))
    }
}

impl Expression {
    pub fn number(value: i64) -> Self {
        Factor::Number(value).into()
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Factor::Variable(name.into()).into()
    }
}
