//! Combinator grammar of the demo language
//!
//! ```text
//! factor     := "(" expression ")" | NAME "(" expression,* ")" | NUMBER | NAME | "-" factor
//! term       := factor (("*" | "/") term)?
//! expression := term (("+" | "-") expression)?
//! condition  := expression ("<" | "<=" | ">" | ">=" | "==" | "!=") expression
//! statement  := "let" NAME "=" expression ";"
//!             | NAME "=" expression ";"
//!             | "return" expression ";"
//!             | "if" "(" condition ")" body ("else" body)?
//!             | "while" "(" condition ")" body
//!             | "for" "(" NAME "in" factor ".." factor ")" body
//! body       := "{" statement* "}"
//! function   := "defun" NAME "(" NAME,* ")" body
//! program    := function* END
//! ```

use once_cell::sync::OnceCell;

use super::ast::{
    AdditiveOperator, Assign, Body, Call, Comparison, Condition, Expression, Factor, For,
    Function, Group, If, Let, MultiplicativeOperator, Negation, Program, Return, Statement, Term,
    While,
};
use super::tokens::Lexeme;
use crate::parsing::{
    end, ignore, many, optional, seq, token, Grammar, GrammarBuilder, GrammarError, Lazy, Parser,
};

pub type ProgramGrammar = Grammar<Lexeme, Lazy<Lexeme, Program>>;

/// Parser yielding `value` for one lexem of `kind`
fn operator<T>(kind: Lexeme, value: T) -> impl Parser<Lexeme, Output = T> + Clone + Send + Sync
where
    T: Copy + Send + Sync + 'static,
{
    token(kind).map(move |_| value)
}

/// Build a fresh grammar for the language
pub fn build_grammar() -> Result<ProgramGrammar, GrammarError> {
    let mut builder = GrammarBuilder::new();
    let expression = builder.lazy::<Expression>("expression");
    let term = builder.lazy::<Term>("term");
    let factor = builder.lazy::<Factor>("factor");
    let body = builder.lazy::<Body>("body");
    let program = builder.lazy::<Program>("program");

    let name = token(Lexeme::Name).map(|lexem| lexem.text);
    let number = token(Lexeme::Number).try_map(|lexem| lexem.text.parse::<i64>().ok());

    // ------------------------------------------------------------------------- arithmetic

    let group = ignore(Lexeme::Lrb)
        .and(expression.clone())
        .skip(ignore(Lexeme::Rrb))
        .construct::<Group>()
        .map_into::<Factor>();
    let call = seq(name.clone())
        .skip(ignore(Lexeme::Lrb))
        .and(expression.clone().separated_by(ignore(Lexeme::Comma)))
        .skip(ignore(Lexeme::Rrb))
        .map_into::<Call>()
        .map_into::<Factor>();
    let negation = ignore(Lexeme::Minus)
        .and(factor.clone())
        .construct::<Negation>()
        .map_into::<Factor>();

    builder.define(
        &factor,
        group
            .or(call)
            .or(number.map(Factor::Number))
            .or(name.clone().map(Factor::Variable))
            .or(negation),
    )?;

    let multiplicative = operator(Lexeme::Mul, MultiplicativeOperator::Mul)
        .or(operator(Lexeme::Div, MultiplicativeOperator::Div));
    builder.define(
        &term,
        seq(factor.clone())
            .and(optional(seq(multiplicative).and(term.clone())))
            .map_into::<Term>(),
    )?;

    let additive = operator(Lexeme::Plus, AdditiveOperator::Add)
        .or(operator(Lexeme::Minus, AdditiveOperator::Sub));
    builder.define(
        &expression,
        seq(term.clone())
            .and(optional(seq(additive).and(expression.clone())))
            .map_into::<Expression>(),
    )?;

    let comparison = operator(Lexeme::LessOrEqual, Comparison::LessOrEqual)
        .or(operator(Lexeme::Less, Comparison::Less))
        .or(operator(Lexeme::GreaterOrEqual, Comparison::GreaterOrEqual))
        .or(operator(Lexeme::Greater, Comparison::Greater))
        .or(operator(Lexeme::Equals, Comparison::Equals))
        .or(operator(Lexeme::NotEqual, Comparison::NotEqual));
    let condition = seq(expression.clone())
        .and(comparison)
        .and(expression.clone())
        .map_into::<Condition>();

    // ------------------------------------------------------------------------- statements

    let let_statement = ignore(Lexeme::Let)
        .and(name.clone())
        .skip(ignore(Lexeme::Equal))
        .and(expression.clone())
        .skip(ignore(Lexeme::Semicolon))
        .map(|(name, value)| Let { name, value })
        .map_into::<Statement>();
    let assign = seq(name.clone())
        .skip(ignore(Lexeme::Equal))
        .and(expression.clone())
        .skip(ignore(Lexeme::Semicolon))
        .map(|(name, value)| Assign { name, value })
        .map_into::<Statement>();
    let return_statement = ignore(Lexeme::Return)
        .and(expression.clone())
        .skip(ignore(Lexeme::Semicolon))
        .map(|(value,)| Return { value })
        .map_into::<Statement>();
    let else_body = ignore(Lexeme::Else).and(body.clone()).map(|(body,)| body);
    let if_statement = ignore(Lexeme::If)
        .skip(ignore(Lexeme::Lrb))
        .and(condition.clone())
        .skip(ignore(Lexeme::Rrb))
        .and(body.clone())
        .and(optional(else_body))
        .map(|(condition, then_body, else_body)| If {
            condition,
            then_body,
            else_body,
        })
        .map_into::<Statement>();
    let while_statement = ignore(Lexeme::While)
        .skip(ignore(Lexeme::Lrb))
        .and(condition)
        .skip(ignore(Lexeme::Rrb))
        .and(body.clone())
        .map(|(condition, body)| While { condition, body })
        .map_into::<Statement>();
    let for_statement = ignore(Lexeme::For)
        .skip(ignore(Lexeme::Lrb))
        .and(name.clone())
        .skip(ignore(Lexeme::In))
        .and(factor.clone())
        .skip(ignore(Lexeme::Ellipsis))
        .and(factor.clone())
        .skip(ignore(Lexeme::Rrb))
        .and(body.clone())
        .map(|(variable, start, end, body)| For {
            variable,
            start,
            end,
            body,
        })
        .map_into::<Statement>();

    let statement = let_statement
        .or(assign)
        .or(return_statement)
        .or(if_statement)
        .or(while_statement)
        .or(for_statement);

    builder.define(
        &body,
        ignore(Lexeme::Lcb)
            .and(many(statement))
            .skip(ignore(Lexeme::Rcb))
            .map(|(statements,)| Body { statements }),
    )?;

    // ------------------------------------------------------------------------- top level

    let function = ignore(Lexeme::Defun)
        .and(name.clone())
        .skip(ignore(Lexeme::Lrb))
        .and(name.separated_by(ignore(Lexeme::Comma)))
        .skip(ignore(Lexeme::Rrb))
        .and(body.clone())
        .map(|(name, parameters, body)| Function {
            name,
            parameters,
            body,
        });

    builder.define(
        &program,
        many(function)
            .skip(end())
            .map(|functions| Program { functions }),
    )?;

    builder.build(program)
}

/// The shared grammar
pub fn grammar() -> Result<&'static ProgramGrammar, GrammarError> {
    static GRAMMAR: OnceCell<ProgramGrammar> = OnceCell::new();
    GRAMMAR.get_or_try_init(build_grammar)
}
