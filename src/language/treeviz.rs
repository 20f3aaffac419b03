//! Tree rendering of programs
//!
//! One line per node: `├─ <type>: <label>`, children indented below their parent. Expression
//! wrappers that only forward to a single operand are rendered as that operand.

use super::ast::{
    AdditiveOperator, Assign, Body, Call, Condition, Expression, Factor, For, Function, Group, If,
    Let, MultiplicativeOperator, Negation, Product, Program, Return, Statement, Sum, Term, While,
};

/// A node that can be rendered as part of a tree
pub trait TreeNode {
    fn node_type(&self) -> &'static str;

    fn label(&self) -> String {
        String::new()
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        Vec::new()
    }
}

pub fn to_treeviz_str(program: &Program) -> String {
    let mut result = String::new();
    append_children(&mut result, &program.children(), "");
    result
}

fn append_node(result: &mut String, node: &dyn TreeNode, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    let label = node.label();
    if label.is_empty() {
        result.push_str(&format!("{}{} {}\n", prefix, connector, node.node_type()));
    } else {
        result.push_str(&format!(
            "{}{} {}: {}\n",
            prefix,
            connector,
            node.node_type(),
            label
        ));
    }

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    append_children(result, &node.children(), &new_prefix);
}

fn append_children(result: &mut String, children: &[&dyn TreeNode], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_node(result, *child, prefix, is_last);
    }
}

impl TreeNode for Program {
    fn node_type(&self) -> &'static str {
        "Program"
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        self.functions.iter().map(|f| f as &dyn TreeNode).collect()
    }
}

impl TreeNode for Function {
    fn node_type(&self) -> &'static str {
        "Function"
    }

    fn label(&self) -> String {
        format!("{}({})", self.name, self.parameters.join(", "))
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        self.body.children()
    }
}

impl TreeNode for Body {
    fn node_type(&self) -> &'static str {
        "Body"
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        self.statements.iter().map(|s| s as &dyn TreeNode).collect()
    }
}

impl TreeNode for Statement {
    fn node_type(&self) -> &'static str {
        self.inner().node_type()
    }

    fn label(&self) -> String {
        self.inner().label()
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        self.inner().children()
    }
}

impl Statement {
    fn inner(&self) -> &dyn TreeNode {
        match self {
            Statement::Let(node) => node,
            Statement::Assign(node) => node,
            Statement::Return(node) => node,
            Statement::If(node) => node,
            Statement::While(node) => node,
            Statement::For(node) => node,
        }
    }
}

impl TreeNode for Let {
    fn node_type(&self) -> &'static str {
        "Let"
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        vec![&self.value]
    }
}

impl TreeNode for Assign {
    fn node_type(&self) -> &'static str {
        "Assign"
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        vec![&self.value]
    }
}

impl TreeNode for Return {
    fn node_type(&self) -> &'static str {
        "Return"
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        vec![&self.value]
    }
}

impl TreeNode for If {
    fn node_type(&self) -> &'static str {
        "If"
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        let mut children: Vec<&dyn TreeNode> = vec![&self.condition, &self.then_body];
        if let Some(else_body) = &self.else_body {
            children.push(else_body);
        }
        children
    }
}

impl TreeNode for While {
    fn node_type(&self) -> &'static str {
        "While"
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        vec![&self.condition, &self.body]
    }
}

impl TreeNode for For {
    fn node_type(&self) -> &'static str {
        "For"
    }

    fn label(&self) -> String {
        self.variable.clone()
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        vec![&self.start, &self.end, &self.body]
    }
}

impl TreeNode for Condition {
    fn node_type(&self) -> &'static str {
        "Condition"
    }

    fn label(&self) -> String {
        self.comparison.symbol().to_string()
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        vec![&self.left, &self.right]
    }
}

impl TreeNode for Expression {
    fn node_type(&self) -> &'static str {
        self.inner().node_type()
    }

    fn label(&self) -> String {
        self.inner().label()
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        self.inner().children()
    }
}

impl Expression {
    fn inner(&self) -> &dyn TreeNode {
        match self {
            Expression::Sum(sum) => &**sum,
            Expression::Term(term) => term,
        }
    }
}

impl TreeNode for Sum {
    fn node_type(&self) -> &'static str {
        "Sum"
    }

    fn label(&self) -> String {
        match self.operator {
            AdditiveOperator::Add => "+".to_string(),
            AdditiveOperator::Sub => "-".to_string(),
        }
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        vec![&self.left, &self.right]
    }
}

impl TreeNode for Term {
    fn node_type(&self) -> &'static str {
        self.inner().node_type()
    }

    fn label(&self) -> String {
        self.inner().label()
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        self.inner().children()
    }
}

impl Term {
    fn inner(&self) -> &dyn TreeNode {
        match self {
            Term::Product(product) => &**product,
            Term::Factor(factor) => factor,
        }
    }
}

impl TreeNode for Product {
    fn node_type(&self) -> &'static str {
        "Product"
    }

    fn label(&self) -> String {
        match self.operator {
            MultiplicativeOperator::Mul => "*".to_string(),
            MultiplicativeOperator::Div => "/".to_string(),
        }
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        vec![&self.left, &self.right]
    }
}

impl TreeNode for Factor {
    fn node_type(&self) -> &'static str {
        match self {
            Factor::Group(group) => group.node_type(),
            Factor::Call(call) => call.node_type(),
            Factor::Number(_) => "Number",
            Factor::Variable(_) => "Variable",
            Factor::Negation(negation) => negation.node_type(),
        }
    }

    fn label(&self) -> String {
        match self {
            Factor::Number(value) => value.to_string(),
            Factor::Variable(name) => name.clone(),
            Factor::Call(call) => call.label(),
            Factor::Group(_) | Factor::Negation(_) => String::new(),
        }
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        match self {
            Factor::Group(group) => group.children(),
            Factor::Call(call) => call.children(),
            Factor::Negation(negation) => negation.children(),
            Factor::Number(_) | Factor::Variable(_) => Vec::new(),
        }
    }
}

impl TreeNode for Group {
    fn node_type(&self) -> &'static str {
        "Group"
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        vec![&self.inner]
    }
}

impl TreeNode for Call {
    fn node_type(&self) -> &'static str {
        "Call"
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        self.arguments.iter().map(|a| a as &dyn TreeNode).collect()
    }
}

impl TreeNode for Negation {
    fn node_type(&self) -> &'static str {
        "Negation"
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        vec![&self.operand]
    }
}
