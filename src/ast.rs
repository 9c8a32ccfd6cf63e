// ABOUTME: AST node model — two disjoint families, Statement and Expression

use std::fmt;

/// A full parsed program: an ordered sequence of top-level statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// A `{ ... }` block: shares its enclosing function's environment (blocks
/// are not their own scope — only function calls create a new one).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let {
        name: String,
        value: Expression,
    },
    Return {
        value: Expression,
    },
    Assignment {
        name: String,
        value: Expression,
    },
    IndexAssignment {
        target: Expression,
        index: Expression,
        value: Expression,
    },
    Expression {
        expression: Expression,
    },
    Block(Block),
    Break,
    Continue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    IntegerLiteral(i64),
    BooleanLiteral(bool),
    StringLiteral(String),
    Identifier(String),
    Prefix {
        operator: String,
        operand: Box<Expression>,
    },
    Infix {
        operator: String,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Conditional {
        condition: Box<Expression>,
        consequence: Block,
        alternative: Option<Block>,
    },
    WhileLoop {
        condition: Box<Expression>,
        body: Block,
    },
    Break,
    Continue,
    FunctionLiteral {
        parameters: Vec<String>,
        body: Block,
    },
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    ArrayLiteral(Vec<Expression>),
    HashLiteral(Vec<(Expression, Expression)>),
    Index {
        target: Box<Expression>,
        index: Box<Expression>,
    },
    /// Placeholder left by a parse error so downstream statements can
    /// still be parsed (parsing is error-tolerant and never aborts).
    Invalid,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            writeln!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {} = {};", name, value),
            Statement::Return { value } => write!(f, "return {};", value),
            Statement::Assignment { name, value } => write!(f, "{} = {};", name, value),
            Statement::IndexAssignment {
                target,
                index,
                value,
            } => write!(f, "{}[{}] = {};", target, index, value),
            Statement::Expression { expression } => write!(f, "{}", expression),
            Statement::Block(block) => write!(f, "{{\n{}\n}}", block),
            Statement::Break => write!(f, "break;"),
            Statement::Continue => write!(f, "continue;"),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::IntegerLiteral(v) => write!(f, "{}", v),
            Expression::BooleanLiteral(v) => write!(f, "{}", v),
            Expression::StringLiteral(v) => write!(f, "{}", v),
            Expression::Identifier(name) => write!(f, "{}", name),
            Expression::Prefix { operator, operand } => write!(f, "({}{})", operator, operand),
            Expression::Infix {
                operator,
                left,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            Expression::Conditional {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if ({}) {{\n{}\n}}", condition, consequence)?;
                if let Some(alt) = alternative {
                    write!(f, " else {{\n{}\n}}", alt)?;
                }
                Ok(())
            }
            Expression::WhileLoop { condition, body } => {
                write!(f, "while ({}) {{\n{}\n}}", condition, body)
            }
            Expression::Break => write!(f, "break"),
            Expression::Continue => write!(f, "continue"),
            Expression::FunctionLiteral { parameters, body } => {
                write!(f, "func({}) {{\n{}\n}}", parameters.join(", "), body)
            }
            Expression::Call { callee, arguments } => {
                let args: Vec<String> = arguments.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", callee, args.join(", "))
            }
            Expression::ArrayLiteral(elements) => {
                let items: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Expression::HashLiteral(pairs) => {
                let items: Vec<String> =
                    pairs.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
                write!(f, "{{{}}}", items.join(", "))
            }
            Expression::Index { target, index } => write!(f, "({}[{}])", target, index),
            Expression::Invalid => write!(f, "<invalid>"),
        }
    }
}
