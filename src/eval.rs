// ABOUTME: Tree-walking evaluator — executes an AST against an environment

use crate::ast::{Block, Expression, Program, Statement};
use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{hash_value, Closure, Value};
use std::rc::Rc;

/// Runs a whole program against `env` and returns the single value a driver
/// should display. Unwraps a top-level `return`, turns a top-level `break`
/// or `continue` into a display error (there is no enclosing loop to catch
/// it), and turns any bubbled-up `EvalError` into a `Value::Error`.
pub fn eval_program(program: &Program, env: &Rc<Environment>) -> Value {
    let mut result = Value::Null;
    for statement in &program.statements {
        match eval_statement(statement, env) {
            Ok(Value::ReturnValue(inner)) => return *inner,
            Ok(Value::Break) => return Value::Error(EvalError::BreakOutsideLoop.to_string()),
            Ok(Value::Continue) => return Value::Error(EvalError::ContinueOutsideLoop.to_string()),
            Ok(value) => result = value,
            Err(err) => return Value::Error(err.to_string()),
        }
    }
    result
}

fn is_control_flow(value: &Value) -> bool {
    matches!(value, Value::ReturnValue(_) | Value::Break | Value::Continue)
}

fn eval_block(block: &Block, env: &Rc<Environment>) -> Result<Value, EvalError> {
    let mut result = Value::Null;
    for statement in &block.statements {
        result = eval_statement(statement, env)?;
        if is_control_flow(&result) {
            return Ok(result);
        }
    }
    Ok(result)
}

fn eval_statement(statement: &Statement, env: &Rc<Environment>) -> Result<Value, EvalError> {
    match statement {
        Statement::Let { name, value } => {
            let evaluated = eval_expression(value, env)?;
            env.set(name.clone(), evaluated);
            Ok(Value::Null)
        }
        Statement::Return { value } => {
            let evaluated = eval_expression(value, env)?;
            Ok(Value::ReturnValue(Box::new(evaluated)))
        }
        Statement::Assignment { name, value } => {
            let evaluated = eval_expression(value, env)?;
            env.set(name.clone(), evaluated);
            Ok(Value::Null)
        }
        Statement::IndexAssignment {
            target,
            index,
            value,
        } => eval_index_assignment(target, index, value, env),
        Statement::Expression { expression } => eval_expression(expression, env),
        Statement::Block(block) => eval_block(block, env),
        Statement::Break => Ok(Value::Break),
        Statement::Continue => Ok(Value::Continue),
    }
}

fn eval_expression(expression: &Expression, env: &Rc<Environment>) -> Result<Value, EvalError> {
    match expression {
        Expression::IntegerLiteral(v) => Ok(Value::Integer(*v)),
        Expression::BooleanLiteral(v) => Ok(Value::Boolean(*v)),
        Expression::StringLiteral(v) => Ok(Value::String(v.clone())),
        Expression::Identifier(name) => env
            .get(name)
            .ok_or_else(|| EvalError::IdentifierNotFound { name: name.clone() }),
        Expression::Prefix { operator, operand } => {
            let value = eval_expression(operand, env)?;
            eval_prefix(operator, value)
        }
        Expression::Infix {
            operator,
            left,
            right,
        } => {
            let left_value = eval_expression(left, env)?;
            let right_value = eval_expression(right, env)?;
            eval_infix(operator, left_value, right_value)
        }
        Expression::Conditional {
            condition,
            consequence,
            alternative,
        } => {
            let cond = eval_expression(condition, env)?;
            if cond.is_truthy() {
                eval_block(consequence, env)
            } else if let Some(alt) = alternative {
                eval_block(alt, env)
            } else {
                Ok(Value::Null)
            }
        }
        Expression::WhileLoop { condition, body } => eval_while_loop(condition, body, env),
        Expression::Break => Ok(Value::Break),
        Expression::Continue => Ok(Value::Continue),
        Expression::FunctionLiteral { parameters, body } => {
            Ok(Value::Function(Rc::new(Closure {
                parameters: parameters.clone(),
                body: body.clone(),
                env: env.clone(),
            })))
        }
        Expression::Call { callee, arguments } => eval_call(callee, arguments, env),
        Expression::ArrayLiteral(elements) => {
            let mut values = Vec::with_capacity(elements.len());
            for element in elements {
                values.push(eval_expression(element, env)?);
            }
            Ok(Value::array(values))
        }
        Expression::HashLiteral(pairs) => eval_hash_literal(pairs, env),
        Expression::Index { target, index } => eval_index(target, index, env),
        Expression::Invalid => Ok(Value::Null),
    }
}

fn eval_prefix(operator: &str, value: Value) -> Result<Value, EvalError> {
    match operator {
        "!" => Ok(Value::Boolean(!value.is_truthy())),
        "-" => match value {
            Value::Integer(v) => Ok(Value::Integer(v.wrapping_neg())),
            other => Err(EvalError::UnknownPrefixOperator {
                operand_type: other.type_name(),
            }),
        },
        _ => unreachable!("parser only ever emits ! and - as prefix operators"),
    }
}

fn eval_infix(operator: &str, left: Value, right: Value) -> Result<Value, EvalError> {
    match (&left, &right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Value::String(l), Value::String(r)) => eval_string_infix(operator, l, r),
        _ if left.type_name() != right.type_name() => Err(EvalError::TypeMismatch {
            left_type: left.type_name(),
            operator: operator.to_string(),
            right_type: right.type_name(),
        }),
        _ => match operator {
            "==" => Ok(Value::Boolean(left == right)),
            "!=" => Ok(Value::Boolean(left != right)),
            _ => Err(EvalError::UnknownInfixOperator {
                left_type: left.type_name(),
                operator: operator.to_string(),
                right_type: right.type_name(),
            }),
        },
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Result<Value, EvalError> {
    match operator {
        "+" => Ok(Value::Integer(left.wrapping_add(right))),
        "-" => Ok(Value::Integer(left.wrapping_sub(right))),
        "*" => Ok(Value::Integer(left.wrapping_mul(right))),
        "/" => {
            if right == 0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(Value::Integer(left.wrapping_div(right)))
            }
        }
        "==" => Ok(Value::Boolean(left == right)),
        "!=" => Ok(Value::Boolean(left != right)),
        "<" => Ok(Value::Boolean(left < right)),
        "<=" => Ok(Value::Boolean(left <= right)),
        ">" => Ok(Value::Boolean(left > right)),
        ">=" => Ok(Value::Boolean(left >= right)),
        _ => Err(EvalError::UnknownInfixOperator {
            left_type: "INTEGER",
            operator: operator.to_string(),
            right_type: "INTEGER",
        }),
    }
}

fn eval_string_infix(operator: &str, left: &str, right: &str) -> Result<Value, EvalError> {
    match operator {
        "+" => Ok(Value::String(format!("{}{}", left, right))),
        "==" => Ok(Value::Boolean(left == right)),
        "!=" => Ok(Value::Boolean(left != right)),
        _ => Err(EvalError::UnknownInfixOperator {
            left_type: "STRING",
            operator: operator.to_string(),
            right_type: "STRING",
        }),
    }
}

fn eval_while_loop(
    condition: &Expression,
    body: &Block,
    env: &Rc<Environment>,
) -> Result<Value, EvalError> {
    let mut result = Value::Null;
    loop {
        let cond = eval_expression(condition, env)?;
        if !cond.is_truthy() {
            return Ok(result);
        }
        match eval_block(body, env)? {
            Value::Break => return Ok(Value::Null),
            Value::Continue => continue,
            returned @ Value::ReturnValue(_) => return Ok(returned),
            other => result = other,
        }
    }
}

fn eval_call(
    callee: &Expression,
    arguments: &[Expression],
    env: &Rc<Environment>,
) -> Result<Value, EvalError> {
    let callee_value = eval_expression(callee, env)?;
    let mut args = Vec::with_capacity(arguments.len());
    for argument in arguments {
        args.push(eval_expression(argument, env)?);
    }
    match callee_value {
        Value::Function(closure) => call_function(&closure, &args),
        Value::Builtin(builtin) => builtin(&args),
        other => Err(EvalError::NotAFunction {
            type_name: other.type_name(),
        }),
    }
}

/// Binds `args` positionally in a scope enclosed by the closure's *captured*
/// environment — not the caller's — so a function only ever sees the
/// bindings visible where it was defined, plus its own parameters.
fn call_function(closure: &Closure, args: &[Value]) -> Result<Value, EvalError> {
    if closure.parameters.len() != args.len() {
        return Err(EvalError::WrongArgumentCount {
            want: closure.parameters.len(),
            got: args.len(),
        });
    }
    let call_env = Environment::enclosed(closure.env.clone());
    for (param, arg) in closure.parameters.iter().zip(args.iter()) {
        call_env.set(param.clone(), arg.clone());
    }
    match eval_block(&closure.body, &call_env)? {
        Value::ReturnValue(inner) => Ok(*inner),
        other => Ok(other),
    }
}

fn eval_index_assignment(
    target: &Expression,
    index: &Expression,
    value: &Expression,
    env: &Rc<Environment>,
) -> Result<Value, EvalError> {
    let target_value = match target {
        Expression::Identifier(name) => env
            .get(name)
            .ok_or_else(|| EvalError::IdentifierNotFound { name: name.clone() })?,
        other => eval_expression(other, env)?,
    };
    let index_value = eval_expression(index, env)?;
    let new_value = eval_expression(value, env)?;

    match &target_value {
        Value::Array(cells) => match index_value {
            Value::Integer(i) if i >= 0 => {
                let idx = i as usize;
                let mut items = cells.borrow_mut();
                if idx >= items.len() {
                    items.resize(idx + 1, Value::Null);
                }
                items[idx] = new_value.clone();
                Ok(new_value)
            }
            other => Err(EvalError::UnsupportedIndexAssignment {
                type_name: other.type_name(),
            }),
        },
        Value::HashMap(cells) => {
            let key = hash_value(&index_value).ok_or_else(|| EvalError::UnusableHashKey {
                type_name: index_value.type_name(),
            })?;
            cells.borrow_mut().insert(key, (index_value, new_value.clone()));
            Ok(new_value)
        }
        other => Err(EvalError::UnsupportedIndexAssignment {
            type_name: other.type_name(),
        }),
    }
}

fn eval_hash_literal(
    pairs: &[(Expression, Expression)],
    env: &Rc<Environment>,
) -> Result<Value, EvalError> {
    let mut map = std::collections::HashMap::new();
    for (key_expr, value_expr) in pairs {
        let key_value = eval_expression(key_expr, env)?;
        let value_value = eval_expression(value_expr, env)?;
        let key = hash_value(&key_value).ok_or_else(|| EvalError::UnusableHashKey {
            type_name: key_value.type_name(),
        })?;
        map.insert(key, (key_value, value_value));
    }
    Ok(Value::hashmap(map))
}

fn eval_index(
    target: &Expression,
    index: &Expression,
    env: &Rc<Environment>,
) -> Result<Value, EvalError> {
    let target_value = eval_expression(target, env)?;
    let index_value = eval_expression(index, env)?;
    match (&target_value, &index_value) {
        (Value::Array(cells), Value::Integer(i)) => {
            let items = cells.borrow();
            if *i < 0 || *i as usize >= items.len() {
                Ok(Value::Null)
            } else {
                Ok(items[*i as usize].clone())
            }
        }
        (Value::HashMap(cells), _) => match hash_value(&index_value) {
            Some(key) => Ok(cells
                .borrow()
                .get(&key)
                .map(|(_, v)| v.clone())
                .unwrap_or(Value::Null)),
            None => Err(EvalError::UnusableHashKey {
                type_name: index_value.type_name(),
            }),
        },
        _ => Err(EvalError::UnsupportedIndex {
            target_type: target_value.type_name(),
            index_type: index_value.type_name(),
        }),
    }
}
