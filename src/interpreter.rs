use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::expr::{
    AssignData, BinaryData, CallData, Expr, ExprVisitor, GetData, GroupingData, LogicalData,
    SetData, SuperData, ThisData, UnaryData, VariableData,
};
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{
    BlockData, ClassData, ExpressionData, FunctionData, IfData, PrintData, ReturnData, Stmt,
    StmtVisitor, VarData, WhileData,
};
use crate::token::{Token, Type};

/// How a statement finished. A `return` travels up as `Flow::Return`
/// until the nearest function call site catches it; it never rides the
/// error channel.
#[derive(Debug, PartialEq)]
pub enum Flow {
    Normal,
    Return(Object),
}

type EvalResult = Result<Object, RuntimeError>;
type ExecResult = Result<Flow, RuntimeError>;

/// Walks the tree and produces the program's effects. Holds the globals
/// environment, the environment of the code currently executing and the
/// side table of resolved variable depths.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<usize, usize>,
    output: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::get_globals() {
            let name = native.name.lexeme.clone();
            globals.borrow_mut().define(&name, Object::from(native));
        }

        Interpreter {
            globals: Rc::clone(&globals),
            environment: globals,
            locals: HashMap::new(),
            output,
        }
    }

    /// Records how many environments lie between an expression's use
    /// site and its binding. Called by the resolver.
    pub fn resolve(&mut self, id: usize, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// Executes the program.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for statement in statements {
            match self.execute(statement)? {
                Flow::Normal => (),
                Flow::Return(_) => unreachable!("return signal escaped past every call site"),
            }
        }

        Ok(())
    }

    /// Evaluates a single expression to a value.
    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        expr.accept(self)
    }

    fn execute(&mut self, stmt: &Stmt) -> ExecResult {
        stmt.accept(self)
    }

    /// Executes statements inside the given environment. The previous
    /// environment is restored on every path out, including errors and
    /// return signals.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<RefCell<Environment>>,
    ) -> ExecResult {
        let previous = mem::replace(&mut self.environment, environment);

        let mut flow = Ok(Flow::Normal);
        for statement in statements {
            match self.execute(statement) {
                Ok(Flow::Normal) => (),
                other => {
                    flow = other;
                    break;
                },
            }
        }

        self.environment = previous;
        flow
    }

    /// The stream `print` writes to.
    pub fn writer(&mut self) -> &mut dyn Write {
        &mut *self.output
    }

    /// Reads a variable through its resolved depth, or from globals
    /// when the resolver left it unmapped.
    fn look_up_variable(&self, name: &Token, id: usize) -> EvalResult {
        match self.locals.get(&id) {
            Some(distance) => self.environment.borrow().get_at(*distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    fn number_operands(
        operator: &Token,
        left: &Object,
        right: &Object,
    ) -> Result<(f64, f64), RuntimeError> {
        match (left.number(), right.number()) {
            (Some(left), Some(right)) => Ok((left, right)),
            _ => Err(RuntimeError {
                token: operator.clone(),
                message: "Operands must be numbers.".to_string(),
            }),
        }
    }
}

impl ExprVisitor<EvalResult> for Interpreter<'_> {
    fn visit_literal_expr(&mut self, literal: &Literal) -> EvalResult {
        Ok(Object::from(literal.clone()))
    }

    fn visit_grouping_expr(&mut self, grouping: &GroupingData) -> EvalResult {
        self.evaluate(&grouping.expr)
    }

    fn visit_unary_expr(&mut self, unary: &UnaryData) -> EvalResult {
        let right = self.evaluate(&unary.expr)?;

        match unary.operator.r#type {
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            Type::Minus => (-right).ok_or_else(|| RuntimeError {
                token: unary.operator.clone(),
                message: "Operand must be a number.".to_string(),
            }),
            _ => unreachable!(),
        }
    }

    fn visit_binary_expr(&mut self, binary: &BinaryData) -> EvalResult {
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;
        let operator = &binary.operator;

        match operator.r#type {
            Type::Greater => {
                Self::number_operands(operator, &left, &right).map(|(l, r)| Object::from(l > r))
            },
            Type::GreaterEqual => {
                Self::number_operands(operator, &left, &right).map(|(l, r)| Object::from(l >= r))
            },
            Type::Less => {
                Self::number_operands(operator, &left, &right).map(|(l, r)| Object::from(l < r))
            },
            Type::LessEqual => {
                Self::number_operands(operator, &left, &right).map(|(l, r)| Object::from(l <= r))
            },
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),
            Type::Minus => (left - right).ok_or_else(|| RuntimeError {
                token: operator.clone(),
                message: "Operands must be numbers.".to_string(),
            }),
            Type::Slash => (left / right).ok_or_else(|| RuntimeError {
                token: operator.clone(),
                message: "Operands must be numbers.".to_string(),
            }),
            Type::Star => (left * right).ok_or_else(|| RuntimeError {
                token: operator.clone(),
                message: "Operands must be numbers.".to_string(),
            }),
            Type::Plus => (left + right).ok_or_else(|| RuntimeError {
                token: operator.clone(),
                message: "Operands must be two numbers or two strings.".to_string(),
            }),
            _ => unreachable!(),
        }
    }

    fn visit_logical_expr(&mut self, logical: &LogicalData) -> EvalResult {
        let left = self.evaluate(&logical.left)?;

        // The result is the operand itself, never coerced to a boolean.
        if logical.operator.r#type == Type::Or {
            if left.is_truthy() {
                return Ok(left);
            }
        } else if !left.is_truthy() {
            return Ok(left);
        }

        self.evaluate(&logical.right)
    }

    fn visit_variable_expr(&mut self, variable: &VariableData) -> EvalResult {
        self.look_up_variable(&variable.name, variable.id)
    }

    fn visit_assign_expr(&mut self, assign: &AssignData) -> EvalResult {
        let value = self.evaluate(&assign.value)?;

        match self.locals.get(&assign.id) {
            Some(distance) => {
                self.environment.borrow_mut().assign_at(*distance, &assign.name, value.clone());
            },
            None => {
                self.globals.borrow_mut().assign(&assign.name, value.clone())?;
            },
        }

        Ok(value)
    }

    fn visit_call_expr(&mut self, call: &CallData) -> EvalResult {
        let callee = self.evaluate(&call.callee)?;

        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let callable: &dyn Callable = match &callee {
            Object::Function(function) => function,
            Object::NativeFunction(function) => function,
            Object::Class(class) => class,
            _ => {
                return Err(RuntimeError {
                    token: call.paren.clone(),
                    message: "Can only call functions and classes.".to_string(),
                });
            },
        };

        if arguments.len() != callable.arity() {
            return Err(RuntimeError {
                token: call.paren.clone(),
                message: format!(
                    "Expected {} arguments but got {}.",
                    callable.arity(),
                    arguments.len(),
                ),
            });
        }

        callable.call(self, arguments)
    }

    fn visit_get_expr(&mut self, get: &GetData) -> EvalResult {
        let object = self.evaluate(&get.object)?;

        match &object {
            Object::Instance(instance) => instance.borrow().get(&get.name, &object),
            _ => Err(RuntimeError {
                token: get.name.clone(),
                message: "Only instances have properties.".to_string(),
            }),
        }
    }

    fn visit_set_expr(&mut self, set: &SetData) -> EvalResult {
        let object = self.evaluate(&set.object)?;

        match object {
            Object::Instance(instance) => {
                let value = self.evaluate(&set.value)?;
                instance.borrow_mut().set(&set.name, value.clone());
                Ok(value)
            },
            _ => Err(RuntimeError {
                token: set.name.clone(),
                message: "Only instances have fields.".to_string(),
            }),
        }
    }

    fn visit_this_expr(&mut self, this: &ThisData) -> EvalResult {
        self.look_up_variable(&this.keyword, this.id)
    }

    fn visit_super_expr(&mut self, super_expr: &SuperData) -> EvalResult {
        let distance = *self.locals.get(&super_expr.id)
            .expect("'super' to be resolved to a depth");

        let superclass = self.environment.borrow().get_at(distance, &Token::from("super"))?;
        let Object::Class(superclass) = superclass else {
            unreachable!("'super' to hold a class");
        };

        // 'this' lives one environment inside the one binding 'super'.
        let object = self.environment.borrow().get_at(distance - 1, &Token::from("this"))?;

        let Some(method) = superclass.borrow().find_method(&super_expr.method.lexeme) else {
            return Err(RuntimeError {
                token: super_expr.method.clone(),
                message: format!("Undefined property '{}'.", super_expr.method.lexeme),
            });
        };

        Ok(Object::from(method.bind(object)))
    }
}

impl StmtVisitor<ExecResult> for Interpreter<'_> {
    fn visit_expression_stmt(&mut self, expression: &ExpressionData) -> ExecResult {
        self.evaluate(&expression.expr)?;
        Ok(Flow::Normal)
    }

    fn visit_print_stmt(&mut self, print: &PrintData) -> ExecResult {
        let value = self.evaluate(&print.expr)?;
        writeln!(self.output, "{value}").expect("program output to be writable");
        Ok(Flow::Normal)
    }

    fn visit_var_stmt(&mut self, var: &VarData) -> ExecResult {
        let value = match &var.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Object::from(Literal::Nil),
        };

        self.environment.borrow_mut().define(&var.name.lexeme, value);
        Ok(Flow::Normal)
    }

    fn visit_block_stmt(&mut self, block: &BlockData) -> ExecResult {
        let environment = Environment::new(Some(Rc::clone(&self.environment)));
        self.execute_block(&block.statements, Rc::new(RefCell::new(environment)))
    }

    fn visit_if_stmt(&mut self, if_stmt: &IfData) -> ExecResult {
        if self.evaluate(&if_stmt.condition)?.is_truthy() {
            self.execute(&if_stmt.then_branch)
        } else if let Some(else_branch) = &if_stmt.else_branch {
            self.execute(else_branch)
        } else {
            Ok(Flow::Normal)
        }
    }

    fn visit_while_stmt(&mut self, while_stmt: &WhileData) -> ExecResult {
        while self.evaluate(&while_stmt.condition)?.is_truthy() {
            match self.execute(&while_stmt.body)? {
                Flow::Normal => (),
                flow => return Ok(flow),
            }
        }

        Ok(Flow::Normal)
    }

    fn visit_function_stmt(&mut self, function: &FunctionData) -> ExecResult {
        let function_object = Function::new(function, Rc::clone(&self.environment), false);
        self.environment.borrow_mut().define(&function.name.lexeme, Object::from(function_object));
        Ok(Flow::Normal)
    }

    fn visit_return_stmt(&mut self, return_stmt: &ReturnData) -> ExecResult {
        let value = match &return_stmt.value {
            Some(value) => self.evaluate(value)?,
            None => Object::from(Literal::Nil),
        };

        Ok(Flow::Return(value))
    }

    fn visit_class_stmt(&mut self, class: &ClassData) -> ExecResult {
        let superclass = match &class.superclass {
            Some(superclass) => {
                match self.look_up_variable(&superclass.name, superclass.id)? {
                    Object::Class(class) => Some(class),
                    _ => {
                        return Err(RuntimeError {
                            token: superclass.name.clone(),
                            message: "Superclass must be a class.".to_string(),
                        });
                    },
                }
            },
            None => None,
        };

        self.environment.borrow_mut().define(&class.name.lexeme, Object::from(Literal::Nil));

        // Methods of a subclass close over an extra environment that
        // binds 'super' to the superclass.
        let enclosing = superclass.as_ref().map(|superclass| {
            let previous = Rc::clone(&self.environment);
            let mut environment = Environment::new(Some(Rc::clone(&previous)));
            environment.define("super", Object::Class(Rc::clone(superclass)));
            self.environment = Rc::new(RefCell::new(environment));
            previous
        });

        let mut methods = HashMap::new();
        for method in &class.methods {
            let is_initializer = method.name.lexeme == "init";
            let function = Function::new(method, Rc::clone(&self.environment), is_initializer);
            methods.insert(method.name.lexeme.clone(), function);
        }

        let class_object = Class::new(class.name.lexeme.clone(), superclass, methods);

        if let Some(previous) = enclosing {
            self.environment = previous;
        }

        self.environment.borrow_mut().assign(&class.name, Object::from(class_object))?;
        Ok(Flow::Normal)
    }
}
