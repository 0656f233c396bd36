use std::collections::HashMap;
use std::mem;

use crate::error::ResolveError;
use crate::expr::{
    AssignData, BinaryData, CallData, Expr, ExprVisitor, GetData, GroupingData, LogicalData,
    SetData, SuperData, ThisData, UnaryData, VariableData,
};
use crate::interpreter::Interpreter;
use crate::literal::Literal;
use crate::stmt::{
    BlockData, ClassData, ExpressionData, FunctionData, IfData, PrintData, ReturnData, Stmt,
    StmtVisitor, VarData, WhileData,
};
use crate::token::Token;

type ResolveResult = Result<(), ResolveError>;

/// What kind of function body is being resolved. Guards `return`.
enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

/// What kind of class body is being resolved. Guards `this` and `super`.
enum ClassType {
    None,
    Class,
    Subclass,
}

/// Walks the tree once before interpretation and records, for every
/// variable use, how many scopes lie between the use and its binding.
/// Uses that reach no local scope are left for the globals environment.
///
/// Each scope maps a name to whether its initializer has finished;
/// declaring inserts `false` and defining flips it to `true`, which is
/// how reads of a variable inside its own initializer get caught.
pub struct Resolver<'a, 'o> {
    interpreter: &'a mut Interpreter<'o>,
    scopes: Vec<HashMap<String, bool>>,
    current_function: FunctionType,
    current_class: ClassType,
}

impl<'a, 'o> Resolver<'a, 'o> {
    pub fn new(interpreter: &'a mut Interpreter<'o>) -> Self {
        Resolver {
            interpreter,
            scopes: vec![],
            current_function: FunctionType::None,
            current_class: ClassType::None,
        }
    }

    pub fn resolve(&mut self, statements: &[Stmt]) -> ResolveResult {
        for statement in statements {
            self.resolve_stmt(statement)?;
        }

        Ok(())
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) -> ResolveResult {
        stmt.accept(self)
    }

    fn resolve_expr(&mut self, expr: &Expr) -> ResolveResult {
        expr.accept(self)
    }

    fn resolve_function(&mut self, function: &FunctionData, r#type: FunctionType) -> ResolveResult {
        let enclosing_function = mem::replace(&mut self.current_function, r#type);

        self.begin_scope();
        for param in &function.params {
            self.declare(param)?;
            self.define(param);
        }
        let result = self.resolve(&function.body);
        self.end_scope();

        self.current_function = enclosing_function;
        result
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    /// Reserves a name in the current scope. The name exists from here
    /// on but cannot be read until it is defined.
    fn declare(&mut self, name: &Token) -> ResolveResult {
        let Some(scope) = self.scopes.last_mut() else { return Ok(()) };

        if scope.contains_key(&name.lexeme) {
            return Err(ResolveError {
                token: name.clone(),
                message: "Variable already declared in this scope.".to_string(),
            });
        }

        scope.insert(name.lexeme.clone(), false);
        Ok(())
    }

    /// Marks a declared name as ready to be read.
    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), true);
        }
    }

    /// Records the depth of the innermost scope that binds the name.
    /// Names bound by no scope are globals and stay unmapped.
    fn resolve_local(&mut self, name: &Token, id: usize) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.interpreter.resolve(id, depth);
                return;
            }
        }
    }
}

impl ExprVisitor<ResolveResult> for Resolver<'_, '_> {
    fn visit_literal_expr(&mut self, _literal: &Literal) -> ResolveResult {
        Ok(())
    }

    fn visit_grouping_expr(&mut self, grouping: &GroupingData) -> ResolveResult {
        self.resolve_expr(&grouping.expr)
    }

    fn visit_unary_expr(&mut self, unary: &UnaryData) -> ResolveResult {
        self.resolve_expr(&unary.expr)
    }

    fn visit_binary_expr(&mut self, binary: &BinaryData) -> ResolveResult {
        self.resolve_expr(&binary.left)?;
        self.resolve_expr(&binary.right)
    }

    fn visit_logical_expr(&mut self, logical: &LogicalData) -> ResolveResult {
        self.resolve_expr(&logical.left)?;
        self.resolve_expr(&logical.right)
    }

    fn visit_variable_expr(&mut self, variable: &VariableData) -> ResolveResult {
        if let Some(scope) = self.scopes.last() {
            if scope.get(&variable.name.lexeme) == Some(&false) {
                return Err(ResolveError {
                    token: variable.name.clone(),
                    message: "Can't read local variable in its own initializer.".to_string(),
                });
            }
        }

        self.resolve_local(&variable.name, variable.id);
        Ok(())
    }

    fn visit_assign_expr(&mut self, assign: &AssignData) -> ResolveResult {
        self.resolve_expr(&assign.value)?;
        self.resolve_local(&assign.name, assign.id);
        Ok(())
    }

    fn visit_call_expr(&mut self, call: &CallData) -> ResolveResult {
        self.resolve_expr(&call.callee)?;

        for argument in &call.arguments {
            self.resolve_expr(argument)?;
        }

        Ok(())
    }

    fn visit_get_expr(&mut self, get: &GetData) -> ResolveResult {
        self.resolve_expr(&get.object)
    }

    fn visit_set_expr(&mut self, set: &SetData) -> ResolveResult {
        self.resolve_expr(&set.value)?;
        self.resolve_expr(&set.object)
    }

    fn visit_this_expr(&mut self, this: &ThisData) -> ResolveResult {
        if let ClassType::None = self.current_class {
            return Err(ResolveError {
                token: this.keyword.clone(),
                message: "Can't use 'this' outside of a class.".to_string(),
            });
        }

        self.resolve_local(&this.keyword, this.id);
        Ok(())
    }

    fn visit_super_expr(&mut self, super_expr: &SuperData) -> ResolveResult {
        match self.current_class {
            ClassType::Subclass => (),
            ClassType::None => return Err(ResolveError {
                token: super_expr.keyword.clone(),
                message: "Can't use 'super' outside of a class.".to_string(),
            }),
            ClassType::Class => return Err(ResolveError {
                token: super_expr.keyword.clone(),
                message: "Can't use 'super' in a class with no superclass.".to_string(),
            }),
        }

        self.resolve_local(&super_expr.keyword, super_expr.id);
        Ok(())
    }
}

impl StmtVisitor<ResolveResult> for Resolver<'_, '_> {
    fn visit_expression_stmt(&mut self, expression: &ExpressionData) -> ResolveResult {
        self.resolve_expr(&expression.expr)
    }

    fn visit_print_stmt(&mut self, print: &PrintData) -> ResolveResult {
        self.resolve_expr(&print.expr)
    }

    fn visit_var_stmt(&mut self, var: &VarData) -> ResolveResult {
        self.declare(&var.name)?;
        if let Some(initializer) = &var.initializer {
            self.resolve_expr(initializer)?;
        }
        self.define(&var.name);
        Ok(())
    }

    fn visit_block_stmt(&mut self, block: &BlockData) -> ResolveResult {
        self.begin_scope();
        let result = self.resolve(&block.statements);
        self.end_scope();
        result
    }

    fn visit_if_stmt(&mut self, if_stmt: &IfData) -> ResolveResult {
        self.resolve_expr(&if_stmt.condition)?;
        self.resolve_stmt(&if_stmt.then_branch)?;
        if let Some(else_branch) = &if_stmt.else_branch {
            self.resolve_stmt(else_branch)?;
        }
        Ok(())
    }

    fn visit_while_stmt(&mut self, while_stmt: &WhileData) -> ResolveResult {
        self.resolve_expr(&while_stmt.condition)?;
        self.resolve_stmt(&while_stmt.body)
    }

    fn visit_function_stmt(&mut self, function: &FunctionData) -> ResolveResult {
        self.declare(&function.name)?;
        self.define(&function.name);

        self.resolve_function(function, FunctionType::Function)
    }

    fn visit_return_stmt(&mut self, return_stmt: &ReturnData) -> ResolveResult {
        if let FunctionType::None = self.current_function {
            return Err(ResolveError {
                token: return_stmt.keyword.clone(),
                message: "Can't return from top-level code.".to_string(),
            });
        }

        if let Some(value) = &return_stmt.value {
            if let FunctionType::Initializer = self.current_function {
                return Err(ResolveError {
                    token: return_stmt.keyword.clone(),
                    message: "Can't return a value from an initializer.".to_string(),
                });
            }

            self.resolve_expr(value)?;
        }

        Ok(())
    }

    fn visit_class_stmt(&mut self, class: &ClassData) -> ResolveResult {
        let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

        self.declare(&class.name)?;
        self.define(&class.name);

        if let Some(superclass) = &class.superclass {
            if class.name.lexeme == superclass.name.lexeme {
                return Err(ResolveError {
                    token: superclass.name.clone(),
                    message: "A class can't inherit from itself.".to_string(),
                });
            }

            self.current_class = ClassType::Subclass;

            self.visit_variable_expr(superclass)?;

            // Methods of a subclass close over a scope that binds 'super'.
            self.begin_scope();
            self.scopes
                .last_mut()
                .expect("scope stack to be not empty")
                .insert("super".to_string(), true);
        }

        // Every method closes over a scope that binds 'this'.
        self.begin_scope();
        self.scopes
            .last_mut()
            .expect("scope stack to be not empty")
            .insert("this".to_string(), true);

        let mut result = Ok(());
        for method in &class.methods {
            let declaration = if method.name.lexeme == "init" {
                FunctionType::Initializer
            } else {
                FunctionType::Method
            };

            result = self.resolve_function(method, declaration);
            if result.is_err() {
                break;
            }
        }

        self.end_scope();

        if class.superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
        result
    }
}
