use crate::expr::{
    AssignData, BinaryData, CallData, Expr, ExprVisitor, GetData, GroupingData, LogicalData,
    SetData, SuperData, ThisData, UnaryData, VariableData,
};
use crate::literal::Literal;

/// Returns a string representation of the expression in parentheses.
macro_rules! parenthesize {
    ( $self:ident, $name:expr, $( $x:expr ),+ ) => {
        {
            let mut string = String::new();
            string += "(";
            string += $name;
            $(
                string += " ";
                string += &$x.accept($self);
            )*
            string += ")";

            string
        }
    };
}

/// Prints an expression tree in its parenthesized prefix form,
/// e.g. `1 + 2 * 3` comes out as `(+ 1.0 (* 2.0 3.0))`.
pub struct ASTPrinter;

impl ASTPrinter {
    /// Prints the expression using visitor pattern.
    pub fn print(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }
}

impl ExprVisitor<String> for ASTPrinter {
    fn visit_literal_expr(&mut self, literal: &Literal) -> String {
        literal.canon()
    }

    fn visit_grouping_expr(&mut self, grouping: &GroupingData) -> String {
        parenthesize!(self, "group", grouping.expr)
    }

    fn visit_unary_expr(&mut self, unary: &UnaryData) -> String {
        parenthesize!(self, &unary.operator.lexeme, unary.expr)
    }

    fn visit_binary_expr(&mut self, binary: &BinaryData) -> String {
        parenthesize!(self, &binary.operator.lexeme, binary.left, binary.right)
    }

    fn visit_logical_expr(&mut self, logical: &LogicalData) -> String {
        parenthesize!(self, &logical.operator.lexeme, logical.left, logical.right)
    }

    fn visit_variable_expr(&mut self, variable: &VariableData) -> String {
        variable.name.lexeme.clone()
    }

    fn visit_assign_expr(&mut self, assign: &AssignData) -> String {
        parenthesize!(self, format!("= {}", assign.name.lexeme).as_str(), assign.value)
    }

    fn visit_call_expr(&mut self, call: &CallData) -> String {
        let mut string = String::new();
        string += &call.callee.accept(self);
        string += "(";
        for argument in &call.arguments {
            string += &argument.accept(self);
            string += " ";
        }
        string = string.trim_end().to_string();
        string += ")";
        string
    }

    fn visit_get_expr(&mut self, get: &GetData) -> String {
        format!("(get {} {})", get.object.accept(self), get.name.lexeme)
    }

    fn visit_set_expr(&mut self, set: &SetData) -> String {
        format!(
            "(set {} {} {})",
            set.object.accept(self),
            set.name.lexeme,
            set.value.accept(self),
        )
    }

    fn visit_this_expr(&mut self, _this: &ThisData) -> String {
        "this".to_string()
    }

    fn visit_super_expr(&mut self, super_expr: &SuperData) -> String {
        format!("(super {})", super_expr.method.lexeme)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::token::{Token, Type};

    #[test]
    fn print_literal() {
        assert_eq!(ASTPrinter.print(&Expr::Literal(Literal::Number(42.0))), "42.0");
        assert_eq!(ASTPrinter.print(&Expr::Literal(Literal::Number(3.14))), "3.14");
        assert_eq!(ASTPrinter.print(&Expr::Literal(Literal::Bool(true))), "true");
        assert_eq!(ASTPrinter.print(&Expr::Literal(Literal::Nil)), "nil");
        assert_eq!(ASTPrinter.print(&Expr::Literal(Literal::from("foo"))), "foo");
    }

    #[test]
    fn print_binary() {
        let expr = Expr::Binary(BinaryData {
            left: Box::new(Expr::Literal(Literal::Number(1.0))),
            operator: Token::new(Type::Plus, "+".to_string(), None, 1),
            right: Box::new(Expr::Binary(BinaryData {
                left: Box::new(Expr::Literal(Literal::Number(2.0))),
                operator: Token::new(Type::Star, "*".to_string(), None, 1),
                right: Box::new(Expr::Literal(Literal::Number(3.0))),
            })),
        });

        assert_eq!(ASTPrinter.print(&expr), "(+ 1.0 (* 2.0 3.0))");
    }

    #[test]
    fn print_grouping() {
        let expr = Expr::Grouping(GroupingData {
            expr: Box::new(Expr::Literal(Literal::from("foo"))),
        });

        assert_eq!(ASTPrinter.print(&expr), "(group foo)");
    }

    #[test]
    fn print_unary() {
        let expr = Expr::Unary(UnaryData {
            operator: Token::new(Type::Minus, "-".to_string(), None, 1),
            expr: Box::new(Expr::Literal(Literal::Number(1.0))),
        });

        assert_eq!(ASTPrinter.print(&expr), "(- 1.0)");
    }
}
