//! Expression visitor
//!
//! Implement [`Visitor`] and override the hooks you care about. Every hook
//! defaults to the matching `walk_*` function, and node kinds without a
//! dedicated hook are traversed through [`Expression::children`], so new
//! host node kinds never cut a traversal short.

use super::expr::Expression;

pub trait Visitor: Sized {
    fn visit_expression(&mut self, expr: &Expression) {
        walk_expression(self, expr);
    }

    fn visit_call(&mut self, callee: &Expression, args: &[Expression]) {
        walk_call(self, callee, args);
    }

    fn visit_member(&mut self, base: &Expression, _member: &str) {
        walk_member(self, base);
    }
}

pub fn walk_expression<V: Visitor>(visitor: &mut V, expr: &Expression) {
    match expr {
        Expression::Call { callee, args } => visitor.visit_call(callee, args),
        Expression::Member { base, member } => visitor.visit_member(base, member),
        _ => {
            for child in expr.children() {
                visitor.visit_expression(child);
            }
        }
    }
}

pub fn walk_call<V: Visitor>(visitor: &mut V, callee: &Expression, args: &[Expression]) {
    visitor.visit_expression(callee);
    for arg in args {
        visitor.visit_expression(arg);
    }
}

pub fn walk_member<V: Visitor>(visitor: &mut V, base: &Expression) {
    visitor.visit_expression(base);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountNodes(usize);

    impl Visitor for CountNodes {
        fn visit_expression(&mut self, expr: &Expression) {
            self.0 += 1;
            walk_expression(self, expr);
        }
    }

    #[test]
    fn test_visits_every_node_once() {
        let body = Expression::block(vec![
            Expression::let_("x", Expression::call(Expression::path("a.b"), vec![])),
            Expression::other(
                "if",
                vec![
                    Expression::ident("cond"),
                    Expression::object([("k", Expression::string("v"))]),
                ],
            ),
        ]);
        let mut counter = CountNodes(0);
        counter.visit_expression(&body);
        assert_eq!(counter.0, body.node_count());
    }
}
