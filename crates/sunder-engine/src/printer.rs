//! Pretty-printing of class models as JavaScript-style source.
//!
//! Used to inspect what each compiled target receives. Node kinds the
//! engine does not model are printed as `/* label */ (children...)`.

use std::fmt::Write;

use crate::emit::js_string;
use crate::model::{ClassModel, Expression, FieldModel, Literal, Method, Variable};

/// Trait for pretty-printing models
pub trait PrettyPrint {
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for ClassModel {
    fn pretty_print(&self) -> String {
        let mut p = Printer::default();
        p.class(self);
        p.out
    }
}

impl PrettyPrint for [ClassModel] {
    fn pretty_print(&self) -> String {
        let mut p = Printer::default();
        for (i, class) in self.iter().enumerate() {
            if i > 0 {
                p.out.push('\n');
            }
            p.class(class);
        }
        p.out
    }
}

impl PrettyPrint for Expression {
    fn pretty_print(&self) -> String {
        let mut p = Printer::default();
        p.expr(self);
        p.out
    }
}

#[derive(Default)]
struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn line_start(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
    }

    fn class(&mut self, class: &ClassModel) {
        writeln!(self.out, "class {} {{", class.name).unwrap();
        self.indent += 1;
        for field in &class.fields {
            match field {
                FieldModel::Variable(v) => self.variable(v),
                FieldModel::Method(m) => self.method(m),
            }
        }
        self.indent -= 1;
        writeln!(self.out, "}}").unwrap();
    }

    fn tags<'a>(&mut self, tags: impl Iterator<Item = &'a String>) {
        let tags: Vec<String> = tags.map(|t| format!("@{}", t)).collect();
        if !tags.is_empty() {
            self.line_start();
            writeln!(self.out, "// {}", tags.join(" ")).unwrap();
        }
    }

    fn variable(&mut self, var: &Variable) {
        self.tags(var.metadata.iter());
        self.line_start();
        match &var.declared_type {
            Some(ty) => writeln!(self.out, "{}; // {}", var.name, ty).unwrap(),
            None => writeln!(self.out, "{};", var.name).unwrap(),
        }
    }

    fn method(&mut self, method: &Method) {
        self.tags(method.metadata.iter());
        self.line_start();
        let is_async = method.body.as_ref().map_or(false, contains_await);
        let name = if method.is_constructor() {
            "constructor"
        } else {
            method.name.as_str()
        };
        let params: Vec<&str> = method.parameters.iter().map(|p| p.name.as_str()).collect();
        write!(
            self.out,
            "{}{}({})",
            if is_async { "async " } else { "" },
            name,
            params.join(", ")
        )
        .unwrap();
        if let Some(ret) = &method.return_type {
            write!(self.out, " /* : {} */", ret).unwrap();
        }

        match &method.body {
            None => writeln!(self.out, ";").unwrap(),
            Some(body) => {
                writeln!(self.out, " {{").unwrap();
                self.indent += 1;
                match body {
                    Expression::Block { body } => {
                        for stmt in body {
                            self.statement(stmt);
                        }
                    }
                    other => self.statement(other),
                }
                self.indent -= 1;
                self.line_start();
                writeln!(self.out, "}}").unwrap();
            }
        }
    }

    fn statement(&mut self, expr: &Expression) {
        self.line_start();
        self.expr(expr);
        self.out.push_str(";\n");
    }

    fn expr(&mut self, expr: &Expression) {
        match expr {
            Expression::Call { callee, args } => {
                self.expr(callee);
                self.out.push('(');
                self.list(args);
                self.out.push(')');
            }
            Expression::Member { base, member } => {
                self.expr(base);
                self.out.push('.');
                self.out.push_str(member);
            }
            Expression::Identifier { name } => self.out.push_str(name),
            Expression::Literal { value } => self.literal(value),
            Expression::Object { fields } => {
                if fields.is_empty() {
                    self.out.push_str("{}");
                    return;
                }
                self.out.push_str("{ ");
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    if is_plain_key(&field.key) {
                        self.out.push_str(&field.key);
                    } else {
                        self.out.push_str(&js_string(&field.key));
                    }
                    self.out.push_str(": ");
                    self.expr(&field.value);
                }
                self.out.push_str(" }");
            }
            Expression::Let { name, value } => {
                write!(self.out, "const {} = ", name).unwrap();
                self.expr(value);
            }
            Expression::Await { value } => {
                self.out.push_str("await ");
                self.expr(value);
            }
            Expression::Return { value } => {
                self.out.push_str("return");
                if let Some(value) = value {
                    self.out.push(' ');
                    self.expr(value);
                }
            }
            Expression::Block { body } => {
                self.out.push_str("{\n");
                self.indent += 1;
                for stmt in body {
                    self.statement(stmt);
                }
                self.indent -= 1;
                self.line_start();
                self.out.push('}');
            }
            Expression::Other { label, children } => {
                write!(self.out, "/* {} */ (", label).unwrap();
                self.list(children);
                self.out.push(')');
            }
        }
    }

    fn list(&mut self, items: &[Expression]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.expr(item);
        }
    }

    fn literal(&mut self, value: &Literal) {
        match value {
            Literal::Null => self.out.push_str("null"),
            Literal::Bool(b) => write!(self.out, "{}", b).unwrap(),
            Literal::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(self.out, "{}", *n as i64).unwrap()
            }
            Literal::Number(n) => write!(self.out, "{}", n).unwrap(),
            Literal::String(s) => self.out.push_str(&js_string(s)),
        }
    }
}

fn contains_await(expr: &Expression) -> bool {
    matches!(expr, Expression::Await { .. }) || expr.children().into_iter().any(contains_await)
}

fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
